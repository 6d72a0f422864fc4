use std::time::{Duration, Instant};

/// Fixed-cadence redraw scheduler.
///
/// Deadlines lie on a grid `start + k * interval`. When the loop falls behind,
/// missed slots are skipped rather than replayed, so a stall never produces a
/// burst of catch-up frames.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next: Instant,
}

impl FramePacer {
    /// Creates a pacer whose first frame is due immediately.
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    /// Creates a pacer whose first deadline is `start`.
    pub fn starting_at(target_fps: u32, start: Instant) -> Self {
        Self {
            interval: Duration::from_secs(1) / target_fps.max(1),
            next: start,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant at which the next frame is due.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Returns `true` if a frame is due at `now` and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        let behind = now.saturating_duration_since(self.next);
        let missed = (behind.as_nanos() / self.interval.as_nanos().max(1)) as u32;
        if missed > 0 {
            log::trace!("frame pacer skipped {missed} slot(s)");
        }
        self.next += self.interval * (missed + 1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_matches_fps() {
        let p = FramePacer::new(30);
        assert_eq!(p.interval(), Duration::from_nanos(33_333_333));
    }

    #[test]
    fn not_due_before_deadline() {
        let t0 = Instant::now();
        let mut p = FramePacer::starting_at(30, t0);
        assert!(p.poll(t0));
        assert!(!p.poll(t0 + Duration::from_millis(10)));
        assert!(p.poll(t0 + Duration::from_millis(34)));
    }

    #[test]
    fn stall_skips_missed_slots() {
        let t0 = Instant::now();
        let mut p = FramePacer::starting_at(10, t0);
        assert!(p.poll(t0));
        // 350ms late: slots at 100, 200, 300 are collapsed into one frame.
        assert!(p.poll(t0 + Duration::from_millis(350)));
        assert_eq!(p.deadline(), t0 + Duration::from_millis(400));
        assert!(!p.poll(t0 + Duration::from_millis(360)));
    }
}
