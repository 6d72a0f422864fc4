/// Fixed-step simulation time.
///
/// Advances by `1 / target_fps` per tick regardless of wall-clock time. The
/// value is only used as a pseudo-random seed for the evolution kernel, so it
/// never resets or wraps within a session.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    time: f32,
    step: f32,
    ticks: u64,
}

impl SimulationClock {
    /// Creates a clock at `0.0`. A `target_fps` of zero is treated as 1 Hz.
    pub fn new(target_fps: u32) -> Self {
        Self {
            time: 0.0,
            step: 1.0 / target_fps.max(1) as f32,
            ticks: 0,
        }
    }

    /// Current time in simulated seconds; the kernel seed.
    #[inline]
    pub fn seed(&self) -> f32 {
        self.time
    }

    /// Increment applied by each `advance`.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Number of `advance` calls so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn advance(&mut self) {
        self.time += self.step;
        self.ticks = self.ticks.saturating_add(1);
    }
}
