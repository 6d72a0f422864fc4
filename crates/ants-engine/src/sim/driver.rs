//! Per-tick orchestration of the simulation.
//!
//! Order within a tick: size sync, acquire drawable, transfer, evolve,
//! render, present, swap roles. Everything after the drawable is acquired is
//! recorded into one frame, so a tick either presents fully or changes
//! nothing on the GPU.

use crate::coords::{Size2D, TextureExtent};
use crate::time::SimulationClock;

use super::backend::GpuBackend;
use super::config::SimConfig;
use super::roles::BufferRoles;
use super::texture_pair::TexturePair;
use super::{display, evolve, transfer, SimError};

/// Consecutive drops between two `warn` summaries.
const DROP_WARN_INTERVAL: u64 = 120;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkipReason {
    /// Zero-sized surface or no drawable from the surface.
    NoDrawable,
    /// The resize could not allocate a new pair; the old one is kept.
    AllocationFailed,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    Presented,
    Skipped(SkipReason),
}

/// Running totals, mostly for logs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TickStats {
    pub presented: u64,
    pub no_drawable: u64,
    pub allocation_failed: u64,
    /// Skips since the last successful present.
    pub consecutive_drops: u64,
}

impl TickStats {
    pub fn skipped(&self) -> u64 {
        self.no_drawable + self.allocation_failed
    }
}

pub struct FrameDriver<T> {
    config: SimConfig,
    pair: Option<TexturePair<T>>,
    roles: BufferRoles,
    clock: SimulationClock,
    resize_pending: bool,
    next_generation: u64,
    stats: TickStats,
}

impl<T> FrameDriver<T> {
    /// Allocates and pre-clears the pair for `surface`.
    ///
    /// A zero-sized surface or a failed allocation is not fatal: the pair is
    /// left missing and the first tick that can allocate does so.
    pub fn new<B>(backend: &mut B, config: SimConfig, surface: TextureExtent) -> Self
    where
        B: GpuBackend<Texture = T>,
    {
        let mut driver = Self {
            clock: SimulationClock::new(config.target_fps),
            config,
            pair: None,
            roles: BufferRoles::initial(),
            resize_pending: false,
            next_generation: 0,
            stats: TickStats::default(),
        };

        if !surface.is_empty() {
            if let Err(err) = driver.reallocate(backend, surface) {
                log::warn!("initial pattern allocation failed, retrying on first tick: {err}");
            }
        }
        driver
    }

    /// Records a surface resize; the pair is rebuilt on the next tick.
    pub fn request_resize(&mut self, size: TextureExtent) {
        log::debug!("resize requested: {}x{}", size.width, size.height);
        self.resize_pending = true;
    }

    /// Runs one tick against `surface`, the size the surface is configured
    /// with. The textures follow `surface`; the quad and its projection follow
    /// the acquired drawable.
    ///
    /// The clock advances whether or not the tick presents. Only fatal
    /// device conditions return `Err`.
    pub fn tick<B>(&mut self, backend: &mut B, surface: TextureExtent) -> Result<TickOutcome, SimError>
    where
        B: GpuBackend<Texture = T>,
    {
        let result = self.run_tick(backend, surface);
        self.clock.advance();

        match &result {
            Ok(TickOutcome::Presented) => {
                self.stats.presented += 1;
                self.stats.consecutive_drops = 0;
            }
            Ok(TickOutcome::Skipped(reason)) => self.record_skip(*reason),
            Err(_) => {}
        }
        result
    }

    fn run_tick<B>(&mut self, backend: &mut B, surface: TextureExtent) -> Result<TickOutcome, SimError>
    where
        B: GpuBackend<Texture = T>,
    {
        if surface.is_empty() {
            return Ok(TickOutcome::Skipped(SkipReason::NoDrawable));
        }

        let needs_alloc = self.resize_pending
            || self.pair.as_ref().is_none_or(|pair| pair.display() != surface);
        if needs_alloc {
            if let Err(err) = self.reallocate(backend, surface) {
                return match err {
                    SimError::Allocation { .. } => {
                        log::warn!("keeping previous pattern textures: {err}");
                        Ok(TickOutcome::Skipped(SkipReason::AllocationFailed))
                    }
                    fatal => Err(fatal),
                };
            }
        }

        let Some(pair) = self.pair.as_ref() else {
            return Ok(TickOutcome::Skipped(SkipReason::AllocationFailed));
        };

        let mut frame = match backend.begin_frame() {
            Ok(frame) => frame,
            Err(err) if err.is_per_frame() => {
                return Ok(TickOutcome::Skipped(SkipReason::NoDrawable));
            }
            Err(err) => return Err(err),
        };

        let target = backend.frame_extent(&frame).unwrap_or(surface);
        if target != surface {
            log::debug!(
                "drawable {}x{} differs from surface {}x{}",
                target.width,
                target.height,
                surface.width,
                surface.height
            );
        }

        let current = pair.get(self.roles.current());
        let inactive = pair.get(self.roles.inactive());

        transfer::before_evolve(backend, &mut frame, self.config.transfer, inactive, current);
        evolve::evolve(backend, &mut frame, inactive, current, self.clock.seed());
        display::render(
            backend,
            &mut frame,
            current,
            Size2D::from(target),
            pair.uv_extent(),
            self.config.background_color,
        );
        backend.present(frame);

        self.roles.swap();
        Ok(TickOutcome::Presented)
    }

    /// Replaces the pair with one sized for `surface`.
    ///
    /// On failure the previous pair and the pending resize are both kept.
    fn reallocate<B>(&mut self, backend: &mut B, surface: TextureExtent) -> Result<(), SimError>
    where
        B: GpuBackend<Texture = T>,
    {
        let generation = self.next_generation;
        let pair = TexturePair::allocate(backend, surface, self.config.block_alignment, generation)?;

        self.next_generation += 1;
        self.roles = BufferRoles::initial();
        transfer::seed_new_pair(backend, &pair, self.config.clear_color);

        let allocated = pair.allocated();
        if let Some(old) = self.pair.replace(pair) {
            log::info!(
                "pattern textures resized {}x{} -> {}x{} (allocated {}x{})",
                old.display().width,
                old.display().height,
                surface.width,
                surface.height,
                allocated.width,
                allocated.height
            );
        }
        self.resize_pending = false;
        Ok(())
    }

    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NoDrawable => self.stats.no_drawable += 1,
            SkipReason::AllocationFailed => self.stats.allocation_failed += 1,
        }
        self.stats.consecutive_drops += 1;

        log::debug!("tick {} skipped: {reason:?}", self.clock.ticks());
        if self.stats.consecutive_drops % DROP_WARN_INTERVAL == 0 {
            log::warn!(
                "{} consecutive ticks dropped ({} total skipped)",
                self.stats.consecutive_drops,
                self.stats.skipped()
            );
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn pair(&self) -> Option<&TexturePair<T>> {
        self.pair.as_ref()
    }

    pub fn roles(&self) -> BufferRoles {
        self.roles
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_pending
    }
}
