//! Double-buffered pattern simulation and its display.
//!
//! `FrameDriver` owns the texture pair, the buffer roles and the clock, and
//! drives one evolve-and-display tick through a `GpuBackend`.

mod backend;
mod config;
mod display;
mod driver;
mod error;
mod evolve;
mod roles;
mod texture_pair;
mod transfer;
mod wgpu_backend;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::GpuBackend;
pub use config::{
    DEFAULT_TARGET_FPS, PATTERN_FORMAT, SimConfig, TEXTURE_BLOCK_ALIGNMENT, TransferStrategy,
    WORKGROUP_SIZE,
};
pub use driver::{FrameDriver, SkipReason, TickOutcome, TickStats};
pub use error::SimError;
pub use evolve::{DispatchGrid, EVOLVE_ENTRY_POINT, EvolvePipeline, evolve};
pub use roles::{BufferRoles, Slot};
pub use texture_pair::TexturePair;
pub use wgpu_backend::{PatternTexture, SimPipelines, WgpuBackend};
