//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, wires them to the GPU
//! layer and paces redraws to the configured frame rate.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
