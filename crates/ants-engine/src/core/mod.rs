//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and the application. It
//! keeps winit and surface plumbing out of application code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
