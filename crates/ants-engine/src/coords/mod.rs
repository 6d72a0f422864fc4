//! Coordinate and geometry types shared by the simulation and the quad renderer.
//!
//! Canonical CPU space:
//! - Physical pixels of the drawable
//! - Origin top-left
//! - +X right, +Y down
//!
//! The quad renderer converts to clip space with an orthographic projection
//! built from the surface size (see `render::projection`).

mod color;
mod extent;
mod point;
mod rect;
mod size;

pub use color::ColorRgba;
pub use extent::TextureExtent;
pub use point::Point2D;
pub use rect::Rect2D;
pub use size::Size2D;
