//! Quad render stage: puts the current pattern texture on the drawable.

use crate::coords::{ColorRgba, Point2D, Size2D};
use crate::render::QuadGeometry;

use super::backend::GpuBackend;

/// Records the full-surface quad for `texture`.
///
/// `uv_max` restricts sampling to the displayed part of a padded texture.
pub fn render<B: GpuBackend>(
    backend: &mut B,
    frame: &mut B::Frame,
    texture: &B::Texture,
    surface: Size2D,
    uv_max: Point2D,
    clear: ColorRgba,
) {
    let geometry = QuadGeometry::for_surface(surface, uv_max);
    backend.draw_quad(frame, texture, &geometry, clear);
}
