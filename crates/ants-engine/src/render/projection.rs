//! Screen-space orthographic projection.

use glam::{Mat4, Vec4};

use crate::coords::{Point2D, Size2D};

/// Near plane of the 2D projection. Depth is unused by the quad.
pub const Z_NEAR: f32 = 0.0;
/// Far plane of the 2D projection.
pub const Z_FAR: f32 = 1.0;

/// Right-handed off-center orthographic projection for a `w × h` pixel space
/// with the origin at the top-left and +Y down.
///
/// Columns:
///
/// ```text
/// ( 2/w,  0,    0,          0 )
/// ( 0,   -2/h,  0,          0 )
/// ( 0,    0,    1/(zn-zf),  0 )
/// (-1,    1,    zn/(zn-zf), 1 )
/// ```
///
/// Pixel `(0, 0)` maps to clip `(-1, 1)` and `(w, h)` to `(1, -1)`.
pub fn ortho_projection(w: f32, h: f32, zn: f32, zf: f32) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(2.0 / w, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -2.0 / h, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0 / (zn - zf), 0.0),
        Vec4::new(-1.0, 1.0, zn / (zn - zf), 1.0),
    )
}

/// Projection for the drawable. Degenerate sizes are clamped to one pixel so
/// the matrix stays finite.
pub fn screen_projection(surface: Size2D) -> Mat4 {
    ortho_projection(surface.width.max(1.0), surface.height.max(1.0), Z_NEAR, Z_FAR)
}

/// Transforms a pixel-space point (z = 0) to clip space.
#[inline]
pub fn project(m: Mat4, p: Point2D) -> Vec4 {
    m * Vec4::new(p.x, p.y, 0.0, 1.0)
}
