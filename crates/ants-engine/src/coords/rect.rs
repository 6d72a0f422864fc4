use super::{Point2D, Size2D};

/// Axis-aligned rectangle in pixels (top-left origin, +Y down).
///
/// `Size2D` clamps negative extents, so `max_x >= min_x` and `max_y >= min_y`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect2D {
    pub origin: Point2D,
    pub size: Size2D,
}

impl Rect2D {
    #[inline]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Point2D::new(x, y),
            size: Size2D::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Point2D, size: Size2D) -> Self {
        Self { origin, size }
    }

    /// Rectangle spanning `(0, 0)` to `(size.width, size.height)`.
    #[inline]
    pub const fn from_size(size: Size2D) -> Self {
        Self {
            origin: Point2D::zero(),
            size,
        }
    }

    #[inline]
    pub fn min_x(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn min_y(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.height
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.is_empty()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.width.is_finite() && self.size.height.is_finite()
    }

    /// Corners in triangle-strip order: top-left, bottom-left, top-right, bottom-right.
    ///
    /// With +Y down this strip winds counter-clockwise on screen.
    pub fn strip_corners(self) -> [Point2D; 4] {
        [
            Point2D::new(self.min_x(), self.min_y()),
            Point2D::new(self.min_x(), self.max_y()),
            Point2D::new(self.max_x(), self.min_y()),
            Point2D::new(self.max_x(), self.max_y()),
        ]
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Point2D) -> bool {
        p.x >= self.min_x() && p.y >= self.min_y() && p.x < self.max_x() && p.y < self.max_y()
    }
}
