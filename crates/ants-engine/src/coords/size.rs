use super::TextureExtent;

/// Width/height in pixels.
///
/// Negative inputs are clamped to zero, so extents are always non-negative.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Size2D {
    pub width: f32,
    pub height: f32,
}

impl Size2D {
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        !self.is_empty() && self.width.is_finite() && self.height.is_finite()
    }
}

impl From<TextureExtent> for Size2D {
    fn from(extent: TextureExtent) -> Self {
        Size2D::new(extent.width as f32, extent.height as f32)
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Size2D {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Size2D::new(size.width as f32, size.height as f32)
    }
}
