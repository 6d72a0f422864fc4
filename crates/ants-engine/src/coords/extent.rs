/// Integer texel extent used for texture allocation and compute dispatch.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct TextureExtent {
    pub width: u32,
    pub height: u32,
}

impl TextureExtent {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Rounds both dimensions up to the next multiple of `alignment`.
    ///
    /// An alignment of `0` or `1` leaves the extent unchanged. Returns `None`
    /// if rounding would overflow `u32`.
    pub fn aligned_to(self, alignment: u32) -> Option<Self> {
        if alignment <= 1 {
            return Some(self);
        }
        Some(Self {
            width: self.width.checked_next_multiple_of(alignment)?,
            height: self.height.checked_next_multiple_of(alignment)?,
        })
    }

    /// Returns `true` if `self` covers `other` on both axes.
    #[inline]
    pub const fn covers(self, other: TextureExtent) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for TextureExtent {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        TextureExtent::new(size.width, size.height)
    }
}
