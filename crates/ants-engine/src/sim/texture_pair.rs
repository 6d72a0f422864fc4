use crate::coords::{Point2D, TextureExtent};

use super::backend::GpuBackend;
use super::roles::Slot;
use super::SimError;

/// Exactly two equally sized pattern textures.
///
/// A pair is never resized in place: a new pair is allocated and the old one
/// dropped, so no stage can observe a texture of the previous size.
pub struct TexturePair<T> {
    textures: [T; 2],
    /// Size actually allocated (display size rounded up to the block alignment).
    allocated: TextureExtent,
    /// Size requested by the surface.
    display: TextureExtent,
    generation: u64,
}

impl<T> TexturePair<T> {
    /// Allocates both textures for a `display`-sized surface.
    ///
    /// Both creations must succeed before a pair is returned; on error nothing
    /// is retained and the caller keeps its previous pair.
    pub fn allocate<B>(
        backend: &mut B,
        display: TextureExtent,
        alignment: u32,
        generation: u64,
    ) -> Result<Self, SimError>
    where
        B: GpuBackend<Texture = T>,
    {
        if display.is_empty() {
            return Err(SimError::allocation(
                display.width,
                display.height,
                "dimensions must be positive",
            ));
        }

        let allocated = display.aligned_to(alignment).ok_or_else(|| {
            SimError::allocation(display.width, display.height, "aligned size overflows u32")
        })?;

        let max = backend.max_texture_dimension();
        if allocated.width > max || allocated.height > max {
            return Err(SimError::allocation(
                allocated.width,
                allocated.height,
                format!("exceeds device limit of {max}"),
            ));
        }

        let a = backend.create_texture(allocated, "ants pattern A")?;
        let b = backend.create_texture(allocated, "ants pattern B")?;

        log::debug!(
            "allocated pattern pair #{generation}: display {}x{}, allocated {}x{}",
            display.width,
            display.height,
            allocated.width,
            allocated.height
        );

        Ok(Self {
            textures: [a, b],
            allocated,
            display,
            generation,
        })
    }

    #[inline]
    pub fn get(&self, slot: Slot) -> &T {
        &self.textures[slot.index()]
    }

    #[inline]
    pub fn allocated(&self) -> TextureExtent {
        self.allocated
    }

    #[inline]
    pub fn display(&self) -> TextureExtent {
        self.display
    }

    /// Allocation counter; increases by one per successful resize.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Texture coordinate of the display area's bottom-right corner.
    pub fn uv_extent(&self) -> Point2D {
        Point2D::new(
            self.display.width as f32 / self.allocated.width as f32,
            self.display.height as f32 / self.allocated.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testing::CpuBackend;

    // ── sizing ────────────────────────────────────────────────────────────

    #[test]
    fn both_textures_cover_the_surface() {
        let mut backend = CpuBackend::new();
        for (w, h) in [(1, 1), (2, 3), (100, 100), (257, 31), (1920, 1080)] {
            for alignment in [1, 16] {
                let display = TextureExtent::new(w, h);
                let pair = TexturePair::allocate(&mut backend, display, alignment, 0).unwrap();
                let a = backend.texture_extent(pair.get(Slot::A));
                let b = backend.texture_extent(pair.get(Slot::B));
                assert!(a.covers(display), "{a:?} < {display:?}");
                assert_eq!(a, b);
                assert_eq!(a, pair.allocated());
                assert_eq!(pair.display(), display);
            }
        }
    }

    #[test]
    fn alignment_one_allocates_exactly() {
        let mut backend = CpuBackend::new();
        let pair = TexturePair::allocate(&mut backend, TextureExtent::new(101, 37), 1, 0).unwrap();
        assert_eq!(pair.allocated(), TextureExtent::new(101, 37));
        assert_eq!(pair.uv_extent(), Point2D::new(1.0, 1.0));
    }

    #[test]
    fn padding_is_excluded_from_uv_extent() {
        let mut backend = CpuBackend::new();
        let pair = TexturePair::allocate(&mut backend, TextureExtent::new(100, 64), 16, 0).unwrap();
        assert_eq!(pair.allocated(), TextureExtent::new(112, 64));
        assert_eq!(pair.uv_extent(), Point2D::new(100.0 / 112.0, 1.0));
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn zero_size_is_rejected() {
        let mut backend = CpuBackend::new();
        let err = TexturePair::allocate(&mut backend, TextureExtent::new(0, 10), 1, 0).err();
        assert!(matches!(err, Some(SimError::Allocation { width: 0, .. })));
        assert_eq!(backend.live_textures(), 0);
    }

    #[test]
    fn over_limit_is_rejected_before_creation() {
        let mut backend = CpuBackend::new();
        backend.max_dimension = 64;
        let err = TexturePair::allocate(&mut backend, TextureExtent::new(60, 60), 16, 0).err();
        // 60 rounds up to 64, which fits.
        assert!(err.is_none());
        let err = TexturePair::allocate(&mut backend, TextureExtent::new(65, 10), 16, 0).err();
        assert!(matches!(err, Some(SimError::Allocation { width: 80, .. })));
    }

    #[test]
    fn second_creation_failure_releases_first_texture() {
        let mut backend = CpuBackend::new();
        backend.fail_allocation_after(1);
        let result = TexturePair::allocate(&mut backend, TextureExtent::new(8, 8), 1, 0);
        assert!(result.is_err());
        assert_eq!(backend.live_textures(), 0);
    }
}
