use crate::coords::TextureExtent;

/// A single acquired drawable plus the encoder recording this tick's work.
///
/// This object is short-lived and must be finalized promptly. Holding the surface
/// texture prevents acquisition of subsequent frames. Dropping it without
/// calling `Gpu::submit` discards the recorded commands and nothing is presented.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Size of the drawable in physical pixels.
    pub fn extent(&self) -> TextureExtent {
        let size = self.surface_texture.texture.size();
        TextureExtent::new(size.width, size.height)
    }
}
