use crate::device::{Gpu, GpuFrame};

/// Device/queue borrow plus the format of the surface being drawn.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub format: wgpu::TextureFormat,
}

impl<'a> From<&'a Gpu<'_>> for RenderCtx<'a> {
    fn from(gpu: &'a Gpu<'_>) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            format: gpu.surface_format(),
        }
    }
}

/// Encoder and color attachment a pass records into.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
}

impl<'a> From<&'a mut GpuFrame> for RenderTarget<'a> {
    fn from(frame: &'a mut GpuFrame) -> Self {
        Self {
            encoder: &mut frame.encoder,
            view: &frame.view,
        }
    }
}
