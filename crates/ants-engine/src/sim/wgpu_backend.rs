//! `GpuBackend` over the window's wgpu device and surface.

use winit::window::Window;

use crate::coords::{ColorRgba, TextureExtent};
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::render::{QuadGeometry, QuadRenderer, RenderCtx, RenderTarget};

use super::backend::GpuBackend;
use super::config::PATTERN_FORMAT;
use super::evolve::{DispatchGrid, EvolvePipeline};
use super::SimError;

/// One texture of the pair plus its default view.
pub struct PatternTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    extent: TextureExtent,
}

/// Pipelines built once at startup; both shaders are validated here.
pub struct SimPipelines {
    evolve: EvolvePipeline,
    quad: QuadRenderer,
}

impl SimPipelines {
    pub fn new(gpu: &Gpu<'_>) -> Result<Self, SimError> {
        if !gpu.supports_storage_format(PATTERN_FORMAT) {
            return Err(SimError::DeviceFatal(format!(
                "adapter cannot write {PATTERN_FORMAT:?} storage textures"
            )));
        }

        Ok(Self {
            evolve: EvolvePipeline::new(gpu.device())?,
            quad: QuadRenderer::new(gpu.device(), gpu.surface_format())?,
        })
    }
}

/// Error captured around `create_texture` -> per-frame allocation failure.
fn check_allocation(extent: TextureExtent, captured: Option<wgpu::Error>) -> Result<(), SimError> {
    match captured {
        None => Ok(()),
        Some(err) => Err(SimError::allocation(extent.width, extent.height, err.to_string())),
    }
}

/// Borrows the GPU for the duration of one tick.
pub struct WgpuBackend<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    pipelines: &'a SimPipelines,
    window: Option<&'a Window>,
}

impl<'a, 'w> WgpuBackend<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, pipelines: &'a SimPipelines) -> Self {
        Self {
            gpu,
            pipelines,
            window: None,
        }
    }

    /// Lets `present` notify the window right before the drawable is queued.
    pub fn with_window(mut self, window: &'a Window) -> Self {
        self.window = Some(window);
        self
    }
}

impl GpuBackend for WgpuBackend<'_, '_> {
    type Texture = PatternTexture;
    type Frame = GpuFrame;

    fn max_texture_dimension(&self) -> u32 {
        self.gpu.max_texture_dimension_2d()
    }

    fn create_texture(
        &mut self,
        extent: TextureExtent,
        label: &'static str,
    ) -> Result<PatternTexture, SimError> {
        if extent.is_empty() {
            return Err(SimError::allocation(extent.width, extent.height, "empty extent"));
        }

        let device = self.gpu.device();
        let oom_scope = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let validation_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent.to_wgpu(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: PATTERN_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let validation = pollster::block_on(validation_scope.pop());
        let oom = pollster::block_on(oom_scope.pop());
        check_allocation(extent, oom.or(validation))?;

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(PatternTexture {
            texture,
            view,
            extent,
        })
    }

    fn texture_extent(&self, texture: &PatternTexture) -> TextureExtent {
        texture.extent
    }

    fn clear_texture(&mut self, texture: &PatternTexture, color: ColorRgba) {
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("ants clear encoder"),
            });

        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ants pattern clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &texture.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
    }

    fn begin_frame(&mut self) -> Result<GpuFrame, SimError> {
        match self.gpu.begin_frame() {
            Ok(frame) => Ok(frame),
            Err(err) => match self.gpu.handle_surface_error(err) {
                SurfaceErrorAction::Fatal => {
                    Err(SimError::DeviceFatal("surface out of memory".into()))
                }
                action => {
                    log::debug!("no drawable this tick ({action:?})");
                    Err(SimError::NoDrawable)
                }
            },
        }
    }

    fn frame_extent(&self, frame: &GpuFrame) -> Option<TextureExtent> {
        Some(frame.extent())
    }

    fn copy_texture(&mut self, frame: &mut GpuFrame, src: &PatternTexture, dst: &PatternTexture) {
        frame.encoder.copy_texture_to_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &src.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyTextureInfo {
                texture: &dst.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            src.extent.to_wgpu(),
        );
    }

    fn dispatch_evolve(
        &mut self,
        frame: &mut GpuFrame,
        read: &PatternTexture,
        write: &PatternTexture,
        seed: f32,
        grid: DispatchGrid,
    ) {
        self.pipelines.evolve.record(
            self.gpu.device(),
            self.gpu.queue(),
            &mut frame.encoder,
            &read.view,
            &write.view,
            seed,
            grid,
        );
    }

    fn draw_quad(
        &mut self,
        frame: &mut GpuFrame,
        texture: &PatternTexture,
        geometry: &QuadGeometry,
        clear: ColorRgba,
    ) {
        let ctx = RenderCtx::from(&*self.gpu);
        let mut target = RenderTarget::from(&mut *frame);
        self.pipelines
            .quad
            .draw(&ctx, &mut target, &texture.view, geometry, clear);
    }

    fn present(&mut self, frame: GpuFrame) {
        if let Some(window) = self.window {
            window.pre_present_notify();
        }
        self.gpu.submit(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_source(msg: &str) -> wgpu::ErrorSource {
        Box::new(std::io::Error::other(msg.to_string()))
    }

    // ── allocation errors ─────────────────────────────────────────────────

    #[test]
    fn no_captured_error_allocates() {
        assert_eq!(check_allocation(TextureExtent::new(64, 64), None), Ok(()));
    }

    #[test]
    fn out_of_memory_becomes_per_frame_allocation_error() {
        let err = check_allocation(
            TextureExtent::new(4096, 2048),
            Some(wgpu::Error::OutOfMemory {
                source: io_source("vram exhausted"),
            }),
        )
        .unwrap_err();

        assert!(err.is_per_frame());
        assert!(matches!(err, SimError::Allocation { width: 4096, height: 2048, .. }));
        assert!(err.to_string().contains("Out of Memory"));
    }

    #[test]
    fn validation_error_keeps_description() {
        let err = check_allocation(
            TextureExtent::new(10, 10),
            Some(wgpu::Error::Validation {
                source: io_source("bad size"),
                description: "texture dimension exceeds limit".into(),
            }),
        )
        .unwrap_err();

        assert!(err.is_per_frame());
        assert!(err.to_string().contains("exceeds limit"));
    }
}
