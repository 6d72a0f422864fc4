use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::coords::{ColorRgba, Point2D, Rect2D, Size2D};
use crate::sim::SimError;

use super::projection::screen_projection;
use super::shader::create_validated_module;
use super::{RenderCtx, RenderTarget};

pub(crate) const QUAD_WGSL: &str = include_str!("shaders/textured_quad.wgsl");

// ── vertex ────────────────────────────────────────────────────────────────

/// One corner of the screen quad: pixel position + texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // screen position
        1 => Float32x2  // texture coordinate
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const _: () = assert!(std::mem::size_of::<QuadVertex>() == 16);

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ProjectionUniform {
    matrix: [[f32; 4]; 4],
}

// ── geometry ──────────────────────────────────────────────────────────────

/// CPU-side data for one quad draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadGeometry {
    /// Top-left, bottom-left, top-right, bottom-right; drawn as a triangle strip.
    pub vertices: [QuadVertex; 4],
    pub projection: Mat4,
}

impl QuadGeometry {
    /// Quad covering `(0, 0)..(surface.width, surface.height)`.
    ///
    /// `uv_max` is the largest texture coordinate sampled; it is below `1.0`
    /// when the texture was padded past the displayed size.
    pub fn for_surface(surface: Size2D, uv_max: Point2D) -> Self {
        let corners = Rect2D::from_size(surface).strip_corners();
        let uvs = [
            [0.0, 0.0],
            [0.0, uv_max.y],
            [uv_max.x, 0.0],
            [uv_max.x, uv_max.y],
        ];

        let mut vertices = [QuadVertex::zeroed(); 4];
        for (v, (corner, uv)) in vertices.iter_mut().zip(corners.iter().zip(uvs)) {
            *v = QuadVertex {
                position: corner.to_array(),
                tex_coord: uv,
            };
        }

        Self {
            vertices,
            projection: screen_projection(surface),
        }
    }

    pub const VERTEX_COUNT: u32 = 4;
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Draws one textured quad over the whole drawable.
///
/// The pipeline is built eagerly so a broken shader fails at startup. Vertex
/// and projection buffers are rewritten every draw; the bind group is rebuilt
/// per draw because the sampled texture alternates between the pair.
pub struct QuadRenderer {
    pipeline_format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    projection_ubo: wgpu::Buffer,
}

impl QuadRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Result<Self, SimError> {
        let shader = create_validated_module(device, "ants quad shader", QUAD_WGSL, &["vs_main", "fs_main"])?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ants quad bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ProjectionUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ants quad pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ants quad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Nearest filtering keeps single-pixel cells crisp.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ants quad sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ants quad vbo"),
            size: std::mem::size_of::<[QuadVertex; 4]>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let projection_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ants quad projection ubo"),
            size: std::mem::size_of::<ProjectionUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            pipeline_format: surface_format,
            pipeline,
            bind_group_layout,
            sampler,
            vertex_buffer,
            projection_ubo,
        })
    }

    /// Clears `target` to `clear` and draws `texture` over it as a 4-vertex strip.
    pub fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        texture: &wgpu::TextureView,
        geometry: &QuadGeometry,
        clear: ColorRgba,
    ) {
        debug_assert_eq!(ctx.format, self.pipeline_format);

        let uniform = ProjectionUniform {
            matrix: geometry.projection.to_cols_array_2d(),
        };
        ctx.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&geometry.vertices));
        ctx.queue
            .write_buffer(&self.projection_ubo, 0, bytemuck::bytes_of(&uniform));

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ants quad bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.projection_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ants quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..QuadGeometry::VERTEX_COUNT, 0..1);
    }
}
