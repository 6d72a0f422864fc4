//! Compute evolution stage.
//!
//! The kernel runs one invocation per 2×2 texel block: work-item `(x, y)`
//! owns texels `(2x..2x+2, 2y..2y+2)`. The dispatch therefore spans only the
//! top-left quadrant of invocation space while every texel of the write
//! texture is updated. Halving the grid without the matching `* 2` in the
//! kernel would leave three quadrants frozen.

use bytemuck::{Pod, Zeroable};

use crate::coords::TextureExtent;
use crate::render::shader::create_validated_module;

use super::backend::GpuBackend;
use super::config::{PATTERN_FORMAT, WORKGROUP_SIZE};
use super::SimError;

pub(crate) const ANTS_WGSL: &str = include_str!("shaders/ants.wgsl");
pub const EVOLVE_ENTRY_POINT: &str = "evolve_main";

// ── dispatch geometry ─────────────────────────────────────────────────────

/// Work-item and workgroup counts for one evolution dispatch.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DispatchGrid {
    /// Invocations that do work: `(width / 2, height / 2)`, truncated.
    pub work_items: [u32; 2],
    /// Workgroups dispatched: `ceil(work_items / WORKGROUP_SIZE)` per axis.
    pub groups: [u32; 2],
}

impl DispatchGrid {
    pub fn for_extent(extent: TextureExtent) -> Self {
        let work_items = [extent.width / 2, extent.height / 2];
        Self {
            work_items,
            groups: [
                work_items[0].div_ceil(WORKGROUP_SIZE[0]),
                work_items[1].div_ceil(WORKGROUP_SIZE[1]),
            ],
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.work_items[0] == 0 || self.work_items[1] == 0
    }

    /// Texels written by one dispatch, starting at the origin.
    ///
    /// For odd extents the last column/row falls outside this area and keeps
    /// its previous contents for the tick.
    #[inline]
    pub fn covered(self) -> TextureExtent {
        TextureExtent::new(self.work_items[0] * 2, self.work_items[1] * 2)
    }

    /// Invocations launched, including the ones the kernel bounds-checks away.
    #[inline]
    pub fn launched(self) -> [u32; 2] {
        [
            self.groups[0] * WORKGROUP_SIZE[0],
            self.groups[1] * WORKGROUP_SIZE[1],
        ]
    }
}

/// Records one evolution step: reads `read`, writes `write`.
///
/// Returns the grid that was dispatched, or `None` if the texture is too small
/// to contain a single 2×2 block.
pub fn evolve<B: GpuBackend>(
    backend: &mut B,
    frame: &mut B::Frame,
    read: &B::Texture,
    write: &B::Texture,
    seed: f32,
) -> Option<DispatchGrid> {
    let grid = DispatchGrid::for_extent(backend.texture_extent(write));
    if grid.is_empty() {
        log::trace!("evolve skipped: texture smaller than one 2x2 block");
        return None;
    }

    backend.dispatch_evolve(frame, read, write, seed, grid);
    Some(grid)
}

// ── wgpu pipeline ─────────────────────────────────────────────────────────

/// Must match `EvolveParams` in `ants.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct EvolveUniform {
    seed: f32,
    _pad: [f32; 3], // 16-byte uniform size
}

/// Compute pipeline and per-dispatch resources for the evolution kernel.
///
/// bindings:
/// - 0: `EvolveUniform` (seed)
/// - 1: read texture, `texture_2d<f32>`
/// - 2: write texture, `texture_storage_2d<rgba8unorm, write>`
pub struct EvolvePipeline {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buf: wgpu::Buffer,
}

impl EvolvePipeline {
    pub fn new(device: &wgpu::Device) -> Result<Self, SimError> {
        let module =
            create_validated_module(device, "ants evolve kernel", ANTS_WGSL, &[EVOLVE_ENTRY_POINT])?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ants evolve bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<EvolveUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: PATTERN_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ants evolve pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("ants evolve pipeline"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some(EVOLVE_ENTRY_POINT),
            compilation_options: Default::default(),
            cache: None,
        });

        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ants evolve uniforms"),
            size: std::mem::size_of::<EvolveUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            pipeline,
            bind_group_layout,
            uniform_buf,
        })
    }

    /// Uploads the seed and records the compute pass into `encoder`.
    pub fn record(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        read: &wgpu::TextureView,
        write: &wgpu::TextureView,
        seed: f32,
        grid: DispatchGrid,
    ) {
        let uniform = EvolveUniform { seed, _pad: [0.0; 3] };
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&uniform));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ants evolve bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buf.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(read),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(write),
                },
            ],
        });

        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("ants evolve pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(grid.groups[0], grid.groups[1], 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shader::{has_entry_point, validate_wgsl};

    // ── grid ──────────────────────────────────────────────────────────────

    #[test]
    fn square_256_dispatches_8x8_groups() {
        let g = DispatchGrid::for_extent(TextureExtent::new(256, 256));
        assert_eq!(g.work_items, [128, 128]);
        assert_eq!(g.groups, [8, 8]);
        assert_eq!(g.launched(), [128, 128]);
        assert_eq!(g.covered(), TextureExtent::new(256, 256));
    }

    #[test]
    fn partial_groups_round_up() {
        let g = DispatchGrid::for_extent(TextureExtent::new(100, 100));
        assert_eq!(g.work_items, [50, 50]);
        assert_eq!(g.groups, [4, 4]);
        assert!(g.launched()[0] >= g.work_items[0]);
    }

    #[test]
    fn odd_extent_leaves_last_row_and_column() {
        let g = DispatchGrid::for_extent(TextureExtent::new(101, 37));
        assert_eq!(g.work_items, [50, 18]);
        assert_eq!(g.covered(), TextureExtent::new(100, 36));
    }

    #[test]
    fn one_texel_wide_is_empty() {
        assert!(DispatchGrid::for_extent(TextureExtent::new(1, 500)).is_empty());
        assert!(!DispatchGrid::for_extent(TextureExtent::new(2, 2)).is_empty());
    }

    #[test]
    fn uniform_is_16_bytes() {
        assert_eq!(std::mem::size_of::<EvolveUniform>(), 16);
    }

    // ── kernel ────────────────────────────────────────────────────────────

    #[test]
    fn kernel_is_valid_wgsl() {
        let module = validate_wgsl("ants", ANTS_WGSL).unwrap();
        assert!(has_entry_point(&module, EVOLVE_ENTRY_POINT));
    }

    #[test]
    fn kernel_workgroup_size_matches_dispatch_constant() {
        let module = validate_wgsl("ants", ANTS_WGSL).unwrap();
        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.name == EVOLVE_ENTRY_POINT)
            .unwrap();
        assert_eq!(ep.workgroup_size, [WORKGROUP_SIZE[0], WORKGROUP_SIZE[1], 1]);
    }
}
