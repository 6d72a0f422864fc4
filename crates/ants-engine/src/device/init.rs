/// Parameters for adapter, device and surface creation.
///
/// The simulation needs no optional wgpu features; storage writes to
/// `Rgba8Unorm` are core functionality.
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub power_preference: wgpu::PowerPreference,

    /// Pick an sRGB surface format if the surface offers one.
    pub prefer_srgb: bool,

    /// Swap behavior. Frame pacing is done by the runtime, so FIFO is enough.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; unsupported requests fall back to the surface's first mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Device limits. `max_texture_dimension_2d` bounds the pattern textures.
    pub limits: wgpu::Limits,

    /// Frames queued ahead of presentation (a hint; backends may ignore it).
    pub frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            limits: wgpu::Limits::default(),
            frame_latency: 2,
        }
    }
}
