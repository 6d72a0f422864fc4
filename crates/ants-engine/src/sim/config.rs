use std::fmt;
use std::str::FromStr;

use crate::coords::ColorRgba;

/// Pixel format of both pattern textures.
///
/// `Rgba8Unorm` is write-only storage capable on every wgpu backend.
pub const PATTERN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Workgroup size of the evolution kernel; must match `@workgroup_size` in `ants.wgsl`.
pub const WORKGROUP_SIZE: [u32; 2] = [16, 16];

/// Default block alignment of allocated textures, in texels.
///
/// Allocated sizes are rounded up to a multiple of this value so resizes by a
/// few pixels do not change the dispatch tiling. The displayed area is tracked
/// separately and never includes the padding.
pub const TEXTURE_BLOCK_ALIGNMENT: u32 = 16;

pub const DEFAULT_TARGET_FPS: u32 = 30;

/// How the previous frame reaches the next frame's read buffer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TransferStrategy {
    /// Read inactive, write current, swap roles. The inactive texture is
    /// cleared once after every allocation.
    #[default]
    PingPong,
    /// Legacy path: blit inactive into current before every dispatch.
    Copy,
}

impl fmt::Display for TransferStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransferStrategy::PingPong => "ping-pong",
            TransferStrategy::Copy => "copy",
        })
    }
}

impl FromStr for TransferStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ping-pong" | "pingpong" => Ok(TransferStrategy::PingPong),
            "copy" => Ok(TransferStrategy::Copy),
            other => Err(format!("unknown transfer strategy `{other}` (expected `ping-pong` or `copy`)")),
        }
    }
}

/// Simulation configuration.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Ticks per second; the clock advances by `1 / target_fps` per tick.
    pub target_fps: u32,
    pub transfer: TransferStrategy,
    /// Allocated texture sides are rounded up to a multiple of this. `1` disables padding.
    pub block_alignment: u32,
    /// Base state written into both pattern textures after allocation.
    pub clear_color: ColorRgba,
    /// Drawable clear color behind the quad.
    pub background_color: ColorRgba,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            transfer: TransferStrategy::default(),
            block_alignment: TEXTURE_BLOCK_ALIGNMENT,
            clear_color: ColorRgba::black(),
            background_color: ColorRgba::white(),
        }
    }
}
