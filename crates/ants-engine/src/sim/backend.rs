use crate::coords::{ColorRgba, TextureExtent};
use crate::render::QuadGeometry;

use super::evolve::DispatchGrid;
use super::SimError;

/// GPU operations the frame driver needs, injected per tick.
///
/// Commands recorded into a `Frame` execute in recording order when the frame
/// is presented; `clear_texture` is submitted on its own immediately. A frame
/// dropped without `present` has no effect.
pub trait GpuBackend {
    type Texture;
    type Frame;

    /// Largest texture side `create_texture` accepts.
    fn max_texture_dimension(&self) -> u32;

    /// Creates one pattern texture in `PATTERN_FORMAT`. Contents are undefined
    /// until cleared or written.
    fn create_texture(
        &mut self,
        extent: TextureExtent,
        label: &'static str,
    ) -> Result<Self::Texture, SimError>;

    fn texture_extent(&self, texture: &Self::Texture) -> TextureExtent;

    /// Fills `texture` with `color` and submits right away.
    fn clear_texture(&mut self, texture: &Self::Texture, color: ColorRgba);

    /// Acquires a drawable. `Err(SimError::NoDrawable)` drops the tick.
    fn begin_frame(&mut self) -> Result<Self::Frame, SimError>;

    /// Size of the acquired drawable, when the backend tracks it.
    fn frame_extent(&self, frame: &Self::Frame) -> Option<TextureExtent>;

    /// Full-extent GPU-side copy `src -> dst`.
    fn copy_texture(&mut self, frame: &mut Self::Frame, src: &Self::Texture, dst: &Self::Texture);

    /// Runs the evolution kernel over `grid`.
    fn dispatch_evolve(
        &mut self,
        frame: &mut Self::Frame,
        read: &Self::Texture,
        write: &Self::Texture,
        seed: f32,
        grid: DispatchGrid,
    );

    /// Clears the drawable and draws `texture` as a textured quad.
    fn draw_quad(
        &mut self,
        frame: &mut Self::Frame,
        texture: &Self::Texture,
        geometry: &QuadGeometry,
        clear: ColorRgba,
    );

    /// Submits the recorded work and presents the drawable.
    fn present(&mut self, frame: Self::Frame);
}
