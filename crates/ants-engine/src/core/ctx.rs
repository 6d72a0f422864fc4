use winit::window::Window;

use crate::coords::TextureExtent;
use crate::device::Gpu;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
}

impl FrameCtx<'_, '_> {
    /// Size the surface was last resized to, in physical pixels; zero while
    /// minimized. Lags `window.inner_size()` until the `Resized` event is
    /// handled, so it always matches the configured surface.
    pub fn surface_extent(&self) -> TextureExtent {
        TextureExtent::from(self.gpu.size())
    }
}
