//! GPU rendering subsystem.
//!
//! Presents the pattern texture as a single full-surface textured quad.
//!
//! Convention:
//! - CPU geometry is in physical pixels (top-left origin, +Y down).
//! - The vertex shader converts to clip space with `projection::ortho_projection`.

mod ctx;
pub mod projection;
pub mod quad;
pub mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use projection::{ortho_projection, screen_projection, Z_FAR, Z_NEAR};
pub use quad::{QuadGeometry, QuadRenderer, QuadVertex};
