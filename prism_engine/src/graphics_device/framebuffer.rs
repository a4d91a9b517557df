//! Framebuffer trait - render output with color and optional depth targets

use std::sync::Arc;
use crate::graphics_device::Texture;

/// Render target a pipeline draws into
pub trait Framebuffer: Send + Sync {
    /// Number of color targets
    fn color_target_count(&self) -> u32;

    /// Color target texture at `index`
    fn color_target(&self, index: u32) -> Option<Arc<dyn Texture>>;

    /// Depth target texture, if any
    fn depth_target(&self) -> Option<Arc<dyn Texture>>;

    /// Release the target textures. Idempotent.
    fn dispose(&self);

    fn is_disposed(&self) -> bool;
}
