//! CommandList trait - for recording rendering commands

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{Buffer, Framebuffer, Pipeline, ResourceSet};

/// Command list for recording rendering commands
///
/// Commands are recorded and later submitted via GraphicsDevice::submit()
pub trait CommandList: Send + Sync {
    /// Begin recording commands
    fn begin(&mut self) -> Result<()>;

    /// End recording commands
    fn end(&mut self) -> Result<()>;

    /// Record a partial buffer upload at byte `offset`
    fn update_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, data: &[u8]) -> Result<()>;

    /// Select the render output
    fn set_framebuffer(&mut self, framebuffer: &Arc<dyn Framebuffer>) -> Result<()>;

    /// Bind a graphics pipeline
    fn set_pipeline(&mut self, pipeline: &Arc<dyn Pipeline>) -> Result<()>;

    /// Attach a resource set at `slot`
    fn set_resource_set(&mut self, slot: u32, resource_set: &Arc<dyn ResourceSet>) -> Result<()>;

    /// Clear one color target of the current framebuffer
    fn clear_color_target(&mut self, index: u32, color: [f32; 4]) -> Result<()>;

    /// Clear the depth target of the current framebuffer
    fn clear_depth_stencil(&mut self, depth: f32) -> Result<()>;
}
