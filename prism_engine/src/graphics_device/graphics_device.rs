//! GraphicsDevice trait - factory for every backend object the engine uses
//!
//! Backends (Vulkan, Direct3D 12, ...) implement this trait. The engine only
//! holds trait objects, so the shader subsystem never sees backend types.

use std::sync::{Arc, Mutex, MutexGuard};
use crate::engine_err;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, Texture, TextureDesc, Sampler, SamplerDesc,
    Shader, ShaderDesc, ResourceLayout, ResourceLayoutDesc,
    ResourceSet, ResourceSetDesc, Pipeline, PipelineDesc, CommandList,
};

/// Main graphics device trait
pub trait GraphicsDevice: Send + Sync {
    /// Create a GPU buffer of `desc.size` bytes
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a texture
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a sampler
    fn create_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<dyn Sampler>>;

    /// Compile a shader stage
    ///
    /// # Errors
    ///
    /// `Error::ShaderCompilation` when the source does not compile.
    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>>;

    /// Create a resource layout from an ordered binding list
    fn create_resource_layout(&mut self, desc: ResourceLayoutDesc) -> Result<Arc<dyn ResourceLayout>>;

    /// Create a resource set from a layout and its resources
    fn create_resource_set(&mut self, desc: ResourceSetDesc) -> Result<Arc<dyn ResourceSet>>;

    /// Create a graphics pipeline
    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>>;

    /// Create a command list for recording
    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>>;

    /// Submit recorded command lists
    fn submit(&mut self, commands: &[&dyn CommandList]) -> Result<()>;
}

/// Lock a shared device, turning a poisoned lock into an engine error
pub fn lock_device(device: &Arc<Mutex<dyn GraphicsDevice>>) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device.lock()
        .map_err(|_| engine_err!("prism::GraphicsDevice", "Graphics device lock poisoned"))
}
