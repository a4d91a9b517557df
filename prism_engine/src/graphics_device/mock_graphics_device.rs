//! Mock GraphicsDevice for unit tests (no GPU required)
//!
//! Every created object is recorded by name in shared vectors so tests can
//! count backend work after handing the device to the code under test.
//! Shader sources containing `#error` fail to compile.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::engine_bail;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, Buffer, BufferDesc, Texture, TextureDesc, TextureInfo, TextureFormat,
    Sampler, SamplerDesc, Shader, ShaderDesc, ShaderStage,
    ResourceLayout, ResourceLayoutDesc, ResourceSet, ResourceSetDesc, ResourceKind,
    Pipeline, PipelineDesc, PipelineState, CommandList, Framebuffer,
};

/// Marker that makes MockGraphicsDevice::create_shader fail
pub const COMPILE_ERROR_MARKER: &str = "#error";

/// Shared list of recorded names
pub type Record = Arc<Mutex<Vec<String>>>;

fn record() -> Record {
    Arc::new(Mutex::new(Vec::new()))
}

// ============================================================================
// Mock Buffer
// ============================================================================

/// One direct `Buffer::update` call
#[derive(Debug, Clone, PartialEq)]
pub struct BufferWrite {
    pub buffer: String,
    pub offset: u64,
    pub data: Vec<u8>,
}

pub struct MockBuffer {
    pub name: String,
    pub size: u64,
    writes: Arc<Mutex<Vec<BufferWrite>>>,
}

impl MockBuffer {
    pub fn new(name: String, size: u64) -> Self {
        Self { name, size, writes: Arc::new(Mutex::new(Vec::new())) }
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if offset + data.len() as u64 > self.size {
            engine_bail!("prism::mock",
                "Buffer '{}' write out of bounds: {} + {} > {}", self.name, offset, data.len(), self.size);
        }
        self.writes.lock().unwrap().push(BufferWrite {
            buffer: self.name.clone(),
            offset,
            data: data.to_vec(),
        });
        Ok(())
    }
}

// ============================================================================
// Mock Texture / Sampler
// ============================================================================

pub struct MockTexture {
    pub name: String,
    pub info: TextureInfo,
}

impl MockTexture {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            info: TextureInfo { width, height, format: TextureFormat::R8G8B8A8_UNORM },
        }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

pub struct MockSampler {
    pub desc: SamplerDesc,
}

impl Sampler for MockSampler {
    fn desc(&self) -> &SamplerDesc {
        &self.desc
    }
}

// ============================================================================
// Mock Shader / Layout / Set / Pipeline
// ============================================================================

pub struct MockShader {
    pub name: String,
    pub stage: ShaderStage,
}

impl Shader for MockShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn stage(&self) -> ShaderStage {
        self.stage
    }
}

pub struct MockResourceLayout {
    pub desc: ResourceLayoutDesc,
}

impl ResourceLayout for MockResourceLayout {
    fn desc(&self) -> &ResourceLayoutDesc {
        &self.desc
    }
}

pub struct MockResourceSet {
    pub kinds: Vec<ResourceKind>,
}

impl ResourceSet for MockResourceSet {
    fn binding_count(&self) -> usize {
        self.kinds.len()
    }
}

pub struct MockPipeline {
    pub name: String,
    pub state: PipelineState,
}

impl Pipeline for MockPipeline {
    fn state(&self) -> &PipelineState {
        &self.state
    }
}

// ============================================================================
// Mock Framebuffer
// ============================================================================

pub struct MockFramebuffer {
    pub color_targets: Vec<Arc<dyn Texture>>,
    pub depth: Option<Arc<dyn Texture>>,
    disposed: AtomicBool,
}

impl MockFramebuffer {
    pub fn new(color_count: u32, with_depth: bool) -> Self {
        let color_targets = (0..color_count)
            .map(|i| Arc::new(MockTexture::new(&format!("color{}", i), 64, 64)) as Arc<dyn Texture>)
            .collect();
        let depth = with_depth.then(|| Arc::new(MockTexture::new("depth", 64, 64)) as Arc<dyn Texture>);
        Self { color_targets, depth, disposed: AtomicBool::new(false) }
    }
}

impl Framebuffer for MockFramebuffer {
    fn color_target_count(&self) -> u32 {
        self.color_targets.len() as u32
    }

    fn color_target(&self, index: u32) -> Option<Arc<dyn Texture>> {
        self.color_targets.get(index as usize).cloned()
    }

    fn depth_target(&self) -> Option<Arc<dyn Texture>> {
        self.depth.clone()
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Mock Command List
// ============================================================================

pub struct MockCommandList {
    pub commands: Vec<String>,
    /// Data recorded by update_buffer, in call order
    pub uploads: Vec<(u64, Vec<u8>)>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self { commands: Vec::new(), uploads: Vec::new() }
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.commands.push("begin".to_string());
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.commands.push("end".to_string());
        Ok(())
    }

    fn update_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, data: &[u8]) -> Result<()> {
        if offset + data.len() as u64 > buffer.size() {
            return Err(Error::BackendError("update_buffer out of bounds".to_string()));
        }
        self.commands.push(format!("update_buffer:{}:{}", offset, data.len()));
        self.uploads.push((offset, data.to_vec()));
        Ok(())
    }

    fn set_framebuffer(&mut self, _framebuffer: &Arc<dyn Framebuffer>) -> Result<()> {
        self.commands.push("set_framebuffer".to_string());
        Ok(())
    }

    fn set_pipeline(&mut self, _pipeline: &Arc<dyn Pipeline>) -> Result<()> {
        self.commands.push("set_pipeline".to_string());
        Ok(())
    }

    fn set_resource_set(&mut self, slot: u32, _resource_set: &Arc<dyn ResourceSet>) -> Result<()> {
        self.commands.push(format!("set_resource_set:{}", slot));
        Ok(())
    }

    fn clear_color_target(&mut self, index: u32, _color: [f32; 4]) -> Result<()> {
        self.commands.push(format!("clear_color:{}", index));
        Ok(())
    }

    fn clear_depth_stencil(&mut self, depth: f32) -> Result<()> {
        self.commands.push(format!("clear_depth:{}", depth));
        Ok(())
    }
}

// ============================================================================
// Mock Graphics Device
// ============================================================================

pub struct MockGraphicsDevice {
    pub created_buffers: Record,
    pub buffer_writes: Arc<Mutex<Vec<BufferWrite>>>,
    pub created_textures: Record,
    pub created_samplers: Record,
    pub created_shaders: Record,
    pub created_resource_layouts: Record,
    pub created_resource_sets: Record,
    pub created_pipelines: Record,
    pub submitted: Record,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            created_buffers: record(),
            buffer_writes: Arc::new(Mutex::new(Vec::new())),
            created_textures: record(),
            created_samplers: record(),
            created_shaders: record(),
            created_resource_layouts: record(),
            created_resource_sets: record(),
            created_pipelines: record(),
            submitted: record(),
        }
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if desc.size == 0 {
            engine_bail!("prism::mock", "Buffer '{}' has zero size", desc.name);
        }
        self.created_buffers.lock().unwrap().push(format!("{}:{}", desc.name, desc.size));
        Ok(Arc::new(MockBuffer {
            name: desc.name,
            size: desc.size,
            writes: self.buffer_writes.clone(),
        }))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        self.created_textures.lock().unwrap().push(desc.name.clone());
        Ok(Arc::new(MockTexture::new(&desc.name, desc.width, desc.height)))
    }

    fn create_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<dyn Sampler>> {
        self.created_samplers.lock().unwrap().push(format!("{:?}", desc.filter));
        Ok(Arc::new(MockSampler { desc }))
    }

    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        let source = String::from_utf8_lossy(desc.code);
        if source.contains(COMPILE_ERROR_MARKER) {
            return Err(Error::ShaderCompilation {
                name: desc.name,
                message: "mock compile error: source contains #error".to_string(),
            });
        }
        self.created_shaders.lock().unwrap().push(desc.name.clone());
        Ok(Arc::new(MockShader { name: desc.name, stage: desc.stage }))
    }

    fn create_resource_layout(&mut self, desc: ResourceLayoutDesc) -> Result<Arc<dyn ResourceLayout>> {
        let names: Vec<&str> = desc.elements.iter().map(|e| e.name.as_str()).collect();
        self.created_resource_layouts.lock().unwrap().push(names.join(","));
        Ok(Arc::new(MockResourceLayout { desc }))
    }

    fn create_resource_set(&mut self, desc: ResourceSetDesc) -> Result<Arc<dyn ResourceSet>> {
        if desc.bindings.len() != desc.layout.desc().elements.len() {
            engine_bail!("prism::mock", "Resource set has {} bindings, layout expects {}",
                desc.bindings.len(), desc.layout.desc().elements.len());
        }
        let kinds: Vec<ResourceKind> = desc.bindings.iter().map(|b| b.kind()).collect();
        self.created_resource_sets.lock().unwrap().push(format!("{:?}", kinds));
        Ok(Arc::new(MockResourceSet { kinds }))
    }

    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>> {
        let name = format!("{}+{}", desc.vertex_shader.name(), desc.fragment_shader.name());
        self.created_pipelines.lock().unwrap().push(name.clone());
        Ok(Arc::new(MockPipeline { name, state: desc.state }))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList::new()))
    }

    fn submit(&mut self, commands: &[&dyn CommandList]) -> Result<()> {
        self.submitted.lock().unwrap().push(format!("{}", commands.len()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
