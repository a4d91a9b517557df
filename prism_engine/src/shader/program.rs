//! Shader programs
//!
//! A `ShaderDefinition` describes one shader: which vertex/fragment assets it
//! compiles, its vertex layout, and the resource layouts and managers it
//! needs. `ShaderProgram` turns a definition into backend objects: it builds
//! the resource layouts once, and compiles (and recompiles) the stages from
//! the asset cache.

use std::sync::{Arc, Mutex};

use crate::asset::ShaderAssetCache;
use crate::error::{Error, Result};
use crate::graphics_device::{
    self, GraphicsDevice, ResourceLayout, Shader, ShaderDesc, ShaderStage, VertexLayout,
};
use crate::shader::layout::ShaderResourceLayout;
use crate::shader::registry::SharedRegistry;
use crate::shader::resource_group::ShaderResourceGroup;
use crate::shader::resource_manager::ShaderResourceManager;

const SOURCE: &str = "prism::ShaderProgram";

// ============================================================================
// Definition
// ============================================================================

/// Asset names a shader compiles from and reloads on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDescriptor {
    pub vertex: String,
    pub fragment: String,
    /// Asset names whose change triggers a reload
    pub watch: Vec<String>,
}

impl ShaderDescriptor {
    /// Descriptor watching its own two stages
    pub fn new(vertex: &str, fragment: &str) -> Self {
        Self {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
            watch: vec![vertex.to_string(), fragment.to_string()],
        }
    }

    /// Also reload when `name` changes (e.g. an included file)
    pub fn watching(mut self, name: &str) -> Self {
        if !self.watch.iter().any(|w| w == name) {
            self.watch.push(name.to_string());
        }
        self
    }
}

/// What a concrete shader supplies
pub trait ShaderDefinition: Send + Sync {
    /// Display name, used in logs and diagnostics
    fn name(&self) -> &str;

    fn descriptor(&self) -> ShaderDescriptor;

    fn vertex_layout(&self) -> VertexLayout {
        VertexLayout::position_texcoord_color()
    }

    /// Resource layouts in set order. Called once per program.
    fn create_resource_layouts(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
    ) -> Result<Vec<Arc<ShaderResourceLayout>>>;

    /// One manager per layout, with this shader's uniforms and textures assigned
    fn create_resource_managers(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        layouts: &[Arc<ShaderResourceLayout>],
    ) -> Vec<ShaderResourceManager>;
}

// ============================================================================
// Program
// ============================================================================

/// Compiled vertex and fragment stages
#[derive(Clone)]
pub struct CompiledShaders {
    pub vertex: Arc<dyn Shader>,
    pub fragment: Arc<dyn Shader>,
}

pub struct ShaderProgram {
    definition: Box<dyn ShaderDefinition>,
    descriptor: ShaderDescriptor,
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    assets: Arc<ShaderAssetCache>,
    shaders: Option<CompiledShaders>,
    resource_layouts: Vec<Arc<ShaderResourceLayout>>,
}

impl ShaderProgram {
    /// Build the program's resource layouts. Stages compile on first use.
    pub fn new(
        definition: impl ShaderDefinition + 'static,
        graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
        assets: Arc<ShaderAssetCache>,
    ) -> Result<Self> {
        let resource_layouts = definition.create_resource_layouts(&graphics_device)?;
        let descriptor = definition.descriptor();

        crate::engine_debug!(SOURCE, "Program '{}' created ({} + {}, {} layout(s))",
            definition.name(), descriptor.vertex, descriptor.fragment, resource_layouts.len());

        Ok(Self {
            definition: Box::new(definition),
            descriptor,
            graphics_device,
            assets,
            shaders: None,
            resource_layouts,
        })
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn descriptor(&self) -> &ShaderDescriptor {
        &self.descriptor
    }

    pub fn graphics_device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> {
        &self.graphics_device
    }

    // ===== STAGES =====

    /// Compile both stages from their current sources
    ///
    /// The compiled stages replace the current ones only if both succeed.
    ///
    /// # Errors
    ///
    /// `Error::ShaderCompilation` naming the failing asset when a source is
    /// missing, malformed, of the wrong stage or does not compile.
    pub fn load_shaders(&mut self) -> Result<CompiledShaders> {
        let vertex = self.compile(&self.descriptor.vertex, ShaderStage::Vertex)?;
        let fragment = self.compile(&self.descriptor.fragment, ShaderStage::Fragment)?;

        let shaders = CompiledShaders { vertex, fragment };
        self.shaders = Some(shaders.clone());

        crate::engine_debug!(SOURCE, "Program '{}' compiled", self.name());
        Ok(shaders)
    }

    /// Drop the current stages and compile again
    ///
    /// On error the program is left without stages.
    pub fn reload_shaders(&mut self) -> Result<CompiledShaders> {
        self.shaders = None;
        self.load_shaders()
    }

    /// Current stages, compiling them on first use
    pub fn shaders(&mut self) -> Result<CompiledShaders> {
        match &self.shaders {
            Some(shaders) => Ok(shaders.clone()),
            None => self.load_shaders(),
        }
    }

    pub fn has_shaders(&self) -> bool {
        self.shaders.is_some()
    }

    /// Loader and stage errors are reported as compile errors of `name`
    fn compile(&self, name: &str, stage: ShaderStage) -> Result<Arc<dyn Shader>> {
        let source = self.assets.get_handle(name).get().map_err(|e| match e {
            Error::InvalidResource(message) => Error::ShaderCompilation { name: name.to_string(), message },
            other => other,
        })?;

        // ========== VALIDATION ==========
        if source.stage != stage {
            return Err(Error::ShaderCompilation {
                name: name.to_string(),
                message: format!("{:?} shader used as {:?} stage of program '{}'", source.stage, stage, self.name()),
            });
        }

        graphics_device::lock_device(&self.graphics_device)?.create_shader(ShaderDesc {
            name: source.name.clone(),
            stage,
            entry_point: source.entry_point.clone(),
            code: source.as_bytes(),
        })
    }

    // ===== LAYOUTS AND MANAGERS =====

    pub fn vertex_layout(&self) -> VertexLayout {
        self.definition.vertex_layout()
    }

    pub fn resource_layouts(&self) -> &[Arc<ShaderResourceLayout>] {
        &self.resource_layouts
    }

    /// Backend handles of `resource_layouts`, in set order
    pub fn backend_resource_layouts(&self) -> Vec<Arc<dyn ResourceLayout>> {
        self.resource_layouts.iter().map(|layout| layout.backend().clone()).collect()
    }

    /// Fresh managers for this program's layouts, optionally registered
    pub fn create_resource_managers(&self, registry: Option<&SharedRegistry>) -> Vec<ShaderResourceManager> {
        let mut managers = self.definition.create_resource_managers(&self.graphics_device, &self.resource_layouts);
        if managers.len() != self.resource_layouts.len() {
            crate::engine_warn!(SOURCE, "Program '{}' created {} manager(s) for {} layout(s)",
                self.name(), managers.len(), self.resource_layouts.len());
        }
        if let Some(registry) = registry {
            for manager in &mut managers {
                manager.register(registry);
            }
        }
        managers
    }

    /// `create_resource_managers` bundled as a group bound at slots 0..n
    pub fn create_resource_group(&self, registry: Option<&SharedRegistry>) -> ShaderResourceGroup {
        ShaderResourceGroup::new(self.create_resource_managers(registry))
    }

    // ===== HOT RELOAD =====

    pub fn shader_names_to_watch(&self) -> &[String] {
        &self.descriptor.watch
    }

    pub fn watches(&self, name: &str) -> bool {
        self.descriptor.watch.iter().any(|w| w == name)
    }

    /// Release the compiled stages
    pub fn dispose(&mut self) {
        if self.shaders.take().is_some() {
            crate::engine_debug!(SOURCE, "Program '{}' stages released", self.name());
        }
    }
}

impl std::fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("name", &self.name())
            .field("descriptor", &self.descriptor)
            .field("compiled", &self.shaders.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
