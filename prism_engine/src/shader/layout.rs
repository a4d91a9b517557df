//! Resource layout descriptors
//!
//! A shader declares, in order, the uniform buffers, textures and samplers it
//! reads. Declaration order is the binding slot index, so bindings must be
//! declared exactly as the shader source expects them (uniform buffer first by
//! convention, then texture/sampler pairs).

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::graphics_device::{
    self, GraphicsDevice, ResourceKind, ResourceLayout, ResourceLayoutDesc,
    ResourceLayoutElement, ShaderStages,
};

/// Suffix of the sampler declared alongside a texture
pub const SAMPLER_SUFFIX: &str = "Sampler";

/// Name of the sampler paired with texture `name`
pub fn sampler_name(name: &str) -> String {
    format!("{}{}", name, SAMPLER_SUFFIX)
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates named bindings in declaration order
#[derive(Debug, Clone, Default)]
pub struct ResourceLayoutBuilder {
    elements: Vec<ResourceLayoutElement>,
}

impl ResourceLayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a uniform buffer binding
    pub fn uniform(self, name: &str, stages: ShaderStages) -> Self {
        self.push(name, ResourceKind::UniformBuffer, stages)
    }

    /// Declare a read-only texture binding
    pub fn texture(self, name: &str, stages: ShaderStages) -> Self {
        self.push(name, ResourceKind::Texture, stages)
    }

    /// Declare a sampler binding
    pub fn sampler(self, name: &str, stages: ShaderStages) -> Self {
        self.push(name, ResourceKind::Sampler, stages)
    }

    /// Declare `name` as a texture and `name` + "Sampler" as its sampler
    pub fn texture_and_sampler(self, name: &str, stages: ShaderStages) -> Self {
        self.texture(name, stages).sampler(&sampler_name(name), stages)
    }

    fn push(mut self, name: &str, kind: ResourceKind, stages: ShaderStages) -> Self {
        if self.elements.iter().any(|e| e.name == name) {
            crate::engine_error!("prism::ResourceLayoutBuilder",
                "Binding '{}' is already declared in this layout, ignoring {:?}", name, kind);
            return self;
        }
        self.elements.push(ResourceLayoutElement {
            name: name.to_string(),
            kind,
            stages,
        });
        self
    }

    /// Number of declared bindings
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The ordered binding list accumulated so far
    pub fn descriptor(&self) -> ResourceLayoutDesc {
        ResourceLayoutDesc { elements: self.elements.clone() }
    }

    /// Create the backend layout. The result is immutable.
    pub fn build(self, graphics_device: &Arc<Mutex<dyn GraphicsDevice>>) -> Result<Arc<ShaderResourceLayout>> {
        let desc = ResourceLayoutDesc { elements: self.elements };
        if desc.elements.is_empty() {
            crate::engine_debug!("prism::ResourceLayoutBuilder", "Building an empty resource layout");
        }

        let backend = graphics_device::lock_device(graphics_device)?
            .create_resource_layout(desc.clone())?;

        Ok(Arc::new(ShaderResourceLayout::new(desc, backend)))
    }
}

// ============================================================================
// Built layout
// ============================================================================

/// Immutable binding schema plus its backend layout handle
pub struct ShaderResourceLayout {
    desc: ResourceLayoutDesc,
    name_to_index: FxHashMap<String, usize>,
    backend: Arc<dyn ResourceLayout>,
}

impl ShaderResourceLayout {
    fn new(desc: ResourceLayoutDesc, backend: Arc<dyn ResourceLayout>) -> Self {
        let name_to_index = desc.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { desc, name_to_index, backend }
    }

    pub fn desc(&self) -> &ResourceLayoutDesc {
        &self.desc
    }

    pub fn elements(&self) -> &[ResourceLayoutElement] {
        &self.desc.elements
    }

    /// Binding slot index and element for `name`
    pub fn element(&self, name: &str) -> Option<(usize, &ResourceLayoutElement)> {
        let index = *self.name_to_index.get(name)?;
        Some((index, &self.desc.elements[index]))
    }

    pub fn len(&self) -> usize {
        self.desc.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.desc.elements.is_empty()
    }

    /// Backend layout handle
    pub fn backend(&self) -> &Arc<dyn ResourceLayout> {
        &self.backend
    }
}

impl std::fmt::Debug for ShaderResourceLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderResourceLayout")
            .field("elements", &self.desc.elements)
            .finish()
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
