//! Resource layouts and resource sets
//!
//! A resource layout is the backend object describing which named bindings a
//! shader expects (uniform buffers, textures, samplers) and in what order.
//! A resource set is an immutable group of concrete resources matching a layout.

use std::sync::Arc;
use crate::graphics_device::{Buffer, Texture, Sampler, ShaderStages};

/// Kind of resource bound at a given slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    UniformBuffer,
    Texture,
    Sampler,
}

/// One binding within a layout. Its slot index is its position in the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayoutElement {
    pub name: String,
    pub kind: ResourceKind,
    pub stages: ShaderStages,
}

/// Ordered list of bindings the backend builds a layout from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLayoutDesc {
    pub elements: Vec<ResourceLayoutElement>,
}

/// Backend resource layout
pub trait ResourceLayout: Send + Sync {
    fn desc(&self) -> &ResourceLayoutDesc;
}

/// A concrete resource to put in a resource set
#[derive(Clone)]
pub enum ResourceBinding {
    UniformBuffer(Arc<dyn Buffer>),
    Texture(Arc<dyn Texture>),
    Sampler(Arc<dyn Sampler>),
}

impl ResourceBinding {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceBinding::UniformBuffer(_) => ResourceKind::UniformBuffer,
            ResourceBinding::Texture(_) => ResourceKind::Texture,
            ResourceBinding::Sampler(_) => ResourceKind::Sampler,
        }
    }
}

/// Resource set descriptor. `bindings` follows the layout's element order.
#[derive(Clone)]
pub struct ResourceSetDesc {
    pub layout: Arc<dyn ResourceLayout>,
    pub bindings: Vec<ResourceBinding>,
}

/// Backend resource set
pub trait ResourceSet: Send + Sync {
    /// Number of bound resources
    fn binding_count(&self) -> usize;
}
