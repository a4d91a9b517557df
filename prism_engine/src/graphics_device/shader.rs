//! Shader module trait and shader stages

use bitflags::bitflags;

/// A single shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Both stages, vertex first
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];
}

bitflags! {
    /// Set of shader stages a binding is visible to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStages: u32 {
        const VERTEX = 0x01;
        const FRAGMENT = 0x02;
        const VERTEX_FRAGMENT = Self::VERTEX.bits() | Self::FRAGMENT.bits();
    }
}

impl From<ShaderStage> for ShaderStages {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => ShaderStages::VERTEX,
            ShaderStage::Fragment => ShaderStages::FRAGMENT,
        }
    }
}

impl ShaderStages {
    pub fn contains_stage(&self, stage: ShaderStage) -> bool {
        self.contains(stage.into())
    }
}

/// Shader module descriptor
#[derive(Debug, Clone)]
pub struct ShaderDesc<'a> {
    /// Asset name the source was loaded from (used in compiler diagnostics)
    pub name: String,
    /// Shader stage
    pub stage: ShaderStage,
    /// Entry point function name
    pub entry_point: String,
    /// Source or bytecode
    pub code: &'a [u8],
}

/// Compiled shader module
pub trait Shader: Send + Sync {
    /// Asset name the module was compiled from
    fn name(&self) -> &str;

    fn stage(&self) -> ShaderStage;
}
