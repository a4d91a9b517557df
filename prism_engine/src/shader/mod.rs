//! Shader resource binding module
//!
//! Uniform packing, resource layouts and managers, shader programs with hot
//! reload, and the pipeline bindings that draw with them.

pub mod uniform;
pub mod layout;
pub mod resource_manager;
pub mod registry;
pub mod resource_group;
pub mod program;
pub mod builtin;
pub mod diagnostics;
pub mod pipeline_binding;

pub use uniform::{
    Color, Uniform, UniformElement, UniformKind, UniformType, UniformValue,
    packed_size, UNIFORM_ALIGNMENT,
};
pub use layout::{ResourceLayoutBuilder, ShaderResourceLayout, sampler_name, SAMPLER_SUFFIX};
pub use resource_manager::{
    BindableResource, ResourceManagerId, ShaderResourceManager,
    UniformEntry, UniformValidator, UniformValidators,
};
pub use registry::{RegisteredManager, RegistryKey, ResourceManagerRegistry, SharedRegistry};
pub use resource_group::{ResourceGroupId, ShaderResourceGroup};
pub use program::{CompiledShaders, ShaderDefinition, ShaderDescriptor, ShaderProgram};
pub use builtin::{ErrorShader, Generic2dShader, LitGenericShader, SolidColorShader};
pub use diagnostics::ShaderDiagnostics;
pub use pipeline_binding::PipelineBinding;
