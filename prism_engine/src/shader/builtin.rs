//! Built-in shader definitions
//!
//! Every built-in declares its uniform buffer first and its texture/sampler
//! pairs after it, matching the binding order of the engine's shader sources.

use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec3};

use crate::config::Config;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, ShaderStage, ShaderStages, VertexLayout};
use crate::shader::layout::{ResourceLayoutBuilder, ShaderResourceLayout};
use crate::shader::program::{ShaderDefinition, ShaderDescriptor};
use crate::shader::resource_manager::{ShaderResourceManager, UniformValidator, UniformValidators};
use crate::shader::uniform::Color;

/// Name of the uniform buffer holding the transforms
pub const DEFAULT_BLOCK: &str = "Default";
/// Name of the fragment block of `LitGenericShader`
pub const USER_DEFINED_BLOCK: &str = "UserDefined";
/// Name of the first texture slot
pub const TEXTURE1: &str = "Texture1";

/// `[Uniform Default (vertex), Texture1 + Texture1Sampler (fragment)]`
fn textured_layout(graphics_device: &Arc<Mutex<dyn GraphicsDevice>>) -> Result<Arc<ShaderResourceLayout>> {
    ResourceLayoutBuilder::new()
        .uniform(DEFAULT_BLOCK, ShaderStages::VERTEX)
        .texture_and_sampler(TEXTURE1, ShaderStages::FRAGMENT)
        .build(graphics_device)
}

/// Default block manager with ViewProj and Model set to identity
fn transform_manager(
    graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
    layout: &Arc<ShaderResourceLayout>,
) -> ShaderResourceManager {
    let mut manager = ShaderResourceManager::new(DEFAULT_BLOCK, graphics_device.clone(), layout.clone());
    manager.assign_value("ViewProj", ShaderStage::Vertex, Mat4::IDENTITY);
    manager.assign_value("Model", ShaderStage::Vertex, Mat4::IDENTITY);
    manager
}

fn first_layout(layouts: &[Arc<ShaderResourceLayout>]) -> Option<&Arc<ShaderResourceLayout>> {
    let layout = layouts.first();
    if layout.is_none() {
        crate::engine_error!("prism::builtin", "Built-in shader called without its resource layouts");
    }
    layout
}

// ============================================================================
// Generic 2D
// ============================================================================

/// Textured sprites
#[derive(Debug, Clone, Copy, Default)]
pub struct Generic2dShader;

impl ShaderDefinition for Generic2dShader {
    fn name(&self) -> &str {
        "Generic2D"
    }

    fn descriptor(&self) -> ShaderDescriptor {
        ShaderDescriptor::new("vertex_generic_2d", "frag_generic")
    }

    fn create_resource_layouts(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
    ) -> Result<Vec<Arc<ShaderResourceLayout>>> {
        Ok(vec![textured_layout(graphics_device)?])
    }

    fn create_resource_managers(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        layouts: &[Arc<ShaderResourceLayout>],
    ) -> Vec<ShaderResourceManager> {
        let Some(layout) = first_layout(layouts) else { return Vec::new() };
        let mut manager = transform_manager(graphics_device, layout);
        manager.assign_texture_and_sampler(TEXTURE1, ShaderStage::Fragment);
        vec![manager]
    }
}

// ============================================================================
// Solid color
// ============================================================================

/// Sprites filled with their vertex color, alpha taken from Texture1
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidColorShader;

impl ShaderDefinition for SolidColorShader {
    fn name(&self) -> &str {
        "SolidColor"
    }

    fn descriptor(&self) -> ShaderDescriptor {
        ShaderDescriptor::new("vertex_generic_2d", "frag_solidcolor")
    }

    fn create_resource_layouts(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
    ) -> Result<Vec<Arc<ShaderResourceLayout>>> {
        Ok(vec![textured_layout(graphics_device)?])
    }

    fn create_resource_managers(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        layouts: &[Arc<ShaderResourceLayout>],
    ) -> Vec<ShaderResourceManager> {
        let Some(layout) = first_layout(layouts) else { return Vec::new() };
        let mut manager = ShaderResourceManager::new(DEFAULT_BLOCK, graphics_device.clone(), layout.clone());
        manager.assign_value("ViewProj", ShaderStage::Vertex, Mat4::IDENTITY);
        manager.assign_texture_and_sampler(TEXTURE1, ShaderStage::Fragment);
        vec![manager]
    }
}

// ============================================================================
// Lit generic
// ============================================================================

/// Textured 3D meshes with one point light and an ambient term
#[derive(Debug, Clone, Copy)]
pub struct LitGenericShader {
    pub ambient_strength: f32,
    pub ambient_color: Color,
    pub light_position: Vec3,
}

impl Default for LitGenericShader {
    fn default() -> Self {
        Self {
            ambient_strength: 0.5,
            ambient_color: Color::WHITE,
            light_position: Vec3::ZERO,
        }
    }
}

impl LitGenericShader {
    /// Uniforms the `frag_litgeneric` source declares in its fragment block
    pub fn validators() -> UniformValidators {
        [
            ("AmbientStrength", UniformValidator::of::<f32>(ShaderStage::Fragment)),
            ("AmbientColor", UniformValidator::of::<Color>(ShaderStage::Fragment)),
            ("LightPos", UniformValidator::of::<Vec3>(ShaderStage::Fragment)),
        ]
        .into_iter()
        .map(|(name, validator)| (name.to_string(), validator))
        .collect()
    }
}

impl ShaderDefinition for LitGenericShader {
    fn name(&self) -> &str {
        "LitGeneric"
    }

    fn descriptor(&self) -> ShaderDescriptor {
        ShaderDescriptor::new("vertex_generic_3d", "frag_litgeneric")
    }

    fn vertex_layout(&self) -> VertexLayout {
        VertexLayout::position_normal_texcoord_color()
    }

    fn create_resource_layouts(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
    ) -> Result<Vec<Arc<ShaderResourceLayout>>> {
        let user_defined = ResourceLayoutBuilder::new()
            .uniform(USER_DEFINED_BLOCK, ShaderStages::FRAGMENT)
            .build(graphics_device)?;
        Ok(vec![textured_layout(graphics_device)?, user_defined])
    }

    fn create_resource_managers(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        layouts: &[Arc<ShaderResourceLayout>],
    ) -> Vec<ShaderResourceManager> {
        let Some(layout) = first_layout(layouts) else { return Vec::new() };
        let mut transforms = transform_manager(graphics_device, layout);
        transforms.assign_texture_and_sampler(TEXTURE1, ShaderStage::Fragment);

        let Some(user_layout) = layouts.get(1) else { return vec![transforms] };
        let mut lighting = ShaderResourceManager::new(USER_DEFINED_BLOCK, graphics_device.clone(), user_layout.clone())
            .with_validators(Self::validators());
        lighting.assign_value("AmbientStrength", ShaderStage::Fragment, self.ambient_strength);
        lighting.assign_value("AmbientColor", ShaderStage::Fragment, self.ambient_color);
        lighting.assign_value("LightPos", ShaderStage::Fragment, self.light_position);

        vec![transforms, lighting]
    }
}

// ============================================================================
// Error
// ============================================================================

/// Fallback drawn while another shader fails to compile
///
/// Only needs a view-projection matrix; its sources must always compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorShader {
    vertex: String,
    fragment: String,
}

impl ErrorShader {
    pub fn new(vertex: &str, fragment: &str) -> Self {
        Self {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
        }
    }

    /// Error shader named by `Config::error_shader`
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.error_shader.0, &config.error_shader.1)
    }
}

impl Default for ErrorShader {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ShaderDefinition for ErrorShader {
    fn name(&self) -> &str {
        "Error"
    }

    fn descriptor(&self) -> ShaderDescriptor {
        ShaderDescriptor::new(&self.vertex, &self.fragment)
    }

    fn create_resource_layouts(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
    ) -> Result<Vec<Arc<ShaderResourceLayout>>> {
        let layout = ResourceLayoutBuilder::new()
            .uniform(DEFAULT_BLOCK, ShaderStages::VERTEX)
            .build(graphics_device)?;
        Ok(vec![layout])
    }

    fn create_resource_managers(
        &self,
        graphics_device: &Arc<Mutex<dyn GraphicsDevice>>,
        layouts: &[Arc<ShaderResourceLayout>],
    ) -> Vec<ShaderResourceManager> {
        let Some(layout) = first_layout(layouts) else { return Vec::new() };
        let mut manager = ShaderResourceManager::new(DEFAULT_BLOCK, graphics_device.clone(), layout.clone());
        manager.assign_value("ViewProj", ShaderStage::Vertex, Mat4::IDENTITY);
        vec![manager]
    }
}
