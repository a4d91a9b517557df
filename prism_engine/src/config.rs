//! Engine configuration
//!
//! Stored once on `Engine` and read by the shader subsystem when it creates
//! loaders, resource managers and the fallback shader.

use std::path::PathBuf;

/// Engine-wide configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Check uniform declarations against their shader's validator table.
    /// Defaults to on in debug builds only.
    pub validate_uniforms: bool,

    /// Directories searched, in order, for shader source files
    pub shader_directories: Vec<PathBuf>,

    /// File extension appended to shader asset names (including the dot)
    pub shader_extension: String,

    /// Asset names of the fallback shader (vertex, fragment)
    pub error_shader: (String, String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate_uniforms: cfg!(debug_assertions),
            shader_directories: vec![PathBuf::from("./assets/shaders/")],
            shader_extension: ".glsl".to_string(),
            error_shader: ("vertex_error".to_string(), "frag_error".to_string()),
        }
    }
}

impl Config {
    /// Resolve every candidate path for a shader asset, in search order
    pub fn shader_candidates(&self, name: &str) -> Vec<PathBuf> {
        self.shader_directories
            .iter()
            .map(|dir| dir.join(format!("{}{}", name, self.shader_extension)))
            .collect()
    }
}
