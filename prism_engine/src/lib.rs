/*!
# Prism Engine

Shader resource binding and hot reload for a trait-based rendering backend.

## Architecture

- **GraphicsDevice**: Factory trait the backend implements (buffers, textures,
  samplers, shaders, resource layouts/sets, pipelines, command lists)
- **ShaderResourceManager**: Named uniforms packed into 16-byte aligned stage
  buffers, plus named texture/sampler bindings, created lazily on bind
- **ShaderProgram**: Compiled stages, vertex layout and resource layouts of
  one shader definition
- **PipelineBinding**: Lazily built pipeline that reloads its program when a
  watched source changes and falls back to an error shader on failure
- **ShaderAssetCache**: Lazy shader source handles and change notification

Backend implementations provide concrete types that implement the device traits.
*/

// Internal modules
mod error;
mod engine;
mod config;
mod frame_lock;
pub mod log;
pub mod graphics_device;
pub mod asset;
pub mod shader;

// Main prism namespace module
pub mod prism {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton and configuration
    pub use crate::engine::Engine;
    pub use crate::config::Config;
    pub use crate::frame_lock::{FrameGuard, FrameLock};

    // Graphics device factory trait
    pub use crate::graphics_device::GraphicsDevice;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with the backend contract
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Shader asset sub-module
    pub mod asset {
        pub use crate::asset::*;
    }

    // Shader resource sub-module
    pub mod shader {
        pub use crate::shader::*;
    }
}

// Re-export math library at crate root
pub use glam;
