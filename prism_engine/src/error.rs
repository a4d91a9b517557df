//! Error types for the Prism engine
//!
//! This module defines the error types used throughout the engine,
//! including graphics backend failures, shader compilation and
//! resource lifecycle errors.

use std::fmt;

/// Result type for Prism engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (Vulkan, DirectX, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, shader, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, graphics device, subsystems)
    InitializationFailed(String),

    /// A shader stage failed to load or compile
    ShaderCompilation {
        /// Asset name of the failing shader source
        name: String,
        /// Compiler or loader output
        message: String,
    },

    /// An object was used after it was disposed
    Disposed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::ShaderCompilation { name, message } => {
                write!(f, "Shader compilation failed for '{}': {}", name, message)
            }
            Error::Disposed(what) => write!(f, "Use after dispose: {}", what),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error through `engine_error!` and build an `Error::BackendError` from the same message
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("prism::Engine", "Buffer '{}' not found", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::prism::Error::BackendError(message)
    }};
}

/// Log an error and return it from the current function
///
/// # Example
///
/// ```ignore
/// engine_bail!("prism::Engine", "Invalid size {}", size);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
