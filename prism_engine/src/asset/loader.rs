//! Shader source loaders
//!
//! `DirectoryShaderLoader` searches a list of directories in order, so a game
//! directory can override engine shaders of the same name.
//! `MemoryShaderLoader` serves sources registered at runtime.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use crate::asset::source::ShaderSource;
use crate::config::Config;
use crate::error::{Error, Result};

/// Produces shader sources by asset name
pub trait ShaderSourceLoader: Send + Sync {
    /// Load and parse the source of `name`
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if the asset does not exist or is malformed.
    fn load(&self, name: &str) -> Result<ShaderSource>;
}

/// A shared loader stays editable after a cache takes it
impl<L: ShaderSourceLoader + ?Sized> ShaderSourceLoader for Arc<L> {
    fn load(&self, name: &str) -> Result<ShaderSource> {
        (**self).load(name)
    }
}

// ============================================================================
// DirectoryShaderLoader
// ============================================================================

pub struct DirectoryShaderLoader {
    directories: Vec<PathBuf>,
    extension: String,
}

impl DirectoryShaderLoader {
    pub fn new(directories: Vec<PathBuf>, extension: &str) -> Self {
        Self {
            directories,
            extension: extension.to_string(),
        }
    }

    /// Loader over `Config::shader_directories` / `Config::shader_extension`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.shader_directories.clone(), &config.shader_extension)
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// First existing file for `name`, in directory order
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.directories
            .iter()
            .map(|dir| dir.join(format!("{}{}", name, self.extension)))
            .find(|path| path.is_file())
    }

    fn read(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .map_err(|e| Error::InvalidResource(format!("Failed to read '{}': {}", path.display(), e)))
    }
}

impl ShaderSourceLoader for DirectoryShaderLoader {
    fn load(&self, name: &str) -> Result<ShaderSource> {
        let Some(path) = self.resolve(name) else {
            return Err(Error::InvalidResource(format!(
                "Shader '{}{}' not found in {:?}", name, self.extension, self.directories
            )));
        };

        crate::engine_trace!("prism::DirectoryShaderLoader", "Loading '{}' from {}", name, path.display());
        ShaderSource::parse(name, &Self::read(&path)?)
    }
}

// ============================================================================
// MemoryShaderLoader
// ============================================================================

/// Sources held in memory (embedded shaders, tests)
#[derive(Default)]
pub struct MemoryShaderLoader {
    sources: RwLock<FxHashMap<String, String>>,
}

impl MemoryShaderLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the text of `name`
    pub fn insert(&self, name: &str, text: &str) {
        match self.sources.write() {
            Ok(mut sources) => {
                sources.insert(name.to_string(), text.to_string());
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(name.to_string(), text.to_string());
            }
        }
    }

    /// Builder form of `insert`
    pub fn with_source(self, name: &str, text: &str) -> Self {
        self.insert(name, text);
        self
    }

    pub fn remove(&self, name: &str) -> bool {
        match self.sources.write() {
            Ok(mut sources) => sources.remove(name).is_some(),
            Err(poisoned) => poisoned.into_inner().remove(name).is_some(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        match self.sources.read() {
            Ok(sources) => sources.contains_key(name),
            Err(poisoned) => poisoned.into_inner().contains_key(name),
        }
    }
}

impl ShaderSourceLoader for MemoryShaderLoader {
    fn load(&self, name: &str) -> Result<ShaderSource> {
        let text = match self.sources.read() {
            Ok(sources) => sources.get(name).cloned(),
            Err(poisoned) => poisoned.into_inner().get(name).cloned(),
        };
        match text {
            Some(text) => ShaderSource::parse(name, &text),
            None => Err(Error::InvalidResource(format!("Shader '{}' is not registered", name))),
        }
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
