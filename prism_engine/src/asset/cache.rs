//! Shader asset cache
//!
//! Hands out lazy handles to shader sources. The first `get` on a handle loads
//! the source through the loader; later calls return the cached copy until
//! the asset is unloaded. When the file watcher reports a change, call
//! `source_changed`: it drops the cached copy and raises the asset changed
//! notification while holding the frame lock.

use std::sync::{Arc, Mutex, MutexGuard};

use rustc_hash::FxHashMap;

use crate::asset::loader::ShaderSourceLoader;
use crate::asset::notifier::AssetChangedNotifier;
use crate::asset::source::ShaderSource;
use crate::engine::Engine;
use crate::error::Result;
use crate::frame_lock::FrameLock;

const SOURCE: &str = "prism::ShaderAssetCache";

pub struct ShaderAssetCache {
    loader: Box<dyn ShaderSourceLoader>,
    loaded: Mutex<FxHashMap<String, Arc<ShaderSource>>>,
    notifier: Arc<AssetChangedNotifier>,
    frame_lock: &'static FrameLock,
}

impl ShaderAssetCache {
    /// Cache over `loader`, dispatching changes under the engine frame lock
    pub fn new(loader: impl ShaderSourceLoader + 'static) -> Arc<Self> {
        Self::with_frame_lock(loader, Engine::frame_lock())
    }

    /// Cache dispatching changes under `frame_lock`
    pub fn with_frame_lock(loader: impl ShaderSourceLoader + 'static, frame_lock: &'static FrameLock) -> Arc<Self> {
        Arc::new(Self {
            loader: Box::new(loader),
            loaded: Mutex::new(FxHashMap::default()),
            notifier: Arc::new(AssetChangedNotifier::new()),
            frame_lock,
        })
    }

    fn loaded(&self) -> MutexGuard<'_, FxHashMap<String, Arc<ShaderSource>>> {
        self.loaded.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Handle to `name`. Nothing is loaded until `ShaderHandle::get`.
    pub fn get_handle(self: &Arc<Self>, name: &str) -> ShaderHandle {
        ShaderHandle {
            cache: self.clone(),
            name: name.to_string(),
        }
    }

    /// Cached source of `name`, loading it on first use
    ///
    /// # Errors
    ///
    /// Loader errors. A failed load is not cached.
    pub fn load(&self, name: &str) -> Result<Arc<ShaderSource>> {
        if let Some(source) = self.loaded().get(name) {
            return Ok(source.clone());
        }

        let source = Arc::new(self.loader.load(name)?);
        self.loaded().insert(name.to_string(), source.clone());
        crate::engine_debug!(SOURCE, "Loaded shader source '{}' ({:?})", name, source.stage);
        Ok(source)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded().contains_key(name)
    }

    /// Drop the cached copy of `name`; the next `get` reloads it
    pub fn unload(&self, name: &str) -> bool {
        self.loaded().remove(name).is_some()
    }

    /// Notifier raised by `source_changed`
    pub fn notifier(&self) -> &Arc<AssetChangedNotifier> {
        &self.notifier
    }

    /// Report that the source of `name` changed on disk
    ///
    /// Blocks until the current frame ends, then unloads the asset and
    /// notifies subscribers before releasing the frame lock.
    pub fn source_changed(&self, name: &str) {
        let _frame = self.frame_lock.acquire();
        self.unload(name);
        crate::engine_info!(SOURCE, "Shader source '{}' changed", name);
        self.notifier.notify(name);
    }
}

/// Lazy reference to a shader source in a `ShaderAssetCache`
#[derive(Clone)]
pub struct ShaderHandle {
    cache: Arc<ShaderAssetCache>,
    name: String,
}

impl ShaderHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source, loaded on first call and cached afterwards
    pub fn get(&self) -> Result<Arc<ShaderSource>> {
        self.cache.load(&self.name)
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_loaded(&self.name)
    }
}

impl std::fmt::Debug for ShaderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderHandle")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
