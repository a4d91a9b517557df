//! Shader asset module
//!
//! Loads shader sources by asset name, caches them behind lazy handles and
//! raises a notification when a source changes on disk.

pub mod source;
pub mod loader;
pub mod notifier;
pub mod cache;

pub use source::{ShaderSource, DEFAULT_ENTRY_POINT};
pub use loader::{ShaderSourceLoader, DirectoryShaderLoader, MemoryShaderLoader};
pub use notifier::{AssetChangedNotifier, AssetChangedCallback, SubscriptionKey};
pub use cache::{ShaderAssetCache, ShaderHandle};
