//! Registry of live resource managers
//!
//! Inspection tooling enumerates managers through this registry. Managers
//! register themselves explicitly and unregister when disposed. Keys carry a
//! generation, so a key kept after its manager is gone simply stops resolving.

use std::sync::{Arc, Mutex};
use slotmap::{new_key_type, SlotMap};
use crate::shader::resource_manager::ResourceManagerId;

new_key_type! {
    /// Stable key of a registry entry
    pub struct RegistryKey;
}

/// What the registry knows about a live manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredManager {
    pub id: ResourceManagerId,
    pub name: String,
}

/// Registry shared between managers and the tooling that lists them
pub type SharedRegistry = Arc<Mutex<ResourceManagerRegistry>>;

#[derive(Default)]
pub struct ResourceManagerRegistry {
    entries: SlotMap<RegistryKey, RegisteredManager>,
}

impl ResourceManagerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the shared form
    pub fn shared() -> SharedRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn register(&mut self, id: ResourceManagerId, name: &str) -> RegistryKey {
        self.entries.insert(RegisteredManager { id, name: name.to_string() })
    }

    /// Remove an entry. Returns `None` for keys already removed.
    pub fn unregister(&mut self, key: RegistryKey) -> Option<RegisteredManager> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: RegistryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: RegistryKey) -> Option<&RegisteredManager> {
        self.entries.get(key)
    }

    pub fn find(&self, id: ResourceManagerId) -> Option<RegistryKey> {
        self.entries.iter().find(|(_, m)| m.id == id).map(|(k, _)| k)
    }

    /// Live managers, in no particular order
    pub fn live(&self) -> impl Iterator<Item = (RegistryKey, &RegisteredManager)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
