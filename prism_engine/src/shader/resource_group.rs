//! Resource manager groups
//!
//! The managers a program creates for one draw target, bound together at
//! consecutive resource set slots. Groups are identified by an id assigned at
//! creation, never by comparing their contents.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::graphics_device::CommandList;
use crate::shader::resource_manager::ShaderResourceManager;

static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceGroupId(u64);

impl ResourceGroupId {
    fn next() -> Self {
        Self(NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

pub struct ShaderResourceGroup {
    id: ResourceGroupId,
    managers: Vec<ShaderResourceManager>,
}

impl ShaderResourceGroup {
    /// Manager `i` binds at slot `i`
    pub fn new(managers: Vec<ShaderResourceManager>) -> Self {
        Self {
            id: ResourceGroupId::next(),
            managers,
        }
    }

    pub fn id(&self) -> ResourceGroupId {
        self.id
    }

    pub fn managers(&self) -> &[ShaderResourceManager] {
        &self.managers
    }

    pub fn manager(&self, index: usize) -> Option<&ShaderResourceManager> {
        self.managers.get(index)
    }

    pub fn manager_mut(&mut self, index: usize) -> Option<&mut ShaderResourceManager> {
        self.managers.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// Bind every manager at its own slot, stopping at the first error
    pub fn bind_all(&mut self, cmd: &mut dyn CommandList) -> Result<()> {
        for (slot, manager) in self.managers.iter_mut().enumerate() {
            manager.bind(cmd, slot as u32)?;
        }
        Ok(())
    }

    /// True when every manager is disposed (vacuously true when empty)
    pub fn are_managers_disposed(&self) -> bool {
        self.managers.iter().all(ShaderResourceManager::is_disposed)
    }

    pub fn dispose_managers(&mut self) {
        for manager in &mut self.managers {
            manager.dispose();
        }
    }
}
