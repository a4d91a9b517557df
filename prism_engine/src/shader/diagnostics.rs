//! Shader diagnostics
//!
//! Asset name to error text for every shader currently replaced by the error
//! shader. Written by pipeline bindings, read by inspector tooling.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct ShaderDiagnostics {
    errors: Mutex<BTreeMap<String, String>>,
}

impl ShaderDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn errors_lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.errors.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record (or replace) the error of `name`
    pub fn record(&self, name: &str, message: &str) {
        self.errors_lock().insert(name.to_string(), message.to_string());
    }

    /// Forget the error of `name`. Returns true if one was recorded.
    pub fn clear(&self, name: &str) -> bool {
        self.errors_lock().remove(name).is_some()
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.errors_lock().get(name).cloned()
    }

    /// Snapshot of every recorded error, sorted by asset name
    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors_lock()
            .iter()
            .map(|(name, message)| (name.clone(), message.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.errors_lock().is_empty()
    }
}
