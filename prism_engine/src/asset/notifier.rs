//! Asset changed notification
//!
//! Subscribers are keyed by slotmap keys, so unsubscribing twice or with a
//! key from a dropped subscriber is harmless.

use std::sync::{Arc, Mutex};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key returned by `AssetChangedNotifier::subscribe`
    pub struct SubscriptionKey;
}

/// Called with the name of the changed asset
pub type AssetChangedCallback = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub struct AssetChangedNotifier {
    subscribers: Mutex<SlotMap<SubscriptionKey, AssetChangedCallback>>,
}

impl AssetChangedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionKey
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let callback: AssetChangedCallback = Arc::new(callback);
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.insert(callback),
            Err(poisoned) => poisoned.into_inner().insert(callback),
        }
    }

    /// Returns false when `key` was not subscribed
    pub fn unsubscribe(&self, key: SubscriptionKey) -> bool {
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.remove(key).is_some(),
            Err(poisoned) => poisoned.into_inner().remove(key).is_some(),
        }
    }

    /// Invoke every subscriber with `name`
    ///
    /// Callbacks run outside the subscriber lock and may subscribe or
    /// unsubscribe themselves.
    pub fn notify(&self, name: &str) {
        let callbacks: Vec<AssetChangedCallback> = match self.subscribers.lock() {
            Ok(subscribers) => subscribers.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().values().cloned().collect(),
        };

        crate::engine_trace!("prism::AssetChangedNotifier",
            "'{}' changed, notifying {} subscriber(s)", name, callbacks.len());

        for callback in callbacks {
            callback(name);
        }
    }

    pub fn len(&self) -> usize {
        match self.subscribers.lock() {
            Ok(subscribers) => subscribers.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
