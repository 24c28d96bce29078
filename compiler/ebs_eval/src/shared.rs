//! State shared between an engine and its host threads.
//!
//! - [`SharedMutableRegistry`]: a registry that hosts may extend after the
//!   engine is built while invocations read it concurrently.
//! - [`SharedStore`]: the thread-safe key/value map an external subsystem
//!   owns. Scripts reach it only through the `shared.*` built-ins, one
//!   atomic accessor call at a time.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::Value;

/// `Arc<RwLock<T>>` newtype for registries.
pub struct SharedMutableRegistry<T>(Arc<RwLock<T>>);

impl<T> SharedMutableRegistry<T> {
    pub fn new(registry: T) -> Self {
        SharedMutableRegistry(Arc::new(RwLock::new(registry)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }
}

impl<T> Clone for SharedMutableRegistry<T> {
    fn clone(&self) -> Self {
        SharedMutableRegistry(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedMutableRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedMutableRegistry({:?})", &*self.0.read())
    }
}

/// Concurrent string-keyed value store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct SharedStore(Arc<DashMap<String, Value>>);

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the value under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.get(key).map(|entry| entry.value().clone())
    }

    /// Store `value`, returning the previous one.
    pub fn set(&self, key: &str, value: Value) -> Option<Value> {
        self.0.insert(key.to_string(), value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.remove(key).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorted keys, for diagnostics.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.0.iter().map(|entry| entry.key().clone()).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_store_accessors() {
        let store = SharedStore::new();
        assert!(store.is_empty());
        assert_eq!(store.set("title", Value::string("Main")), None);
        assert_eq!(store.set("title", Value::string("Other")), Some(Value::string("Main")));
        assert!(store.contains("title"));
        assert_eq!(store.get("title"), Some(Value::string("Other")));
        assert_eq!(store.remove("title"), Some(Value::string("Other")));
        assert_eq!(store.get("title"), None);
    }

    #[test]
    fn test_store_clones_share_state_across_threads() {
        let store = SharedStore::new();
        std::thread::scope(|scope| {
            for worker in 0..4 {
                let store = store.clone();
                scope.spawn(move || {
                    for i in 0..25 {
                        store.set(&format!("w{worker}-{i}"), Value::Int(i));
                    }
                });
            }
        });
        assert_eq!(store.len(), 100);
        assert_eq!(store.keys().first().map(String::as_str), Some("w0-0"));
    }

    #[test]
    fn test_registry_write_is_visible_to_clones() {
        let registry = SharedMutableRegistry::new(Vec::<i32>::new());
        let other = registry.clone();
        registry.write().push(7);
        assert_eq!(*other.read(), vec![7]);
    }
}
