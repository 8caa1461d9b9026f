//! Lock-free registry of protection systems, keyed by id.
//!
//! Registered systems change rarely; resolution happens on every encrypt and
//! decrypt. The map lives behind `arc-swap` so reads on the hot path never
//! block, and registration swaps in a new map via RCU.

use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;
use thiserror::Error;
use uuid::Uuid;

use crate::crypto::ProtectionMode;

/// Errors from the protection registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested id has no registered protection system.
    #[error("unknown protection system: {0}")]
    UnknownSystem(Uuid),
}

/// A named policy binding content to a specific encryption mode.
#[derive(Debug, Clone)]
pub struct ProtectionSystem {
    pub id: Uuid,
    /// Human-readable label, e.g. `"AES"`.
    pub name: String,
    /// The cipher configuration used for every content item referencing
    /// this system.
    pub mode: ProtectionMode,
}

/// Shared, lock-free registry of protection systems.
#[derive(Clone, Debug)]
pub struct ProtectionRegistry {
    inner: Arc<ArcSwap<HashMap<Uuid, Arc<ProtectionSystem>>>>,
}

impl ProtectionRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ArcSwap::new(Arc::new(HashMap::new()))),
        }
    }

    /// Number of registered protection systems.
    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    /// Returns `true` if no systems are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }

    /// Resolve a protection-system id to its descriptor.
    ///
    /// Lock-free read; safe to call on the hot encryption path.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownSystem`] if `id` is not registered.
    pub fn resolve(&self, id: Uuid) -> Result<Arc<ProtectionSystem>, RegistryError> {
        self.inner
            .load()
            .get(&id)
            .cloned()
            .ok_or(RegistryError::UnknownSystem(id))
    }

    /// Register a new protection system under a fresh id.
    pub fn register(&self, name: impl Into<String>, mode: ProtectionMode) -> Arc<ProtectionSystem> {
        let system = Arc::new(ProtectionSystem {
            id: Uuid::new_v4(),
            name: name.into(),
            mode,
        });
        self.inner.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.insert(system.id, Arc::clone(&system));
            next
        });
        system
    }

    /// Snapshot of all registered systems.
    pub fn list(&self) -> Vec<Arc<ProtectionSystem>> {
        self.inner.load().values().cloned().collect()
    }
}

impl Default for ProtectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::mode::{MODE_AES_CBC, MODE_AES_ECB};

    fn mode(name: &str) -> ProtectionMode {
        ProtectionMode::from_name(name).unwrap()
    }

    #[test]
    fn initially_empty() {
        let registry = ProtectionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn unknown_id_returns_error() {
        let registry = ProtectionRegistry::new();
        let id = Uuid::new_v4();
        let err = registry.resolve(id).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownSystem(e) if e == id));
    }

    #[test]
    fn register_and_resolve() {
        let registry = ProtectionRegistry::new();
        let system = registry.register("AES", mode(MODE_AES_ECB));
        let resolved = registry.resolve(system.id).unwrap();
        assert_eq!(resolved.name, "AES");
        assert_eq!(resolved.mode.name(), MODE_AES_ECB);
    }

    #[test]
    fn registrations_accumulate() {
        let registry = ProtectionRegistry::new();
        let a = registry.register("AES ECB", mode(MODE_AES_ECB));
        let b = registry.register("AES CBC", mode(MODE_AES_CBC));
        assert_eq!(registry.len(), 2);
        assert!(registry.resolve(a.id).is_ok());
        assert!(registry.resolve(b.id).is_ok());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn list_returns_all_systems() {
        let registry = ProtectionRegistry::new();
        registry.register("AES ECB", mode(MODE_AES_ECB));
        registry.register("AES CBC", mode(MODE_AES_CBC));
        let mut names: Vec<_> = registry.list().iter().map(|s| s.name.clone()).collect();
        names.sort();
        assert_eq!(names, ["AES CBC", "AES ECB"]);
    }
}
