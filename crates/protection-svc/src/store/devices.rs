//! Thread-safe store for playback devices.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tokio::sync::RwLock;
use uuid::Uuid;

/// A registered device and the protection system it plays content from.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub id: Uuid,
    pub name: String,
    pub protection_system: Uuid,
}

/// Shared store of devices keyed by id.
#[derive(Clone, Debug, Default)]
pub struct DeviceStore {
    inner: Arc<RwLock<HashMap<Uuid, DeviceRecord>>>,
}

impl DeviceStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a device under its id.
    pub async fn upsert(&self, device: DeviceRecord) {
        self.inner.write().await.insert(device.id, device);
    }

    /// Snapshot of all devices.
    pub async fn list(&self) -> Vec<DeviceRecord> {
        self.inner.read().await.values().cloned().collect()
    }

    /// The distinct protection systems referenced by at least one device.
    ///
    /// Content listings are restricted to these systems.
    pub async fn protection_systems_in_use(&self) -> HashSet<Uuid> {
        self.inner
            .read()
            .await
            .values()
            .map(|d| d.protection_system)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(system: Uuid) -> DeviceRecord {
        DeviceRecord {
            id: Uuid::new_v4(),
            name: "Device1".into(),
            protection_system: system,
        }
    }

    #[tokio::test]
    async fn systems_in_use_deduplicates() {
        let store = DeviceStore::new();
        let system = Uuid::new_v4();
        store.upsert(device(system)).await;
        store.upsert(device(system)).await;
        let other = Uuid::new_v4();
        store.upsert(device(other)).await;

        let in_use = store.protection_systems_in_use().await;
        assert_eq!(in_use.len(), 2);
        assert!(in_use.contains(&system));
        assert!(in_use.contains(&other));
    }

    #[tokio::test]
    async fn list_returns_all_devices() {
        let store = DeviceStore::new();
        store.upsert(device(Uuid::new_v4())).await;
        store.upsert(device(Uuid::new_v4())).await;
        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test]
    async fn empty_store_has_no_systems_in_use() {
        let store = DeviceStore::new();
        assert!(store.protection_systems_in_use().await.is_empty());
    }
}
