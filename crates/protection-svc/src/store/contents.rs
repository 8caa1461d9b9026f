//! Thread-safe store for encrypted content records.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored content row: an opaque envelope plus its protection-system
/// reference and the caller-supplied key.
///
/// The key is persisted exactly as supplied (base64 text); the service never
/// generates or rotates keys.
#[derive(Debug, Clone)]
pub struct ContentRecord {
    pub id: Uuid,
    pub protection_system: Uuid,
    pub encryption_key: String,
    /// Base64 envelope produced by the codec.
    pub encrypted_payload: String,
}

impl std::fmt::Display for ContentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never format the key; records appear in trace output.
        write!(f, "content {} (system {})", self.id, self.protection_system)
    }
}

/// Shared store of content records keyed by id.
///
/// Many concurrent readers (list/get handlers) proceed without contention;
/// writers hold the lock only for the map mutation itself.
#[derive(Clone, Debug, Default)]
pub struct ContentStore {
    inner: Arc<RwLock<HashMap<Uuid, ContentRecord>>>,
}

impl ContentStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Insert or replace a record under its id.
    pub async fn upsert(&self, record: ContentRecord) {
        self.inner.write().await.insert(record.id, record);
    }

    /// Fetch a record by id.
    pub async fn get(&self, id: Uuid) -> Option<ContentRecord> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Remove a record, returning `true` if it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    /// Snapshot of all records.
    pub async fn list(&self) -> Vec<ContentRecord> {
        self.inner.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ContentRecord {
        ContentRecord {
            id: Uuid::new_v4(),
            protection_system: Uuid::new_v4(),
            encryption_key: "p2iW1rL0WwjbkBFv6Er67Q==".into(),
            encrypted_payload: "PilZyCyLIZ1QHvqn7RJUpVCIWeujKIktCzn+1/t0+XA=".into(),
        }
    }

    #[tokio::test]
    async fn initially_empty() {
        let store = ContentStore::new();
        assert_eq!(store.len().await, 0);
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn upsert_and_get() {
        let store = ContentStore::new();
        let r = record();
        store.upsert(r.clone()).await;
        let fetched = store.get(r.id).await.unwrap();
        assert_eq!(fetched.encrypted_payload, r.encrypted_payload);
    }

    #[tokio::test]
    async fn upsert_replaces_existing() {
        let store = ContentStore::new();
        let mut r = record();
        store.upsert(r.clone()).await;
        r.encrypted_payload = "other".into();
        store.upsert(r.clone()).await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(r.id).await.unwrap().encrypted_payload, "other");
    }

    #[tokio::test]
    async fn remove_reports_existence() {
        let store = ContentStore::new();
        let r = record();
        store.upsert(r.clone()).await;
        assert!(store.remove(r.id).await);
        assert!(!store.remove(r.id).await);
        assert!(store.get(r.id).await.is_none());
    }

    #[test]
    fn display_omits_key_material() {
        let r = record();
        let rendered = format!("{r}");
        assert!(!rendered.contains("p2iW"));
    }
}
