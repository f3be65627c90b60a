// crates/quill-store/src/memory.rs
//
// In-memory RecordStore backed by a HashMap keyed by each record's natural
// key. A save replaces the whole entry under the write lock, so concurrent
// saves of the same key never produce two rows.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::error::QuillError;
use quill_core::records::StoredRecord;
use quill_core::traits::RecordStore;

/// HashMap-backed store for one record kind.
#[derive(Debug)]
pub struct InMemoryRecordStore<R> {
    records: RwLock<HashMap<String, R>>,
}

impl<R: StoredRecord> InMemoryRecordStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of every stored record.
    pub async fn all(&self) -> Vec<R> {
        self.records.read().await.values().cloned().collect()
    }
}

impl<R: StoredRecord> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: StoredRecord> RecordStore<R> for InMemoryRecordStore<R> {
    async fn find_one(&self, key: &str) -> Result<Option<R>, QuillError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn save(&self, mut record: R) -> Result<R, QuillError> {
        record.touch();
        self.records
            .write()
            .await
            .insert(record.store_key(), record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::records::ApprovalRecord;
    use quill_core::WorkflowDocument;

    #[tokio::test]
    async fn test_save_replaces_existing_key() {
        let store = InMemoryRecordStore::<ApprovalRecord>::new();
        let mut record = ApprovalRecord::create(&WorkflowDocument::default());
        let key = record.id.to_string();

        store.save(record.clone()).await.unwrap();
        record.owner = Some("bob".to_string());
        store.save(record).await.unwrap();

        assert_eq!(store.len().await, 1);
        let found = store.find_one(&key).await.unwrap().unwrap();
        assert_eq!(found.owner.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn test_find_missing_key() {
        let store = InMemoryRecordStore::<ApprovalRecord>::new();
        assert!(store.find_one("missing").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
