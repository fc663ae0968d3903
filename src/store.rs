use crate::models::HiddenStoreError;
use crate::repositories::HiddenAuthorStore;
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct InMemoryHiddenStore {
    ids: Mutex<Vec<i64>>,
}

impl InMemoryHiddenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut stored = Vec::new();
        for id in ids {
            if !stored.contains(&id) {
                stored.push(id);
            }
        }
        Self {
            ids: Mutex::new(stored),
        }
    }
}

#[async_trait]
impl HiddenAuthorStore for InMemoryHiddenStore {
    async fn read(&self) -> Result<Vec<i64>, HiddenStoreError> {
        let ids = self
            .ids
            .lock()
            .map_err(|_| anyhow!("Hidden author set lock was poisoned"))?;
        Ok(ids.clone())
    }

    async fn append(&self, id: i64) -> Result<(), HiddenStoreError> {
        let mut ids = self
            .ids
            .lock()
            .map_err(|_| anyhow!("Hidden author set lock was poisoned"))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_is_idempotent() {
        let store = InMemoryHiddenStore::new();
        store.append(3).await.unwrap();
        store.append(3).await.unwrap();
        store.append(5).await.unwrap();
        assert_eq!(store.read().await.unwrap(), vec![3, 5]);
    }

    #[tokio::test]
    async fn seeded_ids_are_deduplicated() {
        let store = InMemoryHiddenStore::with_ids([2, 2, 1]);
        assert_eq!(store.read().await.unwrap(), vec![2, 1]);
    }
}
