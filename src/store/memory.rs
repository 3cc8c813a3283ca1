use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{FeedbackStore, StoreError};
use crate::models::{FeedbackRecord, NewFeedback};

/// Process-local store. Records are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<FeedbackRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn records(&self) -> Vec<FeedbackRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn insert(&self, new: &NewFeedback) -> Result<FeedbackRecord, StoreError> {
        let record = FeedbackRecord {
            id: Uuid::now_v7(),
            name: new.name().to_string(),
            email: new.email().to_string(),
            feedback: new.feedback().to_string(),
            created_at: Utc::now(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn latest(&self) -> Result<Option<FeedbackRecord>, StoreError> {
        // max_by_key keeps the last of equal timestamps, i.e. the newest insert
        Ok(self
            .records
            .read()
            .await
            .iter()
            .max_by_key(|r| r.created_at)
            .cloned())
    }
}
