use async_trait::async_trait;
use sqlx::PgPool;

use super::{FeedbackStore, StoreError};
use crate::models::{FeedbackRecord, NewFeedback};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PgStore {
    async fn insert(&self, new: &NewFeedback) -> Result<FeedbackRecord, StoreError> {
        let record = sqlx::query_as::<_, FeedbackRecord>(
            "INSERT INTO feedback (name, email, feedback)
             VALUES ($1, $2, $3) RETURNING id, name, email, feedback, created_at",
        )
        .bind(new.name())
        .bind(new.email())
        .bind(new.feedback())
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn latest(&self) -> Result<Option<FeedbackRecord>, StoreError> {
        let record = sqlx::query_as::<_, FeedbackRecord>(
            "SELECT id, name, email, feedback, created_at FROM feedback
             ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }
}
