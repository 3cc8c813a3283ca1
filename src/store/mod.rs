pub mod memory;
pub mod postgres;
pub mod rest;

use async_trait::async_trait;

use crate::models::{FeedbackRecord, NewFeedback};

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use rest::RestStore;

/// The remote `feedback` collection.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Insert one record. The store assigns `id` and `created_at`.
    async fn insert(&self, new: &NewFeedback) -> Result<FeedbackRecord, StoreError>;

    /// Most recent record by `created_at`, if any.
    async fn latest(&self) -> Result<Option<FeedbackRecord>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// The store answered with a non-success status.
    Rejected { status: u16, message: Option<String> },
    Transport(reqwest::Error),
    Decode(String),
    Database(sqlx::Error),
}

impl StoreError {
    /// Message suitable for showing to the person who submitted, when there is one.
    pub fn user_message(&self) -> Option<String> {
        match self {
            StoreError::Rejected { message, .. } => {
                message.as_ref().filter(|m| !m.trim().is_empty()).cloned()
            }
            StoreError::Transport(_) => Some("Could not reach the feedback service.".to_string()),
            StoreError::Decode(_) | StoreError::Database(_) => None,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Rejected {
                status,
                message: Some(msg),
            } => write!(f, "Rejected by store ({status}): {msg}"),
            StoreError::Rejected {
                status,
                message: None,
            } => write!(f, "Rejected by store ({status})"),
            StoreError::Transport(err) => write!(f, "Transport error: {err}"),
            StoreError::Decode(msg) => write!(f, "Decode error: {msg}"),
            StoreError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Transport(err)
        }
    }
}
