//! Client for a hosted PostgREST-style database service.
//!
//! Inserts go to `POST {base}/rest/v1/{table}` and ask for the stored row back
//! (`Prefer: return=representation`); reads use PostgREST's `order`/`limit`
//! query parameters. Error bodies are JSON objects with a `message` key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;

use super::{FeedbackStore, StoreError};
use crate::config::RestConfig;
use crate::models::{FeedbackRecord, NewFeedback};

const REQUEST_TIMEOUT_SECS: u64 = 15;
const CONNECT_TIMEOUT_SECS: u64 = 5;

pub struct RestStore {
    http: reqwest::Client,
    collection_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl RestStore {
    pub fn new(config: &RestConfig) -> Result<Self, String> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.api_key).map_err(|e| format!("Invalid API key: {e}"))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| format!("Invalid API key: {e}"))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        let collection_url = format!(
            "{}/rest/v1/{}",
            config.url.trim_end_matches('/'),
            config.table
        );

        Ok(Self {
            http,
            collection_url,
        })
    }

    async fn rows(response: reqwest::Response) -> Result<Vec<FeedbackRecord>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let rows = response.json::<Vec<FeedbackRecord>>().await?;
        Ok(rows)
    }
}

#[async_trait]
impl FeedbackStore for RestStore {
    async fn insert(&self, new: &NewFeedback) -> Result<FeedbackRecord, StoreError> {
        let response = self
            .http
            .post(&self.collection_url)
            .header("Prefer", "return=representation")
            .json(&[new])
            .send()
            .await?;

        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }

    async fn latest(&self) -> Result<Option<FeedbackRecord>, StoreError> {
        let response = self
            .http
            .get(&self.collection_url)
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        Ok(Self::rows(response).await?.into_iter().next())
    }
}
