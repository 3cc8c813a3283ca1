#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::FixedOffset;
use reqwest::Client;

use feedboard::config::{Config, DisplayZone, StoreBackend};
use feedboard::models::{FeedbackRecord, NewFeedback};
use feedboard::state::SharedState;
use feedboard::store::{FeedbackStore, MemoryStore, StoreError};

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Post the HTML form the way HTMX does.
    pub async fn post_form_htmx(&self, data: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url("/feedback"))
            .header("hx-request", "true")
            .form(data)
            .send()
            .await
            .expect("form post failed")
    }

    /// Post the HTML form without HTMX.
    pub async fn post_form(&self, data: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url("/feedback"))
            .form(data)
            .send()
            .await
            .expect("form post failed")
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        store: StoreBackend::Memory,
        display_zone: DisplayZone::Fixed(FixedOffset::east_opt(0).unwrap()),
        max_body_size: 65_536,
        rate_limit: 100,
        rate_limit_window_secs: 60,
        trusted_proxies: vec![],
        log_level: "warn".to_string(),
    }
}

pub async fn spawn_app(store: Arc<dyn FeedbackStore>) -> TestApp {
    spawn_app_with(store, test_config()).await
}

pub async fn spawn_app_with(store: Arc<dyn FeedbackStore>, config: Config) -> TestApp {
    let (app, state) = feedboard::build_app(store, config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        state,
    }
}

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Store whose inserts always fail. Counts every call.
pub struct FailingStore {
    message: Option<String>,
    pub inserts: AtomicUsize,
}

impl FailingStore {
    pub fn new(message: Option<&str>) -> Self {
        Self {
            message: message.map(str::to_string),
            inserts: AtomicUsize::new(0),
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackStore for FailingStore {
    async fn insert(&self, _new: &NewFeedback) -> Result<FeedbackRecord, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Rejected {
            status: 500,
            message: self.message.clone(),
        })
    }

    async fn latest(&self) -> Result<Option<FeedbackRecord>, StoreError> {
        Err(StoreError::Rejected {
            status: 503,
            message: self.message.clone(),
        })
    }
}

/// Store whose inserts never complete.
pub struct StalledStore;

#[async_trait]
impl FeedbackStore for StalledStore {
    async fn insert(&self, _new: &NewFeedback) -> Result<FeedbackRecord, StoreError> {
        std::future::pending().await
    }

    async fn latest(&self) -> Result<Option<FeedbackRecord>, StoreError> {
        Ok(None)
    }
}
