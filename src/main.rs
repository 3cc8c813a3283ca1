use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use feedboard::config::{Config, StoreBackend};
use feedboard::store::{FeedbackStore, MemoryStore, PgStore, RestStore};

const LIMITER_SWEEP_SECS: u64 = 300;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting feedboard");

    let store = connect_store(&config.store).await?;

    let addr = SocketAddr::new(config.host, config.port);
    let (app, state) = feedboard::build_app(store, config);

    let sweeper = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(LIMITER_SWEEP_SECS));
        loop {
            interval.tick().await;
            state.submission_limiter.cleanup();
        }
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sweeper.abort();
    Ok(())
}

async fn connect_store(
    backend: &StoreBackend,
) -> Result<Arc<dyn FeedbackStore>, Box<dyn std::error::Error>> {
    let store: Arc<dyn FeedbackStore> = match backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, feedback is lost on restart");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Migrations applied");

            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Rest(rest) => {
            tracing::info!("Using hosted store at {}", rest.url);
            Arc::new(RestStore::new(rest)?)
        }
    };
    Ok(store)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
