mod config;
mod db;
mod errors;
mod extraction;
mod interviews;
mod llm_client;
mod models;
mod notify;
mod oracle;
mod repository;
mod routes;
mod screening;
mod state;
mod storage;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::{Config, StorageConfig};
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::notify::SmtpNotifier;
use crate::oracle::LlmOracle;
use crate::repository::PgRecordStore;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{ContentStore, LocalContentStore, S3ContentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize content store
    let content: Arc<dyn ContentStore> = match &config.storage {
        StorageConfig::Local { upload_dir } => Arc::new(LocalContentStore::new(upload_dir).await?),
        StorageConfig::S3 {
            bucket,
            endpoint,
            access_key_id,
            secret_access_key,
        } => {
            let client = build_s3_client(endpoint, access_key_id, secret_access_key).await;
            Arc::new(S3ContentStore::new(client, bucket.clone()))
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let notifier = SmtpNotifier::new(&config.smtp)?;
    info!("SMTP notifier initialized ({}:{})", config.smtp.host, config.smtp.port);

    // Build app state
    let state = AppState {
        store: Arc::new(PgRecordStore::new(db)),
        content,
        oracle: Arc::new(LlmOracle(llm)),
        notifier: Arc::new(notifier),
    };

    // Build router
    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(
    endpoint: &str,
    access_key_id: &str,
    secret_access_key: &str,
) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        access_key_id,
        secret_access_key,
        None,
        None,
        "screener-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
