//! Lectura Server
//!
//! A reading-annotation server: upload plain-text articles, select words
//! while reading, and capture dictionary-enriched annotations that render
//! back into the text.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectura_server::config::Config;
use lectura_server::db;
use lectura_server::dictionary::{ChatCompletionProvider, DictionaryService};
use lectura_server::routes;
use lectura_server::state::AppState;
use lectura_server::storage::AudioStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectura_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting Lectura Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Dictionary endpoint: {}", config.dictionary.base_url);

    // Initialize database
    let db_pool = db::create_pool(&config.database.url)
        .await
        .expect("Failed to initialize database");
    tracing::info!("Database initialized at {}", config.database.url);

    // Dictionary provider and cache
    let provider = ChatCompletionProvider::new(
        &config.dictionary.base_url,
        &config.dictionary.api_key,
        &config.dictionary.model,
        &config.dictionary.speech_model,
    );
    let dictionary = DictionaryService::new(Arc::new(provider), &config.dictionary.voice);

    // Pronunciation audio store, if configured. Without one, annotations
    // carry no audio URL and clients fall back to speech synthesis.
    let audio_store = match &config.storage {
        Some(storage) => match AudioStore::new(storage).await {
            Ok(store) => {
                tracing::info!("Audio store ready: {}/{}", storage.endpoint, storage.bucket);
                Some(store)
            }
            Err(e) => {
                tracing::warn!("Audio store unavailable: {}. Continuing without audio", e);
                None
            }
        },
        None => {
            tracing::info!("No audio store configured; clients use speech synthesis");
            None
        }
    };

    // Create application state and router
    let state = AppState::new(config.clone(), db_pool, dictionary, audio_store);
    let app = routes::app(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("Invalid server host/port");
    tracing::info!("Lectura Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
