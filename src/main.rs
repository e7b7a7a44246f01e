// Main entry point for the realty listings API

use realty_api::api::{create_router, AppState};
use realty_api::auth::{AuthService, TokenSigner};
use realty_api::config::Config;
use realty_api::records::RecordService;
use realty_api::store::{JsonFileRecordStore, JsonFileUserStore};

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load and validate configuration first (before any logging)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Initialize tracing subscriber with config values
    // Must be done only once - tracing panics if init() is called multiple times
    init_tracing(&config)?;

    info!("Starting realty listings API");

    info!(
        bind_address = %config.bind_address,
        port = config.port,
        records_path = ?config.records_path,
        users_path = ?config.users_path,
        "Configuration loaded"
    );

    // 3. Initialize stores - the files on disk are the source of truth
    let record_store = Arc::new(JsonFileRecordStore::new(config.records_path.clone()));
    let user_store = Arc::new(JsonFileUserStore::new(config.users_path.clone()));

    info!("Stores initialized");

    // 4. Initialize token signer and auth service
    let signer = TokenSigner::new(
        &config.token_secret,
        Duration::from_secs(config.token_ttl_minutes * 60),
    );
    let auth = Arc::new(AuthService::new(user_store, signer));

    info!("Auth service initialized");

    // 5. Initialize record service
    let records = Arc::new(RecordService::new(record_store));

    info!("Record service initialized");

    // 6. Create AppState and router
    let app_state = AppState {
        auth,
        records,
        config: Arc::new(config.clone()),
    };

    let router = create_router(app_state);

    info!("Router created");

    // 7. Start HTTP server
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!(addr = %addr, "Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber based on configuration
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    // Create filter from RUST_LOG env var or config
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_env_filter(filter);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            info!("SIGTERM received, starting graceful shutdown");
        },
    }
}
