//! birthday-notify binary entrypoint: HTTP API plus the daily notifier.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use birthday_common::config::AppConfig;
use birthday_common::db::{create_pool, run_migrations};
use birthday_notifier::dispatcher::Dispatcher;
use birthday_notifier::run::Notifier;
use birthday_notifier::scheduler;
use birthday_notifier::store::PgCelebrantSource;
use birthday_notifier::transport::build_transport;

use birthday_api::middleware::layers::with_http_layers;
use birthday_api::routes::create_router;
use birthday_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    if config.json_logs() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(env = %config.app_env, "Starting birthday-notify...");

    // Create database connection pool
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    run_migrations(&pool).await?;

    // Start the notifier: one run now, then every midnight
    let transport = build_transport(&config)?;
    let notifier = Notifier::new(
        Arc::new(PgCelebrantSource::new(pool.clone())),
        Dispatcher::new(
            transport,
            Duration::from_secs(config.notifier_send_timeout_secs),
        ),
    );
    let scheduler_task = tokio::spawn(scheduler::run_daily(notifier));

    // Build router
    let read_timeout = Duration::from_secs(config.http_read_timeout_secs);
    let addr = config.http_address.clone();
    let state = AppState::new(pool.clone(), config);
    let app = with_http_layers(create_router(state), read_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    tracing::info!(address = %addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Received shutdown signal, stopping gracefully...");
    scheduler_task.abort();
    pool.close().await;

    tracing::info!("birthday-notify stopped.");
    Ok(())
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
