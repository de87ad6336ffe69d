//! Newsroom API Gateway binary
//!
//! Loads configuration, initialises logging and metrics, opens the article
//! store and serves the router until Ctrl+C or SIGTERM.

use anyhow::Context;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use newsroom_common::{
    config::{AppConfig, ObservabilityConfig},
    metrics,
};
use newsroom_gateway::{build_store, create_router, metrics_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration (.env is read inside)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // 2. Setup logging
    init_tracing(&config.observability);

    info!(
        service = %config.observability.service_name,
        "Starting Newsroom API Gateway v{}",
        newsroom_common::VERSION
    );

    // 3. Metrics recorder
    let metrics_handle = if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                metrics::LATENCY_BUCKETS,
            )?
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        metrics::register_metrics();
        Some(handle)
    } else {
        None
    };

    // 4. Article store (connection pool lives inside)
    let store = build_store(&config).await?;

    // 5. Router
    let addr = config.bind_address();
    let state = AppState::new(config, store);
    let mut app = create_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_router(handle));
    }

    // 6. Serve
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
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
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
