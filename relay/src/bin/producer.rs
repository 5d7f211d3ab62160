//! Relay Producer - enqueues a greeting on every request.
//!
//! This binary provides a small web server that:
//! - Answers `GET /api/v1/produce-message`
//! - Publishes `Hello World!` to the relay queue
//! - Returns 202 Accepted once the broker has taken it

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay::{router, signal::shutdown_signal, AppState, Config, Publisher};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        amqp_url = %config.redacted_amqp_url(),
        queue = %config.queue_name,
        port = config.port,
        "config_loaded"
    );

    // The publisher connects lazily on the first request
    let publisher = Publisher::with_durability(config.amqp_url.clone(), config.queue_durable);
    info!("rabbitmq_publisher_created");

    let addr = config.socket_addr();
    let state = AppState::new(config, Arc::new(publisher.clone()));
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("web_server_shutting_down");
        })
        .await
        .context("Server error")?;

    publisher.close().await;

    info!("web_server_shutdown_complete");

    Ok(())
}
