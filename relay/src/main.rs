//! Relay Consumer - prints every message delivered on the relay queue.
//!
//! The listener callback is subscribed explicitly here at startup; each
//! delivery is written to stdout as `Received message: <payload>`.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay::{consumer, print_message, signal::shutdown_signal, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
        .init();

    tracing::info!("consumer_starting");

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(
        amqp_url = %config.redacted_amqp_url(),
        queue = %config.queue_name,
        consumer_tag = %config.consumer_tag,
        prefetch_count = config.prefetch_count,
        reconnect_delay_ms = config.reconnect_delay_ms,
        "config_loaded"
    );

    consumer::run(&config, print_message, shutdown_signal()).await?;

    Ok(())
}
