//! Async AMQP publisher for enqueueing text messages.
//!
//! The publisher is a cheap cloneable handle shared by every request
//! handler. It connects lazily on the first send and reconnects on the next
//! send after a failure.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use lapin::{
    options::{BasicPublishOptions, ConfirmSelectOptions, QueueDeclareOptions},
    types::FieldTable,
    BasicProperties, Channel, Connection, ConnectionProperties,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::sender::MessageSender;
use super::types::{TextMessage, TEXT_CONTENT_TYPE};

/// Async AMQP publisher with connection management.
#[derive(Clone)]
pub struct Publisher {
    inner: Arc<PublisherInner>,
}

struct PublisherInner {
    url: String,
    durable: bool,
    connection: RwLock<Option<Connection>>,
    channel: RwLock<Option<Channel>>,
    /// Queues declared on the current connection
    declared: Mutex<HashSet<String>>,
}

impl Publisher {
    /// Create a new publisher for the given broker URL. No I/O happens here.
    pub fn new(url: String) -> Self {
        Self::with_durability(url, false)
    }

    /// Create a publisher that declares its queues durable or not.
    pub fn with_durability(url: String, durable: bool) -> Self {
        Self {
            inner: Arc::new(PublisherInner {
                url,
                durable,
                connection: RwLock::new(None),
                channel: RwLock::new(None),
                declared: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// Ensure we have a valid connection and channel.
    async fn ensure_connected(&self) -> Result<Channel> {
        {
            let channel = self.inner.channel.read().await;
            if let Some(ch) = channel.as_ref() {
                if ch.status().connected() {
                    return Ok(ch.clone());
                }
            }
        }

        let mut connection = self.inner.connection.write().await;
        let mut channel = self.inner.channel.write().await;

        // Double-check after acquiring write lock
        if let Some(ch) = channel.as_ref() {
            if ch.status().connected() {
                return Ok(ch.clone());
            }
        }

        info!("rabbitmq_publisher_connecting");

        let conn = Connection::connect(&self.inner.url, ConnectionProperties::default())
            .await
            .context("Failed to connect to message broker")?;

        info!("rabbitmq_publisher_connected");

        let ch = conn
            .create_channel()
            .await
            .context("Failed to create channel")?;

        ch.confirm_select(ConfirmSelectOptions::default())
            .await
            .context("Failed to enable publisher confirms")?;

        // A fresh connection has declared nothing yet
        self.inner.declared.lock().await.clear();

        *connection = Some(conn);
        *channel = Some(ch.clone());

        Ok(ch)
    }

    /// Declare `queue` on `channel` unless this connection already did.
    async fn ensure_declared(&self, channel: &Channel, queue: &str) -> Result<()> {
        let mut declared = self.inner.declared.lock().await;
        if declared.contains(queue) {
            return Ok(());
        }

        channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: self.inner.durable,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .with_context(|| format!("Failed to declare queue {}", queue))?;

        info!(queue = queue, durable = self.inner.durable, "rabbitmq_queue_declared");

        declared.insert(queue.to_string());
        Ok(())
    }

    /// Forget the cached channel so the next send reconnects.
    async fn invalidate(&self) {
        let mut connection = self.inner.connection.write().await;
        let mut channel = self.inner.channel.write().await;
        channel.take();
        connection.take();
    }

    async fn publish(&self, destination: &str, message: &TextMessage) -> Result<()> {
        let channel = self.ensure_connected().await?;
        self.ensure_declared(&channel, destination).await?;

        let confirmation = channel
            .basic_publish(
                "",
                destination,
                BasicPublishOptions::default(),
                message.as_bytes(),
                BasicProperties::default().with_content_type(TEXT_CONTENT_TYPE.into()),
            )
            .await
            .with_context(|| format!("Failed to publish to {}", destination))?
            .await
            .context("Failed to confirm publish")?;

        if confirmation.is_nack() {
            bail!("Broker rejected message published to {}", destination);
        }

        Ok(())
    }

    /// Close the connection gracefully.
    pub async fn close(&self) {
        let mut connection = self.inner.connection.write().await;
        let mut channel = self.inner.channel.write().await;

        if let Some(ch) = channel.take() {
            if let Err(e) = ch.close(200, "Normal shutdown").await {
                warn!(error = %e, "rabbitmq_channel_close_error");
            }
        }

        if let Some(conn) = connection.take() {
            if let Err(e) = conn.close(200, "Normal shutdown").await {
                warn!(error = %e, "rabbitmq_connection_close_error");
            }
        }

        info!("rabbitmq_publisher_closed");
    }
}

#[async_trait]
impl MessageSender for Publisher {
    async fn send(&self, destination: &str, message: &TextMessage) -> Result<()> {
        match self.publish(destination, message).await {
            Ok(()) => {
                info!(
                    queue = destination,
                    body_length = message.payload.len(),
                    "rabbitmq_message_published"
                );
                Ok(())
            }
            Err(e) => {
                self.invalidate().await;
                Err(e)
            }
        }
    }
}
