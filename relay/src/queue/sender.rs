//! The sending seam between the producer endpoint and the broker.

use anyhow::Result;
use async_trait::async_trait;

use super::types::TextMessage;

/// Something that can put a text message on a named destination.
///
/// [`Publisher`](super::Publisher) is the broker-backed implementation.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send one message. Returns once the broker has accepted it.
    async fn send(&self, destination: &str, message: &TextMessage) -> Result<()>;
}
