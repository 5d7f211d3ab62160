//! Queue message types.
//!
//! Messages on the relay queue are plain text: no envelope, no identifier,
//! no schema. The body bytes are the UTF-8 payload.

use std::fmt;
use std::str::Utf8Error;

use thiserror::Error;

/// Default destination shared by the producer and the consumer.
pub const DEFAULT_QUEUE: &str = "DEV.QUEUE.1";

/// Payload the producer endpoint publishes on every call.
pub const HELLO_WORLD: &str = "Hello World!";

/// Content type stamped on every published message.
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Failure to turn a delivery body into a [`TextMessage`].
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("message body is not valid UTF-8 text")]
    NotText {
        #[source]
        source: Utf8Error,
    },
}

/// A text message travelling through the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub payload: String,
}

impl TextMessage {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Decode a delivery body.
    pub fn from_bytes(body: &[u8]) -> Result<Self, PayloadError> {
        let payload = std::str::from_utf8(body).map_err(|source| PayloadError::NotText { source })?;
        Ok(Self::new(payload))
    }

    /// Body bytes to publish.
    pub fn as_bytes(&self) -> &[u8] {
        self.payload.as_bytes()
    }
}

impl fmt::Display for TextMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)
    }
}
