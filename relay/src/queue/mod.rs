//! Queue module for broker operations.
//!
//! This module provides:
//! - The text message type carried on the relay queue
//! - The `MessageSender` seam used by the producer endpoint
//! - An async publisher implementing it over AMQP
//!
//! ## Flow
//!
//! ```text
//! GET /api/v1/produce-message → Publisher → DEV.QUEUE.1 → relay-consumer → stdout
//! ```

pub mod publisher;
pub mod sender;
pub mod types;

pub use publisher::Publisher;
pub use sender::MessageSender;
pub use types::{PayloadError, TextMessage, DEFAULT_QUEUE, HELLO_WORLD, TEXT_CONTENT_TYPE};
