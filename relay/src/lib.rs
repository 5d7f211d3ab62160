//! Relay - a minimal HTTP-to-queue message relay.
//!
//! This library provides shared modules for the two relay binaries:
//! - `relay-producer`: Web server that enqueues a greeting on request
//! - `relay-consumer`: Queue listener that prints every message it receives
//!
//! ## Architecture
//!
//! ```text
//! GET /api/v1/produce-message → Producer → DEV.QUEUE.1 → Consumer → stdout
//! ```

pub mod config;
pub mod consumer;
pub mod listener;
pub mod queue;
pub mod signal;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use listener::print_message;
pub use queue::{MessageSender, Publisher, TextMessage, DEFAULT_QUEUE, HELLO_WORLD};
pub use web::{router, AppState};
