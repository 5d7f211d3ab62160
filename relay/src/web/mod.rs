//! Web server module for the producer.
//!
//! This module provides the producer's HTTP surface:
//! - `GET /api/v1/produce-message` enqueues the fixed greeting
//! - `GET /health` for liveness probes

pub mod handlers;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{health, produce_message, AppState, HealthResponse};

/// Path of the producer endpoint.
pub const PRODUCE_MESSAGE_PATH: &str = "/api/v1/produce-message";

/// Build the producer's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(PRODUCE_MESSAGE_PATH, get(produce_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::queue::{MessageSender, TextMessage};
    use crate::Config;

    /// Records every send instead of talking to a broker.
    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(String, TextMessage)>>,
    }

    #[async_trait]
    impl MessageSender for RecordingSender {
        async fn send(&self, destination: &str, message: &TextMessage) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((destination.to_string(), message.clone()));
            Ok(())
        }
    }

    /// Behaves like an unreachable broker.
    struct FailingSender;

    #[async_trait]
    impl MessageSender for FailingSender {
        async fn send(&self, _destination: &str, _message: &TextMessage) -> Result<()> {
            Err(anyhow!("connection refused"))
        }
    }

    fn get(path: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_produce_message_enqueues_hello_world() {
        let sender = Arc::new(RecordingSender::default());
        let app = router(AppState::new(Config::default(), sender.clone()));

        let response = app.oneshot(get(PRODUCE_MESSAGE_PATH)).await.unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "DEV.QUEUE.1");
        assert_eq!(sent[0].1.payload, "Hello World!");
    }

    #[tokio::test]
    async fn test_produce_message_once_per_call() {
        let sender = Arc::new(RecordingSender::default());
        let app = router(AppState::new(Config::default(), sender.clone()));

        for _ in 0..3 {
            let response = app.clone().oneshot(get(PRODUCE_MESSAGE_PATH)).await.unwrap();
            assert_eq!(response.status(), StatusCode::ACCEPTED);
        }

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|(_, m)| m.payload == "Hello World!"));
    }

    #[tokio::test]
    async fn test_produce_message_uses_configured_queue() {
        let sender = Arc::new(RecordingSender::default());
        let config = Config {
            queue_name: "TEST.QUEUE.7".to_string(),
            ..Config::default()
        };
        let app = router(AppState::new(config, sender.clone()));

        app.oneshot(get(PRODUCE_MESSAGE_PATH)).await.unwrap();

        assert_eq!(sender.sent.lock().unwrap()[0].0, "TEST.QUEUE.7");
    }

    #[tokio::test]
    async fn test_produce_message_sender_failure_is_server_error() {
        let app = router(AppState::new(Config::default(), Arc::new(FailingSender)));

        let response = app.oneshot(get(PRODUCE_MESSAGE_PATH)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_produce_message_rejects_post() {
        let sender = Arc::new(RecordingSender::default());
        let app = router(AppState::new(Config::default(), sender.clone()));

        let request = Request::builder()
            .method(Method::POST)
            .uri(PRODUCE_MESSAGE_PATH)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(AppState::new(Config::default(), Arc::new(FailingSender)));

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let app = router(AppState::new(Config::default(), Arc::new(FailingSender)));

        let response = app.oneshot(get("/api/v1/other")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
