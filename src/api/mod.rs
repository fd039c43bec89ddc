//! HTTP server for the relay.
//!
//! Provides HTTP endpoints for:
//! - Fireflies "transcription completed" webhooks
//! - Health and service info

pub mod error;
pub mod routes;

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tracing::info;

use crate::pipeline::Pipeline;

pub use routes::webhook::{BearerAuth, WebhookPayload, WebhookState};

/// Builds the full application router.
pub fn router(pipeline: Arc<Pipeline>, webhook_secret: Option<&str>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::webhook::router(WebhookState::new(
            pipeline,
            webhook_secret,
        )))
}

pub struct ApiServer {
    host: String,
    port: u16,
    app: Router,
}

impl ApiServer {
    pub fn new(host: &str, port: u16, app: Router) -> Self {
        Self {
            host: host.to_string(),
            port,
            app,
        }
    }

    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("API server listening on http://{}", addr);
        info!("Endpoints:");
        info!("  GET  /                  - Service info");
        info!("  GET  /health            - Health probe");
        info!("  POST /webhook/fireflies - Summarize and post a finished transcript");

        axum::serve(listener, self.app).await?;

        Ok(())
    }
}
