use crate::api::{self, ApiServer};
use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::publish::SlackPublisher;
use crate::summary::ClaudeClient;
use crate::transcript::FirefliesClient;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Wires the provider clients and channel table into a pipeline.
/// A dry-run pipeline never publishes, so it does not need a Slack token.
pub fn build_pipeline(config: Config, dry_run: bool) -> Result<Pipeline> {
    if dry_run {
        config.validate_dry_run_credentials()?;
    } else {
        config.validate_credentials()?;
    }

    let source = FirefliesClient::new(&config.fireflies)?;
    let summarizer = ClaudeClient::new(&config.anthropic)?;
    let publisher = SlackPublisher::new(&config.slack)?;

    Pipeline::new(
        Box::new(source),
        Box::new(summarizer),
        Box::new(publisher),
        config.channels,
    )
}

pub async fn run_service(config: Config) -> Result<()> {
    info!("Starting transcript-relay service");
    config.validate_server()?;

    let host = config.server.host.clone();
    let port = config.server.port;
    let webhook_secret = config.webhook_secret().map(str::to_string);

    if webhook_secret.is_none() {
        warn!("webhook.allow_unauthenticated is set; webhook calls are not authenticated");
    }

    let pipeline = Arc::new(build_pipeline(config, false)?);
    info!(
        "Loaded {} channel routes (default {})",
        pipeline.channels().routes().len(),
        pipeline.channels().default_channel()
    );

    let app = api::router(pipeline, webhook_secret.as_deref());
    ApiServer::new(&host, port, app).start().await
}
