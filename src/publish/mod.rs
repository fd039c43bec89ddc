//! Delivery of finished summaries to chat.

use anyhow::Result;
use async_trait::async_trait;

pub mod slack;

pub use slack::SlackPublisher;

/// A summary ready to post. Built once per request and dropped after delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub channel: String,
    pub title: String,
    pub body: String,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Delivers the message once. Any provider rejection is an error.
    async fn publish(&self, message: &PublishedMessage) -> Result<()>;
}
