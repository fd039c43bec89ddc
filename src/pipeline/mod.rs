//! The fetch → render → resolve → summarize → sanitize → publish chain.
//!
//! One call to [`Pipeline::run`] handles one finished meeting. Steps run
//! strictly in order and the first failure aborts the rest, so nothing is
//! posted unless every earlier step succeeded.

use anyhow::Result;
use tracing::{debug, info};

use crate::channels::ChannelTable;
use crate::publish::{PublishedMessage, Publisher};
use crate::sanitizer::SummarySanitizer;
use crate::summary::{Summarizer, SummaryRequest};
use crate::transcript::{render, TranscriptSource};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("transcript is empty")]
    EmptyTranscript,

    #[error("transcript {0} not found")]
    TranscriptNotFound(String),

    #[error("failed to fetch transcript: {0:#}")]
    Fetch(anyhow::Error),

    #[error("failed to generate summary: {0:#}")]
    Generate(anyhow::Error),

    #[error("failed to publish summary: {0:#}")]
    Publish(anyhow::Error),
}

impl PipelineError {
    /// Whether the failure was caused by the request rather than a provider.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::EmptyTranscript | PipelineError::TranscriptNotFound(_)
        )
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result of a successfully processed meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub meeting_id: String,
    pub title: String,
    pub channel: String,
    /// Sanitized summary as posted (or as it would be posted on a dry run).
    pub summary: String,
    pub published: bool,
}

pub struct Pipeline {
    source: Box<dyn TranscriptSource>,
    summarizer: Box<dyn Summarizer>,
    publisher: Box<dyn Publisher>,
    sanitizer: SummarySanitizer,
    channels: ChannelTable,
}

impl Pipeline {
    pub fn new(
        source: Box<dyn TranscriptSource>,
        summarizer: Box<dyn Summarizer>,
        publisher: Box<dyn Publisher>,
        channels: ChannelTable,
    ) -> Result<Self> {
        Ok(Self {
            source,
            summarizer,
            publisher,
            sanitizer: SummarySanitizer::new()?,
            channels,
        })
    }

    pub fn channels(&self) -> &ChannelTable {
        &self.channels
    }

    pub async fn run(&self, meeting_id: &str) -> PipelineResult<PipelineOutcome> {
        self.execute(meeting_id, true).await
    }

    /// Runs every step except the final post.
    pub async fn dry_run(&self, meeting_id: &str) -> PipelineResult<PipelineOutcome> {
        self.execute(meeting_id, false).await
    }

    async fn execute(&self, meeting_id: &str, publish: bool) -> PipelineResult<PipelineOutcome> {
        info!("Fetching transcript {} from {}", meeting_id, self.source.name());
        let record = self
            .source
            .fetch(meeting_id)
            .await
            .map_err(PipelineError::Fetch)?
            .ok_or_else(|| PipelineError::TranscriptNotFound(meeting_id.to_string()))?;

        let rendered = render(&record.participants, &record.utterances);
        if rendered.is_empty() {
            info!("Transcript {} has no sentences, skipping", meeting_id);
            return Err(PipelineError::EmptyTranscript);
        }

        let channel = self.channels.resolve(&record.title).to_string();
        info!("Meeting '{}' routes to channel {}", record.title, channel);

        let raw_summary = self
            .summarizer
            .summarize(SummaryRequest {
                title: &record.title,
                participants: &rendered.participant_names,
                transcript: &rendered.text,
            })
            .await
            .map_err(PipelineError::Generate)?;
        debug!("Raw summary from {}: {}", self.summarizer.name(), raw_summary);

        let summary = self.sanitizer.sanitize(&raw_summary);

        if publish {
            let message = PublishedMessage {
                channel: channel.clone(),
                title: record.title.clone(),
                body: summary.clone(),
            };
            self.publisher
                .publish(&message)
                .await
                .map_err(PipelineError::Publish)?;
            info!("Summary published via {}", self.publisher.name());
        }

        Ok(PipelineOutcome {
            meeting_id: meeting_id.to_string(),
            title: record.title,
            channel,
            summary,
            published: publish,
        })
    }
}
