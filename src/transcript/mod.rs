//! Meeting transcript model and plain-text rendering.
//!
//! A [`TranscriptRecord`] is fetched once per webhook and dropped when the
//! request finishes; nothing here is persisted.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

pub mod fireflies;

pub use fireflies::FirefliesClient;

/// Speaker label used when the provider could not attribute a sentence.
pub const UNKNOWN_SPEAKER: &str = "unknown";

/// Title used when the provider returns a transcript without one.
pub const UNTITLED_MEETING: &str = "無題の会議";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRecord {
    pub title: String,
    pub participants: Vec<ParticipantRef>,
    pub utterances: Vec<Utterance>,
}

/// A meeting participant as reported by the provider: either a bare name or
/// email, or an attendee record with optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParticipantRef {
    Plain(String),
    Structured {
        #[serde(default, rename = "displayName")]
        display_name: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
}

impl ParticipantRef {
    /// Best display name for the participant; empty when nothing is known.
    pub fn display_name(&self) -> &str {
        match self {
            ParticipantRef::Plain(name) => name.as_str(),
            ParticipantRef::Structured {
                display_name,
                name,
                email,
            } => display_name
                .as_deref()
                .or(name.as_deref())
                .or(email.as_deref())
                .unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub speaker: String,
    pub text: String,
}

impl Utterance {
    pub fn new(speaker: Option<String>, text: Option<String>) -> Self {
        Self {
            speaker: speaker.unwrap_or_else(|| UNKNOWN_SPEAKER.to_string()),
            text: text.unwrap_or_default(),
        }
    }
}

/// Prompt-ready text derived from a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTranscript {
    pub participant_names: String,
    pub text: String,
}

impl RenderedTranscript {
    /// An empty transcript means there is nothing worth summarizing.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub fn participant_names(participants: &[ParticipantRef]) -> String {
    participants
        .iter()
        .map(ParticipantRef::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn transcript_text(utterances: &[Utterance]) -> String {
    utterances
        .iter()
        .map(|u| format!("{}: {}", u.speaker, u.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render(participants: &[ParticipantRef], utterances: &[Utterance]) -> RenderedTranscript {
    RenderedTranscript {
        participant_names: participant_names(participants),
        text: transcript_text(utterances),
    }
}

/// Source of finished meeting transcripts.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `Ok(None)` when the provider knows nothing about `meeting_id`.
    async fn fetch(&self, meeting_id: &str) -> Result<Option<TranscriptRecord>>;
}
