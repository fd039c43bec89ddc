use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::{ParticipantRef, TranscriptRecord, TranscriptSource, Utterance, UNTITLED_MEETING};
use crate::config::FirefliesConfig;

pub const DEFAULT_FIREFLIES_ENDPOINT: &str = "https://api.fireflies.ai/graphql";

const TRANSCRIPT_QUERY: &str = r#"
query Transcript($transcriptId: String!) {
  transcript(id: $transcriptId) {
    title
    participants
    meeting_attendees {
      displayName
      name
      email
    }
    sentences {
      speaker_name
      text
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: TranscriptVariables<'a>,
}

#[derive(Debug, Serialize)]
struct TranscriptVariables<'a> {
    #[serde(rename = "transcriptId")]
    transcript_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<TranscriptData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptData {
    transcript: Option<FirefliesTranscript>,
}

#[derive(Debug, Deserialize)]
struct FirefliesTranscript {
    title: Option<String>,
    #[serde(default)]
    participants: Option<Vec<ParticipantRef>>,
    #[serde(default)]
    meeting_attendees: Option<Vec<ParticipantRef>>,
    #[serde(default)]
    sentences: Option<Vec<Sentence>>,
}

#[derive(Debug, Deserialize)]
struct Sentence {
    speaker_name: Option<String>,
    text: Option<String>,
}

impl From<FirefliesTranscript> for TranscriptRecord {
    fn from(transcript: FirefliesTranscript) -> Self {
        let title = transcript
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED_MEETING.to_string());

        // Attendee records carry display names; the flat list is mostly emails.
        let participants = match transcript.meeting_attendees {
            Some(attendees) if !attendees.is_empty() => attendees,
            _ => transcript.participants.unwrap_or_default(),
        };

        let utterances = transcript
            .sentences
            .unwrap_or_default()
            .into_iter()
            .map(|s| Utterance::new(s.speaker_name, s.text))
            .collect();

        Self {
            title,
            participants,
            utterances,
        }
    }
}

fn into_record(response: GraphQlResponse) -> Result<Option<TranscriptRecord>> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(anyhow!("Fireflies API error: {}", messages.join("; ")));
    }

    Ok(response
        .data
        .and_then(|data| data.transcript)
        .map(TranscriptRecord::from))
}

pub struct FirefliesClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl FirefliesClient {
    pub fn new(config: &FirefliesConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build Fireflies HTTP client")?;

        info!("Initialized Fireflies client with endpoint: {}", config.endpoint);

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl TranscriptSource for FirefliesClient {
    fn name(&self) -> &'static str {
        "Fireflies"
    }

    async fn fetch(&self, meeting_id: &str) -> Result<Option<TranscriptRecord>> {
        debug!("Fetching transcript {} from Fireflies", meeting_id);

        let request = GraphQlRequest {
            query: TRANSCRIPT_QUERY,
            variables: TranscriptVariables {
                transcript_id: meeting_id,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to request transcript from Fireflies")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read Fireflies response body")?;

        if !status.is_success() {
            error!(
                "Fireflies request failed with status {}: {}",
                status, response_text
            );
            return Err(anyhow!(
                "Fireflies request failed with status {}: {}",
                status,
                response_text
            ));
        }

        let parsed: GraphQlResponse =
            serde_json::from_str(&response_text).context("Failed to parse Fireflies response")?;

        let record = into_record(parsed)?;
        if let Some(record) = &record {
            info!(
                "Fetched transcript '{}': {} participants, {} sentences",
                record.title,
                record.participants.len(),
                record.utterances.len()
            );
        }
        Ok(record)
    }
}
