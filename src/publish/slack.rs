use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use super::{PublishedMessage, Publisher};
use crate::config::SlackConfig;

pub const DEFAULT_SLACK_ENDPOINT: &str = "https://slack.com/api/chat.postMessage";

/// Slack rejects header blocks longer than this.
const HEADER_TEXT_LIMIT: usize = 150;
/// Slack rejects section text longer than this.
const SECTION_TEXT_LIMIT: usize = 3000;

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: String,
    blocks: Vec<Block>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block {
    Header { text: TextObject },
    Divider,
    Section { text: TextObject },
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TextObject {
    PlainText { text: String, emoji: bool },
    Mrkdwn { text: String },
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Escapes the three characters Slack treats as control sequences in mrkdwn.
fn escape_mrkdwn(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit - 1).collect();
    truncated.push('…');
    truncated
}

/// Splits the summary at line boundaries into pieces Slack will accept.
/// A single line longer than the limit is cut mid-line.
fn split_sections(body: &str, limit: usize) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in body.split('\n') {
        let line_len = line.chars().count();
        let needed = if current.is_empty() { line_len } else { line_len + 1 };

        if current_len + needed > limit && !current.is_empty() {
            sections.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for chunk in chars.chunks(limit) {
                sections.push(chunk.iter().collect());
            }
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.trim().is_empty() {
        sections.push(current);
    }
    sections
}

fn build_blocks(message: &PublishedMessage) -> Vec<Block> {
    let mut blocks = vec![
        Block::Header {
            text: TextObject::PlainText {
                text: truncate_chars(&message.title, HEADER_TEXT_LIMIT),
                emoji: false,
            },
        },
        Block::Divider,
    ];

    blocks.extend(
        split_sections(&escape_mrkdwn(&message.body), SECTION_TEXT_LIMIT)
            .into_iter()
            .map(|text| Block::Section {
                text: TextObject::Mrkdwn { text },
            }),
    );

    blocks
}

fn build_request(message: &PublishedMessage) -> PostMessageRequest<'_> {
    PostMessageRequest {
        channel: &message.channel,
        text: format!(
            "*{}*\n\n{}",
            escape_mrkdwn(&message.title),
            escape_mrkdwn(&message.body)
        ),
        blocks: build_blocks(message),
    }
}

pub struct SlackPublisher {
    client: reqwest::Client,
    bot_token: String,
    endpoint: String,
}

impl SlackPublisher {
    pub fn new(config: &SlackConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build Slack HTTP client")?;

        Ok(Self {
            client,
            bot_token: config.bot_token.clone(),
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Publisher for SlackPublisher {
    fn name(&self) -> &'static str {
        "Slack"
    }

    async fn publish(&self, message: &PublishedMessage) -> Result<()> {
        let request = build_request(message);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.bot_token)
            .json(&request)
            .send()
            .await
            .context("Failed to send message to Slack")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read Slack response body")?;

        if !status.is_success() {
            error!(
                "Slack request failed with status {}: {}",
                status, response_text
            );
            return Err(anyhow!(
                "Slack request failed with status {}: {}",
                status,
                response_text
            ));
        }

        let parsed: PostMessageResponse =
            serde_json::from_str(&response_text).context("Failed to parse Slack response")?;

        if !parsed.ok {
            let code = parsed.error.unwrap_or_else(|| "unknown_error".to_string());
            error!("Slack API error for channel {}: {}", message.channel, code);
            return Err(anyhow!("Slack API error: {}", code));
        }

        info!(
            "Posted summary for '{}' to channel {}",
            message.title, message.channel
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(body: &str) -> PublishedMessage {
        PublishedMessage {
            channel: "C08MHTH29BR".to_string(),
            title: "[ONLINE] murmo - Weekly Marketing Sync".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_request_payload() {
        let msg = message("📋 *1. 会議サマリー*\n• 進捗確認");
        let value = serde_json::to_value(build_request(&msg)).unwrap();

        assert_eq!(
            value,
            json!({
                "channel": "C08MHTH29BR",
                "text": "*[ONLINE] murmo - Weekly Marketing Sync*\n\n📋 *1. 会議サマリー*\n• 進捗確認",
                "blocks": [
                    {
                        "type": "header",
                        "text": {
                            "type": "plain_text",
                            "text": "[ONLINE] murmo - Weekly Marketing Sync",
                            "emoji": false
                        }
                    },
                    {"type": "divider"},
                    {
                        "type": "section",
                        "text": {"type": "mrkdwn", "text": "📋 *1. 会議サマリー*\n• 進捗確認"}
                    }
                ]
            })
        );
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let mut msg = message("• A < B & C > D\n• <!channel> <https://x|y>");
        msg.title = "Q&A <sync>".to_string();
        let value = serde_json::to_value(build_request(&msg)).unwrap();

        assert_eq!(
            value["blocks"][2]["text"]["text"],
            "• A &lt; B &amp; C &gt; D\n• &lt;!channel&gt; &lt;https://x|y&gt;"
        );
        assert_eq!(
            value["text"],
            "*Q&amp;A &lt;sync&gt;*\n\n• A &lt; B &amp; C &gt; D\n• &lt;!channel&gt; &lt;https://x|y&gt;"
        );
        // The header is plain text and is shown as written.
        assert_eq!(value["blocks"][0]["text"]["text"], "Q&A <sync>");
    }

    #[test]
    fn test_escaping_leaves_markup_alone() {
        assert_eq!(escape_mrkdwn("*太字* • 項目 :memo:"), "*太字* • 項目 :memo:");
        assert_eq!(escape_mrkdwn("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_long_title_is_truncated() {
        let mut msg = message("body");
        msg.title = "会".repeat(200);
        let blocks = build_blocks(&msg);

        match &blocks[0] {
            Block::Header {
                text: TextObject::PlainText { text, .. },
            } => {
                assert_eq!(text.chars().count(), HEADER_TEXT_LIMIT);
                assert!(text.ends_with('…'));
            }
            other => panic!("expected header block, got {:?}", other),
        }
    }

    #[test]
    fn test_split_sections_keeps_lines_whole() {
        let body = "aaaa\nbbbb\ncccc";
        assert_eq!(split_sections(body, 9), vec!["aaaa\nbbbb", "cccc"]);
    }

    #[test]
    fn test_split_sections_cuts_oversized_line() {
        let body = "ab\nxxxxxxx\ncd";
        assert_eq!(split_sections(body, 3), vec!["ab", "xxx", "xxx", "x", "cd"]);
    }

    #[test]
    fn test_split_sections_short_body_is_single_section() {
        let body = "📋 *1. 会議サマリー*\n• a\n\n✅ *3. 決定事項*\n• 特になし";
        assert_eq!(split_sections(body, SECTION_TEXT_LIMIT), vec![body.to_string()]);
    }

    #[test]
    fn test_empty_body_has_no_sections() {
        assert!(split_sections("", SECTION_TEXT_LIMIT).is_empty());
    }

    #[test]
    fn test_response_parsing() {
        let ok: PostMessageResponse = serde_json::from_str(r#"{"ok": true, "ts": "1.2"}"#).unwrap();
        assert!(ok.ok);

        let failed: PostMessageResponse =
            serde_json::from_str(r#"{"ok": false, "error": "channel_not_found"}"#).unwrap();
        assert!(!failed.ok);
        assert_eq!(failed.error.as_deref(), Some("channel_not_found"));
    }
}
