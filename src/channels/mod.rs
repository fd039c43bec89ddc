//! Meeting title → Slack channel routing.
//!
//! Titles are typed by whoever schedules the meeting and drift over time
//! (bracket styles, trailing text), so resolution goes exact match first,
//! then containment in either direction, then the default channel.

use anyhow::{bail, Result};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// One `pattern → channel` entry of the routing table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelRoute {
    pub pattern: String,
    pub channel: String,
}

impl ChannelRoute {
    pub fn new(pattern: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            channel: channel.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawChannelTable {
    #[serde(default)]
    default: String,
    #[serde(default)]
    routes: Vec<ChannelRoute>,
}

/// Ordered routing table with a mandatory fallback channel.
///
/// Route order is significant: when several patterns overlap a title, the
/// earliest route wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawChannelTable")]
pub struct ChannelTable {
    routes: Vec<ChannelRoute>,
    default: String,
}

impl ChannelTable {
    pub fn new(routes: Vec<ChannelRoute>, default: impl Into<String>) -> Result<Self> {
        let default = default.into();
        if default.trim().is_empty() {
            bail!("channels.default must name a Slack channel");
        }

        let mut seen = HashSet::new();
        for route in &routes {
            if route.pattern.is_empty() {
                bail!("channel route patterns must not be empty");
            }
            if route.channel.trim().is_empty() {
                bail!("channel route '{}' has no channel", route.pattern);
            }
            if !seen.insert(route.pattern.as_str()) {
                warn!(
                    "Duplicate channel pattern '{}'; only the first entry is used",
                    route.pattern
                );
            }
        }

        Ok(Self { routes, default })
    }

    pub fn routes(&self) -> &[ChannelRoute] {
        &self.routes
    }

    pub fn default_channel(&self) -> &str {
        &self.default
    }

    /// Picks the destination channel for a meeting title. Never fails.
    pub fn resolve(&self, title: &str) -> &str {
        if let Some(route) = self.routes.iter().find(|route| route.pattern == title) {
            debug!("Exact channel match for '{}': {}", title, route.channel);
            return &route.channel;
        }

        if let Some(route) = self
            .routes
            .iter()
            .find(|route| title.contains(route.pattern.as_str()) || route.pattern.contains(title))
        {
            debug!(
                "Partial channel match for '{}' via '{}': {}",
                title, route.pattern, route.channel
            );
            return &route.channel;
        }

        debug!("No channel route for '{}', using default", title);
        &self.default
    }
}

impl TryFrom<RawChannelTable> for ChannelTable {
    type Error = anyhow::Error;

    fn try_from(raw: RawChannelTable) -> Result<Self> {
        Self::new(raw.routes, raw.default)
    }
}

impl Default for ChannelTable {
    fn default() -> Self {
        Self {
            routes: vec![
                ChannelRoute::new("[ONLINE] murmo - Weekly Marketing Sync", "C08MHTH29BR"),
                ChannelRoute::new("［ONLINE］Chamadhi US Weekly", "C08S4GS02RG"),
                ChannelRoute::new("[ONLINE] weekly mtg - Reina", "C09G09ZT8F7"),
            ],
            default: "C0AG7SAK8MR".to_string(),
        }
    }
}
