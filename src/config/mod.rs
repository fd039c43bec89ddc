use crate::channels::ChannelTable;
use crate::global;
use crate::publish::slack::DEFAULT_SLACK_ENDPOINT;
use crate::summary::claude::{DEFAULT_ANTHROPIC_ENDPOINT, DEFAULT_CLAUDE_MODEL};
use crate::transcript::fireflies::DEFAULT_FIREFLIES_ENDPOINT;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variables that override values from the config file.
pub mod env_keys {
    pub const FIREFLIES_API_KEY: &str = "FIREFLIES_API_KEY";
    pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
    pub const SLACK_BOT_TOKEN: &str = "SLACK_BOT_TOKEN";
    pub const WEBHOOK_SECRET: &str = "WEBHOOK_SECRET";
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
}

/// Process-wide settings. Built once at startup and never reloaded.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub webhook: WebhookConfig,
    pub fireflies: FirefliesConfig,
    pub anthropic: AnthropicConfig,
    pub slack: SlackConfig,
    pub channels: ChannelTable,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Bearer token the webhook caller must present. `serve` refuses to start
    /// without one unless `allow_unauthenticated` is set.
    pub secret: Option<String>,
    pub allow_unauthenticated: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FirefliesConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for FirefliesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_FIREFLIES_ENDPOINT.to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_CLAUDE_MODEL.to_string(),
            max_tokens: 2048,
            endpoint: DEFAULT_ANTHROPIC_ENDPOINT.to_string(),
            timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    pub bot_token: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            endpoint: DEFAULT_SLACK_ENDPOINT.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Config {
    /// Loads the config file (explicit path or the default location), then
    /// applies environment overrides. A missing file means built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {:?}", config_path))?;
            let config = Self::from_toml(&content)
                .with_context(|| format!("Failed to parse config file {:?}", config_path))?;
            info!("Loaded config from {:?}", config_path);
            config
        } else if path.is_some() {
            bail!("Config file {:?} does not exist", config_path);
        } else {
            info!("No config file at {:?}, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overrides credentials and listen address from the environment.
    /// `lookup` is `std::env::var` outside of tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank(env_keys::FIREFLIES_API_KEY) {
            self.fireflies.api_key = key;
        }
        if let Some(key) = non_blank(env_keys::ANTHROPIC_API_KEY) {
            self.anthropic.api_key = key;
        }
        if let Some(token) = non_blank(env_keys::SLACK_BOT_TOKEN) {
            self.slack.bot_token = token;
        }
        if let Some(secret) = non_blank(env_keys::WEBHOOK_SECRET) {
            self.webhook.secret = Some(secret);
        }
        if let Some(host) = non_blank(env_keys::HOST) {
            self.server.host = host;
        }
        if let Some(port) = non_blank(env_keys::PORT) {
            self.server.port = port.trim().parse().with_context(|| {
                format!("{} must be a port number, got '{}'", env_keys::PORT, port)
            })?;
        }

        Ok(())
    }

    /// Checks that every credential the pipeline needs is present.
    pub fn validate_credentials(&self) -> Result<()> {
        Self::check_required(self.missing_provider_credentials(true))
    }

    /// Like [`Config::validate_credentials`], minus the Slack token that a
    /// dry run never uses.
    pub fn validate_dry_run_credentials(&self) -> Result<()> {
        Self::check_required(self.missing_provider_credentials(false))
    }

    /// Startup check for `serve`: provider credentials plus a webhook secret,
    /// unless unauthenticated webhooks were explicitly allowed.
    pub fn validate_server(&self) -> Result<()> {
        let mut missing = self.missing_provider_credentials(true);
        if self.webhook_secret().is_none() && !self.webhook.allow_unauthenticated {
            missing.push(format!(
                "webhook.secret ({}, or set webhook.allow_unauthenticated = true)",
                env_keys::WEBHOOK_SECRET
            ));
        }
        Self::check_required(missing)
    }

    fn missing_provider_credentials(&self, publish: bool) -> Vec<String> {
        let mut missing = Vec::new();
        if self.fireflies.api_key.trim().is_empty() {
            missing.push(format!("fireflies.api_key ({})", env_keys::FIREFLIES_API_KEY));
        }
        if self.anthropic.api_key.trim().is_empty() {
            missing.push(format!("anthropic.api_key ({})", env_keys::ANTHROPIC_API_KEY));
        }
        if publish && self.slack.bot_token.trim().is_empty() {
            missing.push(format!("slack.bot_token ({})", env_keys::SLACK_BOT_TOKEN));
        }
        missing
    }

    fn check_required(missing: Vec<String>) -> Result<()> {
        if !missing.is_empty() {
            bail!("Missing required settings: {}", missing.join(", "));
        }
        Ok(())
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook
            .secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}
