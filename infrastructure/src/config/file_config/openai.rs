//! OpenAI configuration from TOML (`[openai]` section)

use super::validation::ConfigIssue;
use explain_application::{DEFAULT_CHAT_MODEL, DEFAULT_MODERATION_MODEL, ExplainParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable read for the API key (default: "OPENAI_API_KEY").
    /// A key found there is used for the process without being stored.
    pub api_key_env: String,
    /// Base URL of the API.
    pub base_url: String,
    /// Chat completion model.
    pub chat_model: String,
    /// Moderation model.
    pub moderation_model: String,
    /// Sampling temperature (0..=2).
    pub temperature: f32,
    /// TCP connect timeout in seconds; unset means the client default.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: crate::openai::gateway::DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            moderation_model: DEFAULT_MODERATION_MODEL.to_string(),
            temperature: 0.0,
            connect_timeout_secs: None,
        }
    }
}

impl FileOpenAiConfig {
    pub fn to_explain_params(&self) -> ExplainParams {
        ExplainParams::default()
            .with_chat_model(self.chat_model.trim())
            .with_moderation_model(self.moderation_model.trim())
            .with_temperature(self.temperature)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.chat_model.trim().is_empty() {
            issues.push(ConfigIssue::error("openai.chat_model", "model name is empty"));
        }
        if self.moderation_model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "openai.moderation_model",
                "model name is empty",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::error(
                "openai.temperature",
                format!("{} is outside 0..=2", self.temperature),
            ));
        }
        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error("openai.base_url", "base URL is empty"));
        }
        if self.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                "openai.api_key_env",
                "no environment variable configured; the key must be entered or stored",
            ));
        }
        if self.connect_timeout_secs == Some(0) {
            issues.push(ConfigIssue::warning(
                "openai.connect_timeout_secs",
                "a zero timeout makes every connection fail",
            ));
        }

        issues
    }
}
