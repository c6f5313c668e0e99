//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types where
//! a use case needs them.

mod logging;
mod openai;
mod output;
mod validation;

pub use logging::FileLoggingConfig;
pub use openai::FileOpenAiConfig;
pub use output::FileOutputConfig;
pub use validation::{ConfigIssue, Severity};

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// OpenAI endpoint, models and sampling
    pub openai: FileOpenAiConfig,
    /// Terminal output settings
    pub output: FileOutputConfig,
    /// Log file destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.openai.validate();

        if let (Some(file), Some(transcript)) =
            (&self.logging.file, &self.logging.conversation_log)
            && file == transcript
        {
            issues.push(ConfigIssue::error(
                "logging.conversation_log",
                format!("same path as logging.file ({})", file.display()),
            ));
        }

        issues
    }

    /// Whether any issue is fatal.
    pub fn has_errors(&self) -> bool {
        self.validate().iter().any(ConfigIssue::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[openai]
api_key_env = "MY_OPENAI_KEY"
base_url = "http://localhost:8080"
chat_model = "gpt-4o-mini"
temperature = 0.2
connect_timeout_secs = 10

[output]
color = false
show_progress = false

[logging]
file = "/tmp/snippet-explain.log"
conversation_log = "/tmp/snippet-explain.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.openai.api_key_env, "MY_OPENAI_KEY");
        assert_eq!(config.openai.base_url, "http://localhost:8080");
        assert_eq!(config.openai.chat_model, "gpt-4o-mini");
        assert_eq!(config.openai.moderation_model, "text-moderation-latest");
        assert_eq!(config.openai.connect_timeout_secs, Some(10));
        assert!(!config.output.color);
        assert!(!config.output.show_progress);
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("/tmp/snippet-explain.jsonl"))
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[output]\ncolor = false\n").unwrap();
        assert!(!config.output.color);
        assert!(config.output.show_progress);
        assert_eq!(config.openai, FileOpenAiConfig::default());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(!config.has_errors());
    }

    #[test]
    fn test_validate_shared_log_path() {
        let mut config = FileConfig::default();
        config.logging.file = Some(PathBuf::from("out.log"));
        config.logging.conversation_log = Some(PathBuf::from("out.log"));

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "logging.conversation_log");
        assert!(config.has_errors());
    }
}
