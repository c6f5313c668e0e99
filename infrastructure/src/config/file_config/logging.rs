//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write diagnostic logs to this file in addition to stderr.
    pub file: Option<PathBuf>,
    /// Append a JSONL transcript of explanation requests to this file.
    pub conversation_log: Option<PathBuf>,
}
