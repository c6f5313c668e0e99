//! Configuration file loading for snippet-explain
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `SNIPPET_EXPLAIN_*`
//! 2. `--config <path>` specified file
//! 3. Project root: `./explain.toml` or `./.explain.toml`
//! 4. Global: `{config_dir}/snippet-explain/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileLoggingConfig, FileOpenAiConfig, FileOutputConfig, Severity,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILES};
