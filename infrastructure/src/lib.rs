//! Infrastructure layer for snippet-explain
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod credential;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileLoggingConfig, FileOpenAiConfig, FileOutputConfig,
    Severity,
};
pub use credential::FileCredentialStore;
pub use logging::JsonlConversationLogger;
pub use openai::gateway::{DEFAULT_BASE_URL, OpenAiConnector, OpenAiGateway, OpenAiSettings};
