//! Application layer for snippet-explain
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{DEFAULT_CHAT_MODEL, DEFAULT_MODERATION_MODEL, ExplainParams};
pub use ports::{
    chat_gateway::{
        ChatGateway, ChatRequest, ChunkStream, GatewayConnector, GatewayError, ModerationVerdict,
    },
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    credential_store::{CREDENTIAL_KEY, CredentialPrompter, CredentialStore, StoreError},
    presentation::{
        DisplayContext, DisplayHandle, DisplayId, NoNotifier, PresentationSink, UserNotifier,
        dispose_display,
    },
};
pub use use_cases::classify_error::{ErrorClassifier, RecoveryAction};
pub use use_cases::credential::{CredentialService, CredentialSource};
pub use use_cases::error::ExplainError;
pub use use_cases::explain_snippet::{ExplainOutcome, ExplainSnippetUseCase};
pub use use_cases::moderation::ModerationGate;
pub use use_cases::stream_assembler::{AssemblyOutcome, StreamAssembler};
