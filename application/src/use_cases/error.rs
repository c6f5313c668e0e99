//! Errors surfaced by the explain flow.

use crate::ports::chat_gateway::GatewayError;
use crate::ports::credential_store::StoreError;
use explain_domain::CredentialError;
use thiserror::Error;

/// Errors that end an explanation request.
///
/// Every variant is routed through the
/// [`ErrorClassifier`](super::classify_error::ErrorClassifier). Malformed
/// stream lines never appear here; they are skipped inside the session.
#[derive(Error, Debug, Clone)]
pub enum ExplainError {
    #[error("Prompt contains inappropriate content and was flagged by OpenAI")]
    ModerationRejected { verdict: serde_json::Value },

    #[error("No API key provided")]
    NoCredentialProvided,

    #[error("Authentication failed (HTTP 401)")]
    AuthenticationFailed,

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Transport failed: {0}")]
    TransportFailed(String),

    #[error("Invalid credential: {0}")]
    Credential(#[from] CredentialError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ExplainError {
    /// HTTP status behind this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ExplainError::AuthenticationFailed => Some(401),
            ExplainError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<GatewayError> for ExplainError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Status { status: 401, .. } => ExplainError::AuthenticationFailed,
            GatewayError::Status { status, body } => ExplainError::RequestFailed { status, body },
            other => ExplainError::TransportFailed(other.to_string()),
        }
    }
}
