//! Chat Gateway port
//!
//! Defines the interface for talking to a chat-completion provider: the
//! moderation check and the streaming completion request.

use async_trait::async_trait;
use explain_domain::{ApiKey, Message};
use futures::stream::BoxStream;
use std::sync::Arc;
use thiserror::Error;

/// Raw byte chunks of a streaming response, in arrival order.
///
/// Finite and not restartable: once it yields `None` the response is over.
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>, GatewayError>>;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider answered with a non-success HTTP status.
    ///
    /// `body` is the error body as far as it could be read.
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client configuration error: {0}")]
    Client(String),
}

impl GatewayError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A streaming chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

/// Result of a moderation check
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationVerdict {
    /// `results[0].flagged` of the moderation response.
    pub flagged: bool,
    /// The full response, kept for diagnostics.
    pub raw: serde_json::Value,
}

/// Gateway for chat-completion communication
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Submit `input` to the moderation endpoint.
    async fn moderate(&self, input: &str, model: &str) -> Result<ModerationVerdict, GatewayError>;

    /// Open a streaming chat completion.
    ///
    /// Returns once the response head has arrived; a non-success status is
    /// reported here as [`GatewayError::Status`].
    async fn stream_chat(&self, request: &ChatRequest) -> Result<ChunkStream, GatewayError>;
}

/// Builds a [`ChatGateway`] bound to one credential.
pub trait GatewayConnector: Send + Sync {
    fn connect(&self, key: &ApiKey) -> Result<Arc<dyn ChatGateway>, GatewayError>;
}
