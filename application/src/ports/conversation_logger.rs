//! Port for the explanation transcript.
//!
//! Every explanation request leaves at most one record here: the moderation
//! rejection, the finished answer, or the failure. `tracing` carries the
//! diagnostics; this port carries what was asked and what came back.

use explain_domain::Snippet;
use serde_json::{Value, json};

/// One transcript record.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    pub event_type: &'static str,
    /// Event fields; adapters add their own bookkeeping (time, run id).
    pub payload: Value,
}

impl ConversationEvent {
    pub const MODERATION_REJECTED: &'static str = "moderation_rejected";
    pub const EXPLANATION_COMPLETED: &'static str = "explanation_completed";
    pub const EXPLANATION_FAILED: &'static str = "explanation_failed";

    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// The moderation endpoint flagged the prompt; `verdict` is its raw reply.
    pub fn moderation_rejected(model: &str, verdict: &Value) -> Self {
        Self::new(
            Self::MODERATION_REJECTED,
            json!({
                "model": model,
                "verdict": verdict,
            }),
        )
    }

    /// `complete` is false when the stream ended without the sentinel.
    pub fn explanation_completed(
        snippet: &Snippet,
        model: &str,
        answer: &str,
        complete: bool,
    ) -> Self {
        Self::new(
            Self::EXPLANATION_COMPLETED,
            json!({
                "title": snippet.title(),
                "language": snippet.language().as_str(),
                "model": model,
                "complete": complete,
                "bytes": answer.len(),
                "text": answer,
            }),
        )
    }

    pub fn explanation_failed(snippet: &Snippet, error: &str, status: Option<u16>) -> Self {
        Self::new(
            Self::EXPLANATION_FAILED,
            json!({
                "title": snippet.title(),
                "language": snippet.language().as_str(),
                "error": error,
                "status": status,
            }),
        )
    }
}

/// Sink for transcript records. Synchronous and infallible; adapters swallow
/// their own write errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Used when no transcript is configured.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
