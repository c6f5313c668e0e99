//! Wire types for the OpenAI HTTP API.
//!
//! Only the fields this client reads or writes are modelled. Stream event
//! lines are parsed in the domain layer, not here.

use explain_domain::Message;
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/chat/completions`
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub temperature: f32,
    pub stream: bool,
}

/// Body of `POST /v1/moderations`
#[derive(Debug, Serialize)]
pub struct ModerationRequest<'a> {
    pub input: &'a str,
    pub model: &'a str,
}

/// Response of `POST /v1/moderations`
#[derive(Debug, Deserialize)]
pub struct ModerationResponse {
    #[serde(default)]
    pub results: Vec<ModerationResult>,
}

#[derive(Debug, Deserialize)]
pub struct ModerationResult {
    #[serde(default)]
    pub flagged: bool,
}

impl ModerationResponse {
    /// Verdict of the first result. No results means not flagged.
    pub fn flagged(&self) -> bool {
        self.results.first().is_some_and(|r| r.flagged)
    }
}
