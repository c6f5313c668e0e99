//! Event-line parsing for the chat completion stream.
//!
//! The transport delivers lines of the form `data: {json}` terminated by a
//! `data: [DONE]` sentinel. [`StreamEvent::parse_line`] turns one such line
//! into a typed event; undecodable payloads become
//! [`StreamEvent::Malformed`] instead of an error so the caller can skip
//! them and keep the session alive.

use serde::Deserialize;
use thiserror::Error;

/// Prefix marking an event line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload signalling the end of the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// A line that could not be decoded as a chunk event.
///
/// Recovered locally: it is logged and skipped, never surfaced to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not parse stream message: {reason}")]
pub struct MalformedEventLine {
    /// The payload exactly as received (prefix stripped).
    pub line: String,
    pub reason: String,
}

/// Wire shape of one streamed chunk: `{choices: [{delta: {content?}}]}`.
#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// An event in a streaming chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A decoded chunk. `content` is absent for role-only or empty deltas.
    Delta { content: Option<String> },
    /// The terminal sentinel.
    Done,
    /// The payload was not a decodable chunk.
    Malformed(MalformedEventLine),
}

impl StreamEvent {
    /// Parse one line of the stream. The caller has already dropped blank lines.
    pub fn parse_line(line: &str) -> Self {
        let line = line.trim_end_matches('\r');
        let payload = line.strip_prefix(DATA_PREFIX).unwrap_or(line);

        if payload == DONE_SENTINEL {
            return StreamEvent::Done;
        }

        match serde_json::from_str::<ChatCompletionChunk>(payload) {
            Ok(chunk) => StreamEvent::Delta {
                content: chunk.choices.into_iter().next().and_then(|c| c.delta.content),
            },
            Err(e) => StreamEvent::Malformed(MalformedEventLine {
                line: payload.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Text fragment carried by this event, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta { content } => content.as_deref(),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done)
    }
}
