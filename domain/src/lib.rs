//! Domain layer for snippet-explain
//!
//! This crate contains the core logic: prompt building, stream event
//! parsing, and answer assembly. It has no dependencies on infrastructure
//! or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! - **Snippet**: the code and language tag a user wants explained
//! - **ExplanationSession**: applies raw stream chunks and produces the text
//!   the display should show after each one
//! - **ApiKey**: the credential, redacted in logs and obfuscated at rest

pub mod core;
pub mod credential;
pub mod prompt;
pub mod session;
pub mod snippet;

// Re-export commonly used types
pub use crate::core::{error::DomainError, string::preview};
pub use credential::{ApiKey, CredentialError};
pub use prompt::{PromptTemplate, SNIPPET_BEGIN, SNIPPET_END};
pub use session::{
    entities::{ChunkReport, Emission, ExplanationSession, Message, Role},
    line_buffer::LineBuffer,
    stream::{DATA_PREFIX, DONE_SENTINEL, MalformedEventLine, StreamEvent},
};
pub use snippet::{LanguageId, LineRange, Snippet};
