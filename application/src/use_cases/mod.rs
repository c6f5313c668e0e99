//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classify_error;
pub mod credential;
pub mod error;
pub mod explain_snippet;
pub mod moderation;
pub mod stream_assembler;
