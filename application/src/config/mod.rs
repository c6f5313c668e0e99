//! Application-level configuration.
//!
//! - [`ExplainParams`]: models and sampling for explanation requests

pub mod explain_params;

pub use explain_params::{DEFAULT_CHAT_MODEL, DEFAULT_MODERATION_MODEL, ExplainParams};
