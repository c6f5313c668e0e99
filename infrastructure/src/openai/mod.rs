//! OpenAI adapter
//!
//! Implements [`ChatGateway`](explain_application::ChatGateway) over the
//! OpenAI HTTP API: `/v1/moderations` and streaming `/v1/chat/completions`.

pub mod gateway;
pub mod protocol;
