//! Explanation session domain.
//!
//! - [`stream::StreamEvent`]: one decoded line of the chat completion stream
//! - [`line_buffer::LineBuffer`]: reassembles lines split across chunks
//! - [`entities::ExplanationSession`]: the growing answer for one request

pub mod entities;
pub mod line_buffer;
pub mod stream;
