//! Prompt domain
//!
//! Templates for the explanation request and the code block header.

mod template;

pub use template::{PromptTemplate, SNIPPET_BEGIN, SNIPPET_END};
