//! Request parameters for the explain flow.

use serde::{Deserialize, Serialize};

/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
/// Default moderation model.
pub const DEFAULT_MODERATION_MODEL: &str = "text-moderation-latest";

/// Model selection and sampling for one explanation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainParams {
    /// Chat completion model.
    pub chat_model: String,
    /// Moderation model.
    pub moderation_model: String,
    /// Sampling temperature; 0 keeps explanations reproducible.
    pub temperature: f32,
}

impl Default for ExplainParams {
    fn default() -> Self {
        Self {
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            moderation_model: DEFAULT_MODERATION_MODEL.to_string(),
            temperature: 0.0,
        }
    }
}

impl ExplainParams {
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn with_moderation_model(mut self, model: impl Into<String>) -> Self {
        self.moderation_model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
