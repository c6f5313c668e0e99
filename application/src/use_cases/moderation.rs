//! Moderation gate.
//!
//! Checks a prompt against the provider's moderation endpoint before the
//! chat request is issued.

use crate::ports::chat_gateway::ChatGateway;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::presentation::UserNotifier;
use crate::use_cases::error::ExplainError;
use std::sync::Arc;
use tracing::{debug, error};

/// Message shown when a prompt is rejected.
pub const FLAGGED_MESSAGE: &str =
    "Prompt contains inappropriate content and was flagged by OpenAI";

/// Rejects prompts the moderation endpoint flags.
pub struct ModerationGate {
    model: String,
    notifier: Arc<dyn UserNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ModerationGate {
    pub fn new(model: impl Into<String>, notifier: Arc<dyn UserNotifier>) -> Self {
        Self {
            model: model.into(),
            notifier,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Pass `prompt` through moderation.
    ///
    /// A flagged verdict notifies the user and fails with
    /// [`ExplainError::ModerationRejected`]; the caller must not issue the
    /// chat request afterwards.
    pub async fn check(&self, gateway: &dyn ChatGateway, prompt: &str) -> Result<(), ExplainError> {
        let verdict = gateway.moderate(prompt, &self.model).await?;

        if !verdict.flagged {
            debug!("Prompt passed moderation ({})", self.model);
            return Ok(());
        }

        error!(verdict = %verdict.raw, "{}", FLAGGED_MESSAGE);
        self.notifier.error(FLAGGED_MESSAGE);
        self.conversation_logger
            .log(ConversationEvent::moderation_rejected(&self.model, &verdict.raw));

        Err(ExplainError::ModerationRejected {
            verdict: verdict.raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::{ChatRequest, ChunkStream, GatewayError, ModerationVerdict};
    use crate::test_support::{RecordingNotifier, ScriptedGateway};
    use async_trait::async_trait;

    #[tokio::test]
    async fn unflagged_prompt_passes() {
        let notifier = Arc::new(RecordingNotifier::default());
        let gate = ModerationGate::new("text-moderation-latest", notifier.clone());
        let gateway = ScriptedGateway::default();

        gate.check(&gateway, "Explain this python ...").await.unwrap();

        assert_eq!(gateway.moderation_calls(), 1);
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn flagged_prompt_is_rejected_with_verdict() {
        let notifier = Arc::new(RecordingNotifier::default());
        let gate = ModerationGate::new("text-moderation-latest", notifier.clone());
        let gateway = ScriptedGateway::flagged();

        let err = gate.check(&gateway, "bad").await.unwrap_err();

        match err {
            ExplainError::ModerationRejected { verdict } => {
                assert_eq!(verdict["results"][0]["flagged"], true);
                assert_eq!(verdict["model"], "text-moderation-latest");
            }
            other => panic!("expected ModerationRejected, got {:?}", other),
        }
        assert_eq!(notifier.errors(), vec![FLAGGED_MESSAGE.to_string()]);
        assert_eq!(gateway.chat_calls(), 0);
    }

    struct BrokenModeration;

    #[async_trait]
    impl ChatGateway for BrokenModeration {
        async fn moderate(&self, _: &str, _: &str) -> Result<ModerationVerdict, GatewayError> {
            Err(GatewayError::Status {
                status: 401,
                body: String::new(),
            })
        }

        async fn stream_chat(&self, _: &ChatRequest) -> Result<ChunkStream, GatewayError> {
            unreachable!("chat must not be called when moderation fails")
        }
    }

    #[tokio::test]
    async fn moderation_transport_error_propagates() {
        let gate = ModerationGate::new("m", Arc::new(RecordingNotifier::default()));
        let err = gate.check(&BrokenModeration, "x").await.unwrap_err();
        assert!(matches!(err, ExplainError::AuthenticationFailed));
    }
}
