//! Explain Snippet use case.
//!
//! The full request flow for one snippet:
//! 1. Make sure a credential is set (prompting for one if needed)
//! 2. Open a display and build the prompt
//! 3. Pass the prompt through the [`ModerationGate`]
//! 4. Open a streaming chat completion and assemble it into the display
//!
//! Any failure goes through the [`ErrorClassifier`].

use crate::config::ExplainParams;
use crate::ports::chat_gateway::ChatRequest;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::presentation::{DisplayContext, DisplayHandle, PresentationSink, UserNotifier};
use crate::use_cases::classify_error::{ErrorClassifier, RecoveryAction};
use crate::use_cases::credential::CredentialService;
use crate::use_cases::error::ExplainError;
use crate::use_cases::moderation::ModerationGate;
use crate::use_cases::stream_assembler::{AssemblyOutcome, StreamAssembler};
use explain_domain::{Message, PromptTemplate, Snippet, preview};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of one explanation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplainOutcome {
    /// The answer was streamed to the display.
    Completed { answer: String },
    /// The display was closed before the answer finished.
    Closed,
    /// The request failed; the user has been notified.
    Failed(RecoveryAction),
}

/// Use case for explaining one snippet.
pub struct ExplainSnippetUseCase {
    credentials: Arc<CredentialService>,
    sink: Arc<dyn PresentationSink>,
    classifier: ErrorClassifier,
    gate: ModerationGate,
    params: ExplainParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ExplainSnippetUseCase {
    pub fn new(
        credentials: Arc<CredentialService>,
        sink: Arc<dyn PresentationSink>,
        notifier: Arc<dyn UserNotifier>,
        params: ExplainParams,
    ) -> Self {
        Self {
            classifier: ErrorClassifier::new(credentials.clone(), notifier.clone(), sink.clone()),
            gate: ModerationGate::new(params.moderation_model.clone(), notifier),
            credentials,
            sink,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.gate = self.gate.with_conversation_logger(logger.clone());
        self.conversation_logger = logger;
        self
    }

    /// Explain `snippet`, streaming the answer into a new display.
    ///
    /// `on_display` is called with the display handle as soon as it is
    /// opened, so the caller can close it (e.g. on Ctrl-C).
    pub async fn execute(
        &self,
        snippet: &Snippet,
        on_display: impl FnOnce(&DisplayHandle),
    ) -> ExplainOutcome {
        info!(
            "Explaining {} ({})",
            snippet.title(),
            snippet.language()
        );

        let mut display = None;
        let result = self.run(snippet, &mut display, on_display).await;

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.conversation_logger.log(ConversationEvent::explanation_failed(
                    snippet,
                    &e.to_string(),
                    e.status(),
                ));
                ExplainOutcome::Failed(self.classifier.classify(&e, display.as_ref()))
            }
        }
    }

    async fn run(
        &self,
        snippet: &Snippet,
        display: &mut Option<DisplayHandle>,
        on_display: impl FnOnce(&DisplayHandle),
    ) -> Result<ExplainOutcome, ExplainError> {
        let gateway = self.credentials.ensure_gateway().await?;

        let language = snippet.language().as_str();
        let handle = self.sink.create(&DisplayContext {
            title: snippet.title(),
            language: language.to_string(),
        });
        *display = Some(handle.clone());
        on_display(&handle);

        let prompt = PromptTemplate::explain_snippet(language, snippet.code());
        debug!("Prompt: {}", preview(&prompt, 200));

        self.gate.check(gateway.as_ref(), &prompt).await?;
        if handle.is_closed() {
            debug!("{} closed before the chat request", handle.id());
            return Ok(ExplainOutcome::Closed);
        }

        let request = ChatRequest {
            model: self.params.chat_model.clone(),
            messages: vec![
                Message::system(PromptTemplate::system_context()),
                Message::user(prompt),
            ],
            temperature: self.params.temperature,
        };

        let stream = tokio::select! {
            biased;
            _ = handle.closed() => return Ok(ExplainOutcome::Closed),
            stream = gateway.stream_chat(&request) => stream?,
        };

        let assembler = StreamAssembler::begin(snippet, handle, self.sink.clone());
        match assembler.consume(stream).await? {
            AssemblyOutcome::Completed {
                answer,
                saw_sentinel,
            } => {
                info!("Explanation complete ({} bytes)", answer.len());
                self.conversation_logger.log(ConversationEvent::explanation_completed(
                    snippet,
                    &self.params.chat_model,
                    &answer,
                    saw_sentinel,
                ));
                Ok(ExplainOutcome::Completed { answer })
            }
            AssemblyOutcome::Closed => Ok(ExplainOutcome::Closed),
        }
    }
}
