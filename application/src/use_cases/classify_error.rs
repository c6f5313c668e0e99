//! Error classifier.
//!
//! Turns any [`ExplainError`] into exactly one user notification and a
//! [`RecoveryAction`], and always releases the display.

use crate::ports::presentation::{DisplayHandle, PresentationSink, UserNotifier, dispose_display};
use crate::use_cases::credential::CredentialService;
use crate::use_cases::error::ExplainError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

pub const INVALID_KEY_MESSAGE: &str = "Invalid OpenAI API key";
pub const GENERIC_REQUEST_MESSAGE: &str =
    "An error occurred during OpenAI request, please check the log for more details";
pub const NO_KEY_MESSAGE: &str = "No API key provided";

/// What the caller should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryAction {
    /// The key was rejected and cleared; ask for a new one.
    PromptForCredential,
    /// A diagnostic was shown to the user.
    ShowDiagnostic(String),
    /// Nothing further to do.
    Dismiss,
}

/// Classification itself failed.
#[derive(Error, Debug)]
#[error("{0}")]
struct ClassificationFailed(#[from] ExplainError);

pub struct ErrorClassifier {
    credentials: Arc<CredentialService>,
    notifier: Arc<dyn UserNotifier>,
    sink: Arc<dyn PresentationSink>,
}

impl ErrorClassifier {
    pub fn new(
        credentials: Arc<CredentialService>,
        notifier: Arc<dyn UserNotifier>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            credentials,
            notifier,
            sink,
        }
    }

    /// Classify `err`, notify the user once and dispose `display`.
    ///
    /// Never fails.
    pub fn classify(&self, err: &ExplainError, display: Option<&DisplayHandle>) -> RecoveryAction {
        let action = match self.try_classify(err) {
            Ok(action) => action,
            Err(e) => {
                error!("Failed to handle error '{}': {}", err, e);
                let message = format!("Unknown error occurred: {}", e);
                self.notifier.error(&message);
                RecoveryAction::ShowDiagnostic(message)
            }
        };

        if let Some(display) = display {
            dispose_display(self.sink.as_ref(), display);
        }
        action
    }

    fn try_classify(&self, err: &ExplainError) -> Result<RecoveryAction, ClassificationFailed> {
        match err {
            ExplainError::AuthenticationFailed => {
                error!("OpenAI request rejected: HTTP 401");
                self.credentials.reset()?;
                self.notifier.error(INVALID_KEY_MESSAGE);
                Ok(RecoveryAction::PromptForCredential)
            }
            ExplainError::RequestFailed { status, body } => {
                error!(status = *status, body = %body, "OpenAI request failed");
                let message = format!(
                    "An error occurred during OpenAI request: {}",
                    error_message(*status, body)
                );
                self.notifier.error(&message);
                Ok(RecoveryAction::ShowDiagnostic(message))
            }
            ExplainError::TransportFailed(cause) => {
                error!("OpenAI request failed: {}", cause);
                self.notifier.error(GENERIC_REQUEST_MESSAGE);
                Ok(RecoveryAction::ShowDiagnostic(GENERIC_REQUEST_MESSAGE.to_string()))
            }
            ExplainError::ModerationRejected { .. } => Ok(RecoveryAction::Dismiss),
            ExplainError::NoCredentialProvided => {
                warn!("Explanation aborted: no API key");
                self.notifier.error(NO_KEY_MESSAGE);
                Ok(RecoveryAction::Dismiss)
            }
            ExplainError::Credential(_) | ExplainError::Store(_) => {
                error!("Credential handling failed: {}", err);
                let message = format!("Failed to set API key: {}", err);
                self.notifier.error(&message);
                Ok(RecoveryAction::ShowDiagnostic(message))
            }
        }
    }
}

/// `error.message` from a JSON error body, else the body itself.
fn error_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    if let Some(message) = parsed
        .as_ref()
        .and_then(|v| v.pointer("/error/message"))
        .and_then(|m| m.as_str())
    {
        return message.to_string();
    }

    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::credential_store::StoreError;
    use crate::test_support::{
        MockConnector, MockPrompter, MockStore, RecordingNotifier, RecordingSink, ScriptedGateway,
    };
    use explain_domain::CredentialError;

    struct Fixture {
        store: Arc<MockStore>,
        credentials: Arc<CredentialService>,
        notifier: Arc<RecordingNotifier>,
        sink: Arc<RecordingSink>,
        classifier: ErrorClassifier,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MockStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let sink = Arc::new(RecordingSink::default());
        let credentials = Arc::new(CredentialService::new(
            store.clone(),
            Arc::new(MockConnector::new(ScriptedGateway::default())),
            Arc::new(MockPrompter::none()),
            notifier.clone(),
        ));
        credentials.set("sk-test-1234567").unwrap();
        let classifier = ErrorClassifier::new(credentials.clone(), notifier.clone(), sink.clone());
        Fixture {
            store,
            credentials,
            notifier,
            sink,
            classifier,
        }
    }

    #[test]
    fn unauthorized_clears_key_and_prompts() {
        let f = fixture();
        let display = f.sink.open_handle();

        let action = f
            .classifier
            .classify(&ExplainError::AuthenticationFailed, Some(&display));

        assert_eq!(action, RecoveryAction::PromptForCredential);
        assert!(!f.credentials.is_set());
        assert!(f.store.value().is_none());
        assert_eq!(f.notifier.errors(), vec![INVALID_KEY_MESSAGE.to_string()]);
        assert!(f.notifier.infos().is_empty());
        assert_eq!(f.sink.disposed(), vec![display.id()]);
        assert!(display.is_closed());
    }

    #[test]
    fn unauthorized_without_key_still_prompts() {
        let f = fixture();
        f.credentials.reset().unwrap();

        let action = f.classifier.classify(&ExplainError::AuthenticationFailed, None);

        assert_eq!(action, RecoveryAction::PromptForCredential);
        assert!(!f.credentials.is_set());
    }

    #[test]
    fn status_with_json_body_shows_provider_message() {
        let f = fixture();
        let err = ExplainError::RequestFailed {
            status: 429,
            body: r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#.to_string(),
        };

        let action = f.classifier.classify(&err, None);

        let expected = "An error occurred during OpenAI request: Rate limit reached";
        assert_eq!(action, RecoveryAction::ShowDiagnostic(expected.to_string()));
        assert_eq!(f.notifier.errors(), vec![expected.to_string()]);
        assert!(f.credentials.is_set());
    }

    #[test]
    fn status_with_plain_body_never_fails() {
        let f = fixture();
        let err = ExplainError::RequestFailed {
            status: 502,
            body: "<html>Bad gateway</html>".to_string(),
        };

        let action = f.classifier.classify(&err, None);

        assert_eq!(
            action,
            RecoveryAction::ShowDiagnostic(
                "An error occurred during OpenAI request: <html>Bad gateway</html>".to_string()
            )
        );
        assert_eq!(f.notifier.errors().len(), 1);
    }

    #[test]
    fn status_with_empty_body_shows_status() {
        assert_eq!(error_message(500, ""), "HTTP 500");
        assert_eq!(error_message(500, r#"{"error":{}}"#), r#"{"error":{}}"#);
    }

    #[test]
    fn transport_failure_is_generic() {
        let f = fixture();
        let display = f.sink.open_handle();

        let action = f.classifier.classify(
            &ExplainError::TransportFailed("connection refused".to_string()),
            Some(&display),
        );

        assert_eq!(
            action,
            RecoveryAction::ShowDiagnostic(GENERIC_REQUEST_MESSAGE.to_string())
        );
        assert_eq!(f.sink.disposed(), vec![display.id()]);
    }

    #[test]
    fn moderation_rejection_is_dismissed_silently() {
        let f = fixture();
        let display = f.sink.open_handle();

        let action = f.classifier.classify(
            &ExplainError::ModerationRejected {
                verdict: serde_json::json!({"results": [{"flagged": true}]}),
            },
            Some(&display),
        );

        assert_eq!(action, RecoveryAction::Dismiss);
        assert!(f.notifier.errors().is_empty());
        assert_eq!(f.sink.disposed(), vec![display.id()]);
    }

    #[test]
    fn missing_key_is_dismissed() {
        let f = fixture();
        let action = f.classifier.classify(&ExplainError::NoCredentialProvided, None);
        assert_eq!(action, RecoveryAction::Dismiss);
        assert_eq!(f.notifier.errors(), vec![NO_KEY_MESSAGE.to_string()]);
    }

    #[test]
    fn credential_errors_report_set_failure() {
        let f = fixture();
        let action = f
            .classifier
            .classify(&ExplainError::Credential(CredentialError::Empty), None);

        assert!(matches!(
            action,
            RecoveryAction::ShowDiagnostic(ref m) if m.starts_with("Failed to set API key: ")
        ));

        let store_err = ExplainError::Store(StoreError::Io("read-only".to_string()));
        f.classifier.classify(&store_err, None);
        assert_eq!(f.notifier.errors().len(), 2);
    }

    #[test]
    fn store_failure_during_classification_falls_back() {
        let f = fixture();
        f.store.fail_clear();
        let display = f.sink.open_handle();

        let action = f
            .classifier
            .classify(&ExplainError::AuthenticationFailed, Some(&display));

        match action {
            RecoveryAction::ShowDiagnostic(message) => {
                assert!(message.starts_with("Unknown error occurred: "));
            }
            other => panic!("expected diagnostic, got {:?}", other),
        }
        assert!(!f.credentials.is_set());
        assert_eq!(f.notifier.errors().len(), 1);
        assert_eq!(f.sink.disposed(), vec![display.id()]);
    }
}
