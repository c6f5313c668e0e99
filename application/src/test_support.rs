//! Hand-written port doubles shared by the use case tests.

use crate::ports::chat_gateway::{
    ChatGateway, ChatRequest, ChunkStream, GatewayConnector, GatewayError, ModerationVerdict,
};
use crate::ports::credential_store::{CredentialPrompter, CredentialStore, StoreError};
use crate::ports::presentation::{
    DisplayContext, DisplayHandle, DisplayId, PresentationSink, UserNotifier,
};
use async_trait::async_trait;
use explain_domain::ApiKey;
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ==================== Credential Store ====================

#[derive(Default)]
pub struct MockStore {
    value: Mutex<Option<String>>,
    clear_calls: AtomicUsize,
    fail_clear: AtomicBool,
    corrupt: AtomicBool,
}

impl MockStore {
    pub fn with_value(value: &str) -> Self {
        let store = Self::default();
        *store.value.lock().unwrap() = Some(value.to_string());
        store
    }

    pub fn value(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    pub fn fail_clear(&self) {
        self.fail_clear.store(true, Ordering::SeqCst);
    }

    /// Loads fail as corrupt until the next save or clear.
    pub fn corrupt(&self) {
        self.corrupt.store(true, Ordering::SeqCst);
    }
}

impl CredentialStore for MockStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        if self.corrupt.load(Ordering::SeqCst) {
            return Err(StoreError::Corrupt("state.json: expected value".to_string()));
        }
        Ok(self.value())
    }

    fn save(&self, obfuscated: &str) -> Result<(), StoreError> {
        self.corrupt.store(false, Ordering::SeqCst);
        *self.value.lock().unwrap() = Some(obfuscated.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(StoreError::Io("disk on fire".to_string()));
        }
        self.corrupt.store(false, Ordering::SeqCst);
        *self.value.lock().unwrap() = None;
        Ok(())
    }
}

// ==================== Prompter ====================

pub struct MockPrompter {
    answer: Option<String>,
}

impl MockPrompter {
    pub fn none() -> Self {
        Self { answer: None }
    }

    pub fn answer(value: &str) -> Self {
        Self {
            answer: Some(value.to_string()),
        }
    }
}

#[async_trait]
impl CredentialPrompter for MockPrompter {
    async fn prompt(&self) -> Option<String> {
        self.answer.clone()
    }
}

// ==================== Notifier ====================

#[derive(Default)]
pub struct RecordingNotifier {
    infos: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl UserNotifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

// ==================== Gateway ====================

/// Gateway that replays a fixed moderation verdict and chunk script.
#[derive(Default)]
pub struct ScriptedGateway {
    flagged: bool,
    chat_error: Option<GatewayError>,
    chunks: Vec<Result<Vec<u8>, GatewayError>>,
    moderation_calls: AtomicUsize,
    chat_calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl ScriptedGateway {
    pub fn streaming(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect(),
            ..Self::default()
        }
    }

    pub fn flagged() -> Self {
        Self {
            flagged: true,
            ..Self::default()
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            chat_error: Some(error),
            ..Self::default()
        }
    }

    pub fn then_error(mut self, error: GatewayError) -> Self {
        self.chunks.push(Err(error));
        self
    }

    pub fn moderation_calls(&self) -> usize {
        self.moderation_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatGateway for ScriptedGateway {
    async fn moderate(&self, input: &str, model: &str) -> Result<ModerationVerdict, GatewayError> {
        self.moderation_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ModerationVerdict {
            flagged: self.flagged,
            raw: serde_json::json!({
                "model": model,
                "results": [{"flagged": self.flagged}],
                "input_bytes": input.len(),
            }),
        })
    }

    async fn stream_chat(&self, request: &ChatRequest) -> Result<ChunkStream, GatewayError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if let Some(error) = &self.chat_error {
            return Err(error.clone());
        }
        Ok(futures::stream::iter(self.chunks.clone()).boxed())
    }
}

pub struct MockConnector {
    gateway: Arc<ScriptedGateway>,
    connects: AtomicUsize,
}

impl MockConnector {
    pub fn new(gateway: ScriptedGateway) -> Self {
        Self::shared(Arc::new(gateway))
    }

    pub fn shared(gateway: Arc<ScriptedGateway>) -> Self {
        Self {
            gateway,
            connects: AtomicUsize::new(0),
        }
    }
}

impl GatewayConnector for MockConnector {
    fn connect(&self, _key: &ApiKey) -> Result<Arc<dyn ChatGateway>, GatewayError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(self.gateway.clone())
    }
}

// ==================== Presentation Sink ====================

/// Sink that records every call. Optionally closes the display after a
/// number of updates, like a user closing the panel mid-stream.
#[derive(Default)]
pub struct RecordingSink {
    created: Mutex<Vec<DisplayContext>>,
    updates: Mutex<Vec<(DisplayId, String)>>,
    disposed: Mutex<Vec<DisplayId>>,
    handles: Mutex<Vec<DisplayHandle>>,
    close_after: Option<usize>,
}

impl RecordingSink {
    pub fn closing_after(updates: usize) -> Self {
        Self {
            close_after: Some(updates),
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<DisplayContext> {
        self.created.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<String> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn disposed(&self) -> Vec<DisplayId> {
        self.disposed.lock().unwrap().clone()
    }

    pub fn open_handle(&self) -> DisplayHandle {
        self.create(&DisplayContext {
            title: "test".to_string(),
            language: "python".to_string(),
        })
    }
}

impl PresentationSink for RecordingSink {
    fn create(&self, context: &DisplayContext) -> DisplayHandle {
        self.created.lock().unwrap().push(context.clone());
        let handle = DisplayHandle::new(DisplayId::next());
        self.handles.lock().unwrap().push(handle.clone());
        handle
    }

    fn update(&self, handle: &DisplayHandle, full_text: &str) {
        let mut updates = self.updates.lock().unwrap();
        updates.push((handle.id(), full_text.to_string()));
        if self.close_after == Some(updates.len()) {
            handle.close();
        }
    }

    fn dispose(&self, handle: &DisplayHandle) {
        self.disposed.lock().unwrap().push(handle.id());
    }
}
