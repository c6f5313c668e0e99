//! Presentation ports
//!
//! - [`PresentationSink`]: the display an explanation is rendered into
//! - [`UserNotifier`]: short user-visible notifications
//!
//! Implementations live in the presentation layer.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

static NEXT_DISPLAY_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of one display resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayId(u64);

impl DisplayId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        Self(NEXT_DISPLAY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display-{}", self.0)
    }
}

/// Handle to a live display.
///
/// Clones share one liveness token. Once the token is cancelled (the user
/// closed the display, or the flow disposed it) further updates for the
/// session are dropped.
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    id: DisplayId,
    closed: CancellationToken,
}

impl DisplayHandle {
    pub fn new(id: DisplayId) -> Self {
        Self {
            id,
            closed: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> DisplayId {
        self.id
    }

    /// Mark the display as closed.
    pub fn close(&self) {
        self.closed.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Resolves once the display is closed.
    pub fn closed(&self) -> WaitForCancellationFuture<'_> {
        self.closed.cancelled()
    }
}

/// Context shown alongside an explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContext {
    /// e.g. `main.py:3-7`
    pub title: String,
    pub language: String,
}

/// Port for the explanation display
pub trait PresentationSink: Send + Sync {
    /// Open a display for one explanation.
    fn create(&self, context: &DisplayContext) -> DisplayHandle;

    /// Replace the display content with `full_text`.
    fn update(&self, handle: &DisplayHandle, full_text: &str);

    /// Release the display's resources. Must tolerate repeated calls.
    fn dispose(&self, handle: &DisplayHandle);
}

/// Close a display and release it in the sink.
pub fn dispose_display(sink: &dyn PresentationSink, handle: &DisplayHandle) {
    handle.close();
    sink.dispose(handle);
}

/// Port for user-visible notifications
pub trait UserNotifier: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// No-op notifier for when notifications are not needed
pub struct NoNotifier;

impl UserNotifier for NoNotifier {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
