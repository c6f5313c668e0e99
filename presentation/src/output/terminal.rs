//! Terminal presentation sink
//!
//! Streams explanations to a writer (stdout by default). The sink receives
//! the full text after every chunk and prints only what was not printed yet.

use crate::config::OutputConfig;
use crate::output::console::ConsoleNotifier;
use crate::progress::reporter::WaitSpinner;
use explain_application::ports::presentation::{
    DisplayContext, DisplayHandle, DisplayId, PresentationSink, dispose_display,
};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

struct Panel {
    handle: DisplayHandle,
    printed: String,
    spinner: WaitSpinner,
}

/// How to bring the terminal from the printed text to the new full text.
#[derive(Debug, PartialEq, Eq)]
enum Delta<'a> {
    /// Print this suffix.
    Append(&'a str),
    /// The text diverged from what was printed; print it again in full.
    Reprint(&'a str),
}

fn delta<'a>(printed: &str, full: &'a str) -> Delta<'a> {
    match full.strip_prefix(printed) {
        Some(suffix) => Delta::Append(suffix),
        None => Delta::Reprint(full),
    }
}

/// [`PresentationSink`] that writes to a terminal.
pub struct TerminalSink {
    writer: Mutex<Box<dyn Write + Send>>,
    panels: Mutex<HashMap<DisplayId, Panel>>,
    config: OutputConfig,
}

impl TerminalSink {
    pub fn stdout(config: OutputConfig) -> Self {
        Self::with_writer(Box::new(std::io::stdout()), config)
    }

    pub fn with_writer(writer: Box<dyn Write + Send>, config: OutputConfig) -> Self {
        Self {
            writer: Mutex::new(writer),
            panels: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Close and dispose every open display (e.g. on Ctrl-C).
    pub fn dispose_all(&self) {
        let handles: Vec<DisplayHandle> = self
            .panels()
            .values()
            .map(|panel| panel.handle.clone())
            .collect();
        for handle in &handles {
            dispose_display(self, handle);
        }
    }

    /// Number of displays not yet disposed.
    pub fn open_displays(&self) -> usize {
        self.panels().len()
    }

    fn panels(&self) -> MutexGuard<'_, HashMap<DisplayId, Panel>> {
        self.panels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, text: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let result = writer.write_all(text.as_bytes());
        if let Err(e) = result.and_then(|_| writer.flush()) {
            warn!("Failed to write explanation to terminal: {}", e);
        }
    }
}

impl PresentationSink for TerminalSink {
    fn create(&self, context: &DisplayContext) -> DisplayHandle {
        let handle = DisplayHandle::new(DisplayId::next());
        debug!("Opening {} for {}", handle.id(), context.title);

        self.write(&format!(
            "{}\n",
            ConsoleNotifier::title(&context.title, &context.language)
        ));
        let spinner = WaitSpinner::start("Waiting for explanation...", self.config.show_progress);

        self.panels().insert(
            handle.id(),
            Panel {
                handle: handle.clone(),
                printed: String::new(),
                spinner,
            },
        );
        handle
    }

    fn update(&self, handle: &DisplayHandle, full_text: &str) {
        if handle.is_closed() {
            return;
        }
        let mut panels = self.panels();
        let Some(panel) = panels.get_mut(&handle.id()) else {
            debug!("Update for unknown {}", handle.id());
            return;
        };
        panel.spinner.clear();

        match delta(&panel.printed, full_text) {
            Delta::Append("") => {}
            Delta::Append(suffix) => self.write(suffix),
            Delta::Reprint(text) => {
                debug!("{} content diverged; reprinting", handle.id());
                self.write(&format!("\n{}", text));
            }
        }
        panel.printed = full_text.to_string();
    }

    fn dispose(&self, handle: &DisplayHandle) {
        let Some(mut panel) = self.panels().remove(&handle.id()) else {
            return;
        };
        panel.spinner.clear();
        if !panel.printed.is_empty() && !panel.printed.ends_with('\n') {
            self.write("\n");
        }
        debug!("Disposed {}", handle.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn sink() -> (SharedBuffer, TerminalSink) {
        let buffer = SharedBuffer::default();
        let config = OutputConfig {
            color: false,
            show_progress: false,
        };
        let sink = TerminalSink::with_writer(Box::new(buffer.clone()), config);
        (buffer, sink)
    }

    fn context() -> DisplayContext {
        DisplayContext {
            title: "main.py:3".to_string(),
            language: "python".to_string(),
        }
    }

    /// Output after the title line.
    fn body(buffer: &SharedBuffer) -> String {
        let contents = buffer.contents();
        contents
            .split_once('\n')
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_delta() {
        assert_eq!(delta("", "abc"), Delta::Append("abc"));
        assert_eq!(delta("ab", "abc"), Delta::Append("c"));
        assert_eq!(delta("abc", "abc"), Delta::Append(""));
        assert_eq!(delta("abx", "abc"), Delta::Reprint("abc"));
    }

    #[test]
    fn test_prints_only_new_text() {
        let (buffer, sink) = sink();
        let handle = sink.create(&context());

        sink.update(&handle, "```python\nx=1\n```\n\nHello");
        sink.update(&handle, "```python\nx=1\n```\n\nHello world");
        sink.update(&handle, "```python\nx=1\n```\n\nHello world");
        sink.dispose(&handle);

        assert_eq!(body(&buffer), "```python\nx=1\n```\n\nHello world\n");
        assert_eq!(sink.open_displays(), 0);
    }

    #[test]
    fn test_closed_display_ignores_updates() {
        let (buffer, sink) = sink();
        let handle = sink.create(&context());
        handle.close();

        sink.update(&handle, "ignored");
        assert_eq!(body(&buffer), "");
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let (buffer, sink) = sink();
        let handle = sink.create(&context());
        sink.update(&handle, "text");

        sink.dispose(&handle);
        sink.dispose(&handle);
        assert_eq!(body(&buffer), "text\n");
    }

    #[test]
    fn test_dispose_all_closes_handles() {
        let (_buffer, sink) = sink();
        let first = sink.create(&context());
        let second = sink.create(&context());
        assert_eq!(sink.open_displays(), 2);

        sink.dispose_all();

        assert!(first.is_closed());
        assert!(second.is_closed());
        assert_eq!(sink.open_displays(), 0);
    }
}
