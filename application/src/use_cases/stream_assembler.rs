//! Stream assembler.
//!
//! Drives an [`ExplanationSession`] from a [`ChunkStream`] and pushes the
//! text after every chunk to the [`PresentationSink`]. Chunks are handled
//! strictly in arrival order; handling one chunk never suspends.

use crate::ports::chat_gateway::ChunkStream;
use crate::ports::presentation::{DisplayHandle, PresentationSink};
use crate::use_cases::error::ExplainError;
use explain_domain::{Emission, ExplanationSession, Snippet, preview};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// How an assembled stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyOutcome {
    /// The session was retired with a final emission.
    Completed {
        answer: String,
        /// False when the transport ended before `[DONE]`.
        saw_sentinel: bool,
    },
    /// The display was closed; remaining chunks were dropped.
    Closed,
}

/// Assembles one explanation.
pub struct StreamAssembler {
    session: ExplanationSession,
    display: DisplayHandle,
    sink: Arc<dyn PresentationSink>,
    emissions: usize,
}

impl StreamAssembler {
    pub fn begin(snippet: &Snippet, handle: DisplayHandle, sink: Arc<dyn PresentationSink>) -> Self {
        debug!("Beginning explanation session on {}", handle.id());
        Self {
            session: ExplanationSession::begin(snippet),
            display: handle,
            sink,
            emissions: 0,
        }
    }

    /// Apply one chunk and emit the result.
    ///
    /// Chunks for a closed display or a retired session are dropped.
    pub fn on_chunk(&mut self, chunk: &[u8]) {
        if self.display.is_closed() {
            debug!("Dropping {} byte chunk for closed {}", chunk.len(), self.display.id());
            return;
        }
        if self.session.is_terminal() {
            trace!("Ignoring chunk after end of stream");
            return;
        }

        let report = self.session.apply_chunk(chunk);
        for malformed in &report.malformed {
            warn!(
                line = %malformed.line,
                "Could not JSON parse stream message: {}",
                malformed.reason
            );
        }
        trace!(
            "Chunk {}: {} fragments, answer now {} bytes",
            self.session.chunks(),
            report.fragments,
            self.session.answer().len()
        );
        self.emit(report.emission);
    }

    /// Retire the session after the transport ended.
    pub fn finish(&mut self) {
        if self.display.is_closed() {
            return;
        }
        let report = self.session.finish();
        for malformed in &report.malformed {
            warn!(line = %malformed.line, "Could not JSON parse trailing stream message: {}", malformed.reason);
        }
        if !self.session.saw_sentinel() {
            warn!("Stream ended without [DONE]; keeping the partial answer");
        }
        self.emit(report.emission);
    }

    /// Consume `stream` until the sentinel, the end of the stream, or the
    /// display closing.
    ///
    /// A transport error mid-stream aborts the session.
    pub async fn consume(mut self, mut stream: ChunkStream) -> Result<AssemblyOutcome, ExplainError> {
        let handle = self.display.clone();

        loop {
            let next = tokio::select! {
                biased;
                _ = handle.closed() => None,
                next = stream.next() => Some(next),
            };

            match next {
                None => {
                    debug!("{} closed; abandoning stream", handle.id());
                    return Ok(AssemblyOutcome::Closed);
                }
                Some(Some(Ok(chunk))) => {
                    self.on_chunk(&chunk);
                    if self.session.is_terminal() {
                        break;
                    }
                    if handle.is_closed() {
                        return Ok(AssemblyOutcome::Closed);
                    }
                }
                Some(Some(Err(e))) => {
                    warn!(
                        "Stream failed after {} chunks ({}): {}",
                        self.session.chunks(),
                        preview(self.session.answer(), 80),
                        e
                    );
                    return Err(e.into());
                }
                Some(None) => {
                    self.finish();
                    break;
                }
            }
        }

        debug!(
            "Session on {} complete: {} chunks, {} emissions",
            handle.id(),
            self.session.chunks(),
            self.emissions
        );
        Ok(AssemblyOutcome::Completed {
            answer: self.session.answer().to_string(),
            saw_sentinel: self.session.saw_sentinel(),
        })
    }

    pub fn session(&self) -> &ExplanationSession {
        &self.session
    }

    /// Number of sink updates issued so far.
    pub fn emissions(&self) -> usize {
        self.emissions
    }

    fn emit(&mut self, emission: Emission) {
        match emission {
            Emission::Update(text) | Emission::Final(text) => {
                self.sink.update(&self.display, &text);
                self.emissions += 1;
            }
            Emission::Nothing => {}
        }
    }
}
