//! Session domain entities

use super::line_buffer::LineBuffer;
use super::stream::{MalformedEventLine, StreamEvent};
use crate::prompt::PromptTemplate;
use crate::snippet::Snippet;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// What the display should show after a chunk has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Delta update with the full text so far.
    Update(String),
    /// Final text; the session is retired.
    Final(String),
    /// Nothing to show (session already retired).
    Nothing,
}

/// Result of applying one chunk to an [`ExplanationSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkReport {
    pub emission: Emission,
    /// Lines that were skipped because they could not be decoded.
    pub malformed: Vec<MalformedEventLine>,
    /// Number of content fragments appended from this chunk.
    pub fragments: usize,
}

impl ChunkReport {
    fn nothing() -> Self {
        Self {
            emission: Emission::Nothing,
            malformed: Vec::new(),
            fragments: 0,
        }
    }
}

/// One in-flight explanation and its accumulating answer (Entity)
///
/// The answer only grows until the terminal sentinel is seen; afterwards the
/// session is retired and ignores further input.
#[derive(Debug)]
pub struct ExplanationSession {
    header: String,
    answer: String,
    lines: LineBuffer,
    terminal: bool,
    saw_sentinel: bool,
    chunks: usize,
}

impl ExplanationSession {
    /// Start a session for `snippet`; the header is its rendered code block.
    pub fn begin(snippet: &Snippet) -> Self {
        Self {
            header: PromptTemplate::code_block(snippet.language().as_str(), snippet.code()),
            answer: String::new(),
            lines: LineBuffer::new(),
            terminal: false,
            saw_sentinel: false,
            chunks: 0,
        }
    }

    /// Apply one raw transport chunk.
    ///
    /// Produces exactly one emission per chunk while the session is live:
    /// [`Emission::Final`] when the chunk carries the sentinel, otherwise
    /// [`Emission::Update`].
    pub fn apply_chunk(&mut self, chunk: &[u8]) -> ChunkReport {
        if self.terminal {
            return ChunkReport::nothing();
        }
        self.chunks += 1;

        let mut report = ChunkReport::nothing();
        for line in self.lines.push(chunk) {
            if self.apply_line(&line, &mut report) {
                report.emission = Emission::Final(self.rendered());
                return report;
            }
        }

        report.emission = Emission::Update(self.rendered());
        report
    }

    /// Close the session after the transport ended.
    ///
    /// A trailing line without a newline is still applied. If the sentinel
    /// never arrived the session is retired anyway with a final emission.
    pub fn finish(&mut self) -> ChunkReport {
        if self.terminal {
            return ChunkReport::nothing();
        }

        let mut report = ChunkReport::nothing();
        if let Some(line) = self.lines.finish() {
            self.apply_line(&line, &mut report);
        }
        self.terminal = true;
        report.emission = Emission::Final(self.rendered());
        report
    }

    /// Returns true when the line was the terminal sentinel.
    fn apply_line(&mut self, line: &str, report: &mut ChunkReport) -> bool {
        match StreamEvent::parse_line(line) {
            StreamEvent::Done => {
                self.terminal = true;
                self.saw_sentinel = true;
                true
            }
            StreamEvent::Delta { content } => {
                if let Some(fragment) = content {
                    self.answer.push_str(&fragment);
                    report.fragments += 1;
                }
                false
            }
            StreamEvent::Malformed(malformed) => {
                report.malformed.push(malformed);
                false
            }
        }
    }

    /// Header followed by the answer so far.
    pub fn rendered(&self) -> String {
        format!("{}{}", self.header, self.answer)
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// True once the stream ended with the `[DONE]` sentinel.
    pub fn saw_sentinel(&self) -> bool {
        self.saw_sentinel
    }

    /// Chunks applied while the session was live.
    pub fn chunks(&self) -> usize {
        self.chunks
    }
}
