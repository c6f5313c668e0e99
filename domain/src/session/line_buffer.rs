//! Line reassembly across transport chunks.

/// Splits a byte stream into lines, carrying an unterminated tail (and any
/// UTF-8 sequence cut in half) over to the next chunk.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completes.
    ///
    /// Returned lines exclude the `\n`; lines that are blank after trimming
    /// are dropped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let Some(last_newline) = self.pending.iter().rposition(|b| *b == b'\n') else {
            return Vec::new();
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        complete
            .split(|b| *b == b'\n')
            .filter_map(Self::decode_line)
            .collect()
    }

    /// Take whatever is left once the stream has ended.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.pending);
        Self::decode_line(&rest)
    }

    /// Bytes waiting for a newline.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn decode_line(bytes: &[u8]) -> Option<String> {
        let line = String::from_utf8_lossy(bytes);
        if line.trim().is_empty() {
            None
        } else {
            Some(line.into_owned())
        }
    }
}
