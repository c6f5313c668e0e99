//! Log previews of prompts and stream payloads.

/// Marker appended when a preview was cut short.
pub const ELLIPSIS: &str = "...";

/// Single-line preview of `text`, at most `max_chars` characters plus
/// [`ELLIPSIS`].
///
/// Newlines are escaped so a multi-line prompt or answer stays on one log
/// line. Counts characters, so multi-byte text is never split.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (taken, c) in text.chars().enumerate() {
        if taken == max_chars {
            out.push_str(ELLIPSIS);
            return out;
        }
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
