//! Reading the snippet to explain.

use anyhow::{Context, Result};
use explain_domain::{LanguageId, LineRange, Snippet};
use std::io::Read;
use std::path::Path;

/// Build a snippet from `file` (or `stdin_text` when there is no file).
///
/// The language falls back to the file extension, then to plaintext.
pub fn snippet_from(
    file: Option<&Path>,
    text: String,
    language: Option<LanguageId>,
    lines: Option<LineRange>,
) -> Result<Snippet> {
    let code = match lines {
        Some(range) => range.select(&text),
        None => text,
    };

    let language = language
        .or_else(|| {
            file.and_then(|f| f.extension())
                .and_then(|ext| ext.to_str())
                .and_then(LanguageId::from_extension)
        })
        .unwrap_or_else(LanguageId::plaintext);

    let mut snippet = match Snippet::new(language, code) {
        Ok(snippet) => snippet,
        Err(e) => match lines {
            Some(range) => return Err(e).with_context(|| format!("lines {} are empty", range)),
            None => return Err(e).context("nothing to explain"),
        },
    };
    if let Some(name) = file.and_then(|f| f.file_name()).and_then(|n| n.to_str()) {
        snippet = snippet.with_document(name);
    }
    if let Some(range) = lines {
        snippet = snippet.with_range(range);
    }
    Ok(snippet)
}

/// Read `file`, or stdin when `file` is `None`.
pub fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read snippet from stdin")?;
            Ok(text)
        }
    }
}
