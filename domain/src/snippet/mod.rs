//! Snippet domain
//!
//! - [`LanguageId`]: the language tag attached to a snippet
//! - [`LineRange`]: 1-based inclusive line selection
//! - [`Snippet`]: the code a user asked to have explained

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language identifier (Value Object)
///
/// Free-form lowercase tag such as `python` or `rust`, rendered into the
/// prompt and the code block header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(String);

impl LanguageId {
    /// Fallback when nothing better is known.
    pub const PLAINTEXT: &'static str = "plaintext";

    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into().trim().to_lowercase();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidLanguage(id));
        }
        Ok(Self(id))
    }

    pub fn plaintext() -> Self {
        Self(Self::PLAINTEXT.to_string())
    }

    /// Infer a language from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let id = match ext.to_lowercase().as_str() {
            "rs" => "rust",
            "py" | "pyw" => "python",
            "js" | "mjs" | "cjs" => "javascript",
            "ts" | "mts" | "cts" => "typescript",
            "jsx" => "javascriptreact",
            "tsx" => "typescriptreact",
            "c" | "h" => "c",
            "cc" | "cpp" | "cxx" | "hpp" | "hh" => "cpp",
            "cs" => "csharp",
            "go" => "go",
            "java" => "java",
            "kt" | "kts" => "kotlin",
            "rb" => "ruby",
            "php" => "php",
            "swift" => "swift",
            "sh" | "bash" | "zsh" => "shellscript",
            "sql" => "sql",
            "html" | "htm" => "html",
            "css" => "css",
            "json" => "json",
            "toml" => "toml",
            "yaml" | "yml" => "yaml",
            "md" => "markdown",
            "lua" => "lua",
            "hs" => "haskell",
            _ => return None,
        };
        Some(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// 1-based inclusive line selection within a document.
///
/// Serialized as `START:END`; deserializing goes through the same validation
/// as [`LineRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<Self, DomainError> {
        if start == 0 || end < start {
            return Err(DomainError::InvalidLineRange(format!("{}:{}", start, end)));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Cut the selected lines out of a document.
    ///
    /// Lines past the end of the document are ignored.
    pub fn select(&self, text: &str) -> String {
        text.lines()
            .skip(self.start.saturating_sub(1))
            .take(self.end - self.start + 1)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for LineRange {
    type Err = DomainError;

    /// Parses `START:END` or a single `LINE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidLineRange(s.to_string());
        match s.split_once(':') {
            Some((start, end)) => {
                let start = start.trim().parse().map_err(|_| invalid())?;
                let end = end.trim().parse().map_err(|_| invalid())?;
                Self::new(start, end)
            }
            None => {
                let line = s.trim().parse().map_err(|_| invalid())?;
                Self::new(line, line)
            }
        }
    }
}

impl TryFrom<String> for LineRange {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LineRange> for String {
    fn from(range: LineRange) -> Self {
        range.to_string()
    }
}

/// The code a user asked to have explained (Entity)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    language: LanguageId,
    code: String,
    document_name: Option<String>,
    range: Option<LineRange>,
}

impl Snippet {
    /// Create a snippet. Code that is blank after trimming is rejected.
    pub fn new(language: LanguageId, code: impl Into<String>) -> Result<Self, DomainError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::EmptySnippet);
        }
        Ok(Self {
            language,
            code,
            document_name: None,
            range: None,
        })
    }

    pub fn with_document(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(name.into());
        self
    }

    pub fn with_range(mut self, range: LineRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn document_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }

    pub fn range(&self) -> Option<LineRange> {
        self.range
    }

    /// Display title, e.g. `main.py:3-7`.
    pub fn title(&self) -> String {
        let name = self.document_name.as_deref().unwrap_or("snippet");
        match self.range {
            Some(r) if r.start == r.end => format!("{}:{}", name, r.start),
            Some(r) => format!("{}:{}-{}", name, r.start, r.end),
            None => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_normalized() {
        let lang = LanguageId::new("  Python ").unwrap();
        assert_eq!(lang.as_str(), "python");
        assert!(LanguageId::new("").is_err());
        assert!(LanguageId::new("c sharp").is_err());
    }

    #[test]
    fn test_language_from_extension() {
        assert_eq!(LanguageId::from_extension("RS").unwrap().as_str(), "rust");
        assert_eq!(LanguageId::from_extension("py").unwrap().as_str(), "python");
        assert!(LanguageId::from_extension("unknownext").is_none());
    }

    #[test]
    fn test_line_range_parse() {
        assert_eq!("3:7".parse::<LineRange>().unwrap(), LineRange { start: 3, end: 7 });
        assert_eq!("4".parse::<LineRange>().unwrap(), LineRange { start: 4, end: 4 });
        assert!("0:2".parse::<LineRange>().is_err());
        assert!("7:3".parse::<LineRange>().is_err());
        assert!("a:b".parse::<LineRange>().is_err());
    }

    #[test]
    fn test_line_range_select() {
        let text = "one\ntwo\nthree\nfour";
        let range = LineRange::new(2, 3).unwrap();
        assert_eq!(range.select(text), "two\nthree");
        let past_end = LineRange::new(4, 10).unwrap();
        assert_eq!(past_end.select(text), "four");
    }

    #[test]
    fn test_line_range_deserialize_validates() {
        let range: LineRange = serde_json::from_str("\"2:5\"").unwrap();
        assert_eq!((range.start(), range.end()), (2, 5));
        assert_eq!(serde_json::to_string(&range).unwrap(), "\"2:5\"");

        assert!(serde_json::from_str::<LineRange>("\"0:3\"").is_err());
        assert!(serde_json::from_str::<LineRange>(r#"{"start":0,"end":3}"#).is_err());
    }

    #[test]
    fn test_snippet_rejects_blank() {
        let err = Snippet::new(LanguageId::plaintext(), "   \n ").unwrap_err();
        assert_eq!(err, DomainError::EmptySnippet);
    }

    #[test]
    fn test_snippet_title() {
        let lang = LanguageId::new("python").unwrap();
        let snippet = Snippet::new(lang.clone(), "x = 1").unwrap();
        assert_eq!(snippet.title(), "snippet");

        let snippet = Snippet::new(lang, "x = 1")
            .unwrap()
            .with_document("main.py")
            .with_range(LineRange::new(3, 7).unwrap());
        assert_eq!(snippet.title(), "main.py:3-7");
    }
}
