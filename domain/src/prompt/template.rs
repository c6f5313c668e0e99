//! Prompt templates for snippet explanation

/// First line of the snippet delimiter block.
pub const SNIPPET_BEGIN: &str = "--- Code snippet begins ---";
/// Last line of the snippet delimiter block.
pub const SNIPPET_END: &str = "--- Code snippet ends ---";

/// Templates for generating the explanation prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt sent with every explanation request
    pub fn system_context() -> &'static str {
        "You are a software engineer. Your goal is to explain a code snippet to a student. \
Please do not complete any codes or provide solutions. Explain the code in plain English \
using correct terminology, grammar, and punctuation. Offer examples as needed, but they are \
not required."
    }

    /// User prompt asking for an explanation of `snippet`.
    ///
    /// The snippet is trimmed at both ends and otherwise kept byte for byte.
    pub fn explain_snippet(language: &str, snippet: &str) -> String {
        format!(
            "Explain this {} programming language code snippet.\n{}\n{}\n{}\n",
            language,
            SNIPPET_BEGIN,
            snippet.trim(),
            SNIPPET_END
        )
    }

    /// Fenced code block shown above the streamed explanation.
    pub fn code_block(language: &str, snippet: &str) -> String {
        format!(
            "```{}\n{}\n```\n\n",
            language,
            snippet.trim_end_matches(['\n', '\r'])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_snippet_trims_and_delimits() {
        let prompt = PromptTemplate::explain_snippet("python", "  x=1  ");
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Explain this python programming language code snippet.",
                SNIPPET_BEGIN,
                "x=1",
                SNIPPET_END,
            ]
        );
        assert!(prompt.ends_with('\n'));
    }

    #[test]
    fn test_explain_snippet_preserves_inner_content() {
        let code = "\n\nfn main() {\n    println!(\"héllo\");\t\n}\n\n";
        let prompt = PromptTemplate::explain_snippet("rust", code);
        assert!(prompt.contains("fn main() {\n    println!(\"héllo\");\t\n}"));
    }

    #[test]
    fn test_explain_snippet_is_deterministic() {
        assert_eq!(
            PromptTemplate::explain_snippet("go", "a := 1"),
            PromptTemplate::explain_snippet("go", "a := 1")
        );
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            PromptTemplate::code_block("rust", "let x = 1;\n"),
            "```rust\nlet x = 1;\n```\n\n"
        );
    }
}
