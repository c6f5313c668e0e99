//! CLI command definitions

use clap::Parser;
use explain_domain::{LanguageId, LineRange};
use std::path::PathBuf;

/// CLI arguments for snippet-explain
#[derive(Parser, Debug)]
#[command(name = "snippet-explain")]
#[command(author, version, about = "Explain a code snippet in plain English")]
#[command(long_about = r#"
snippet-explain sends a code snippet to the OpenAI chat API and streams a
plain-English explanation to the terminal.

The snippet is read from FILE (optionally cut down with --lines) or from
stdin. The prompt is checked by the OpenAI moderation endpoint first.

The API key is taken from, in order:
1. the key stored with --set-key
2. the environment variable named by openai.api_key_env (OPENAI_API_KEY)
3. an interactive prompt

Configuration files are loaded from (in priority order):
1. SNIPPET_EXPLAIN_* environment variables
2. --config <path>     Explicit config file
3. ./explain.toml      Project-level config
4. ~/.config/snippet-explain/config.toml   Global config

Example:
  snippet-explain src/main.rs --lines 10:24
  cat query.sql | snippet-explain --language sql
  snippet-explain --set-key
"#)]
pub struct Cli {
    /// File to explain; `-` or nothing reads stdin
    pub file: Option<PathBuf>,

    /// Language of the snippet (inferred from the file extension by default)
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<LanguageId>,

    /// Only explain these lines (1-based, inclusive), e.g. `10:24` or `7`
    #[arg(long, value_name = "START:END")]
    pub lines: Option<LineRange>,

    /// Prompt for an API key and store it
    #[arg(long, conflicts_with = "clear_key")]
    pub set_key: bool,

    /// Remove the stored API key
    #[arg(long)]
    pub clear_key: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The file to read, or `None` for stdin.
    pub fn input_file(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|p| p.as_os_str() != "-")
    }

    /// Whether the invocation only manages the key.
    pub fn is_key_command(&self) -> bool {
        self.set_key || self.clear_key
    }
}
