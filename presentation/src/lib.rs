//! Presentation layer for snippet-explain
//!
//! This crate contains the CLI definition, the terminal display that
//! explanations stream into, console notifications and the API key prompt.

pub mod cli;
pub mod config;
pub mod input;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::OutputConfig;
pub use input::prompter::StdinPrompter;
pub use output::console::{ConsoleNotifier, NoticeLevel};
pub use output::terminal::TerminalSink;
pub use progress::reporter::WaitSpinner;
