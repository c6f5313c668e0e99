//! Console notifications

use colored::Colorize;
use explain_application::ports::presentation::UserNotifier;

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Prints notifications to stderr so they never mix with the answer on stdout.
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Format one notification line.
    pub fn format(level: NoticeLevel, message: &str) -> String {
        let label = match level {
            NoticeLevel::Info => "info:".green().bold(),
            NoticeLevel::Warning => "warning:".yellow().bold(),
            NoticeLevel::Error => "error:".red().bold(),
        };
        format!("{} {}", label, message)
    }

    /// Title line printed above an explanation.
    pub fn title(title: &str, language: &str) -> String {
        format!(
            "{} {}",
            format!("── {} ──", title).cyan().bold(),
            format!("({})", language).dimmed()
        )
    }
}

impl UserNotifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        eprintln!("{}", Self::format(NoticeLevel::Info, message));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", Self::format(NoticeLevel::Warning, message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", Self::format(NoticeLevel::Error, message));
    }
}
