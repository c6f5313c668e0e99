//! Progress indicator shown while waiting for an explanation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown between opening a display and the first part of the answer.
///
/// A disabled spinner is a no-op, so callers never branch on `--quiet`.
pub struct WaitSpinner {
    bar: Option<ProgressBar>,
}

impl WaitSpinner {
    /// Start spinning with `message`, or do nothing when `enabled` is false.
    pub fn start(message: &str, enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_prefix("explain");
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    pub fn disabled() -> Self {
        Self { bar: None }
    }

    pub fn is_active(&self) -> bool {
        self.bar.as_ref().is_some_and(|b| !b.is_finished())
    }

    /// Remove the spinner line.
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    /// Replace the spinner with a one-line status.
    pub fn abandon(&mut self, status: &str) {
        if let Some(bar) = self.bar.take() {
            bar.abandon_with_message(format!("{}", status.yellow()));
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Drop for WaitSpinner {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_spinner_is_inert() {
        let mut spinner = WaitSpinner::start("Waiting...", false);
        assert!(!spinner.is_active());
        spinner.clear();
        spinner.abandon("closed");
        assert!(!spinner.is_active());
    }

    #[test]
    fn clear_finishes_spinner() {
        let mut spinner = WaitSpinner::start("Waiting...", true);
        assert!(spinner.is_active());
        spinner.clear();
        assert!(!spinner.is_active());
    }
}
