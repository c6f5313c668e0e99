//! Presentation-level configuration
//!
//! Terminal output settings, resolved from the config file and CLI flags.

use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show a spinner until the answer starts streaming
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Apply `--no-color` and `--quiet` on top of file settings.
    pub fn with_flags(mut self, no_color: bool, quiet: bool) -> Self {
        self.color &= !no_color;
        self.show_progress &= !quiet;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_only_turn_things_off() {
        let config = OutputConfig::default().with_flags(true, false);
        assert!(!config.color);
        assert!(config.show_progress);

        let quiet = OutputConfig {
            color: false,
            show_progress: true,
        }
        .with_flags(false, true);
        assert!(!quiet.color);
        assert!(!quiet.show_progress);
    }
}
