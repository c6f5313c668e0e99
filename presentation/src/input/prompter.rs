//! Interactive API key prompt

use async_trait::async_trait;
use colored::Colorize;
use explain_application::ports::credential_store::CredentialPrompter;
use std::io::{BufRead, IsTerminal, Write};
use tracing::{debug, warn};

/// Asks for the API key on the terminal.
pub struct StdinPrompter;

impl StdinPrompter {
    fn ask() -> Option<String> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            debug!("stdin is not a terminal; not prompting for an API key");
            return None;
        }

        let mut stderr = std::io::stderr();
        let _ = write!(
            stderr,
            "{} ",
            "Please enter your OpenAI API key (sk-...):".cyan().bold()
        );
        let _ = stderr.flush();

        read_key(&mut stdin.lock())
    }
}

/// Read one line and return it trimmed, or `None` if nothing was entered.
pub(crate) fn read_key(reader: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(_) => {
            let key = line.trim();
            (!key.is_empty()).then(|| key.to_string())
        }
        Err(e) => {
            warn!("Failed to read API key: {}", e);
            None
        }
    }
}

#[async_trait]
impl CredentialPrompter for StdinPrompter {
    async fn prompt(&self) -> Option<String> {
        tokio::task::spawn_blocking(Self::ask)
            .await
            .unwrap_or_else(|e| {
                warn!("API key prompt failed: {}", e);
                None
            })
    }
}
