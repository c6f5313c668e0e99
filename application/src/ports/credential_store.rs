//! Credential store port
//!
//! Persists the obfuscated API key under one fixed key. The store never sees
//! the plain secret.

use async_trait::async_trait;
use thiserror::Error;

/// Fixed key the credential is stored under.
pub const CREDENTIAL_KEY: &str = "snippet-explain.apiKey";

/// Errors raised by credential persistence
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Credential store I/O error: {0}")]
    Io(String),

    #[error("Credential store is corrupt: {0}")]
    Corrupt(String),
}

/// Port for credential persistence
pub trait CredentialStore: Send + Sync {
    /// Read the stored (obfuscated) value, if any.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored value.
    fn save(&self, obfuscated: &str) -> Result<(), StoreError>;

    /// Remove the stored value. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Port for asking the user for a credential
#[async_trait]
pub trait CredentialPrompter: Send + Sync {
    /// Ask for an API key. `None` means the user supplied nothing.
    async fn prompt(&self) -> Option<String>;
}
