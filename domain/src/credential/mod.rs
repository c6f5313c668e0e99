//! Credential domain
//!
//! [`ApiKey`] wraps the secret authorizing remote calls. It never prints its
//! value, and is persisted only in the obfuscated form produced by
//! [`ApiKey::obfuscate`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use thiserror::Error;

/// Errors raised while constructing or restoring a credential
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("API key is empty")]
    Empty,

    #[error("Stored API key could not be decoded: {0}")]
    Undecodable(String),
}

/// An API secret (Value Object)
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a key from user input. Surrounding whitespace is removed.
    pub fn new(value: impl AsRef<str>) -> Result<Self, CredentialError> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(value.to_string()))
    }

    /// The raw secret, for building request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Obfuscated form written to the credential store.
    pub fn obfuscate(&self) -> String {
        STANDARD.encode(self.0.as_bytes())
    }

    /// Inverse of [`ApiKey::obfuscate`].
    pub fn reveal(stored: &str) -> Result<Self, CredentialError> {
        let bytes = STANDARD
            .decode(stored.trim())
            .map_err(|e| CredentialError::Undecodable(e.to_string()))?;
        let value =
            String::from_utf8(bytes).map_err(|e| CredentialError::Undecodable(e.to_string()))?;
        Self::new(value)
    }

    /// Short hint safe to show in logs, e.g. `sk-...abcd`.
    pub fn hint(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}
