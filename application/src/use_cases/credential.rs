//! Credential lifecycle.
//!
//! [`CredentialService`] holds the current API key and the gateway bound to
//! it. It is created once at startup and passed explicitly to every use case
//! that needs to reach the provider.

use crate::ports::chat_gateway::{ChatGateway, GatewayConnector};
use crate::ports::credential_store::{CredentialPrompter, CredentialStore};
use crate::ports::presentation::UserNotifier;
use crate::use_cases::error::ExplainError;
use explain_domain::ApiKey;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Where the active key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Entered by the user or restored from the store.
    Stored,
    /// Taken from the environment; never written to the store.
    Environment,
}

struct ActiveCredential {
    key: ApiKey,
    gateway: Arc<dyn ChatGateway>,
    source: CredentialSource,
}

/// Holds the single active credential.
pub struct CredentialService {
    store: Arc<dyn CredentialStore>,
    connector: Arc<dyn GatewayConnector>,
    prompter: Arc<dyn CredentialPrompter>,
    notifier: Arc<dyn UserNotifier>,
    active: RwLock<Option<ActiveCredential>>,
}

impl CredentialService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        connector: Arc<dyn GatewayConnector>,
        prompter: Arc<dyn CredentialPrompter>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        Self {
            store,
            connector,
            prompter,
            notifier,
            active: RwLock::new(None),
        }
    }

    /// Validate `value`, bind a gateway to it and persist it.
    pub fn set(&self, value: &str) -> Result<(), ExplainError> {
        let key = ApiKey::new(value)?;
        let gateway = self.connector.connect(&key)?;
        self.store.save(&key.obfuscate())?;
        self.activate(key, gateway, CredentialSource::Stored);
        Ok(())
    }

    /// Use `value` for this process only.
    pub fn set_from_environment(&self, value: &str) -> Result<(), ExplainError> {
        let key = ApiKey::new(value)?;
        self.install(key, CredentialSource::Environment)
    }

    /// Load the persisted key, if there is one.
    ///
    /// Returns whether a key is now active.
    pub fn restore(&self) -> Result<bool, ExplainError> {
        let Some(stored) = self.store.load()? else {
            debug!("No stored API key");
            return Ok(false);
        };
        let key = ApiKey::reveal(&stored)?;
        self.install(key, CredentialSource::Stored)?;
        Ok(true)
    }

    /// Forget the active key and wipe the store.
    ///
    /// Returns `false` (with a warning) when no key was set.
    pub fn clear(&self) -> Result<bool, ExplainError> {
        if !self.forget()? {
            warn!("Asked to clear API key, but none is set");
            self.notifier.warn("API key not found");
            return Ok(false);
        }
        self.notifier.info("API key removed");
        Ok(true)
    }

    /// Drop the active key without telling the user.
    ///
    /// Used after the provider rejects the key; the caller owns the
    /// notification.
    pub fn reset(&self) -> Result<bool, ExplainError> {
        self.forget()
    }

    /// The in-memory key is dropped before the store is touched, so the
    /// service is unset afterwards even if clearing the store fails.
    ///
    /// With no active key the store is still wiped when it holds an entry
    /// that could not be restored.
    fn forget(&self) -> Result<bool, ExplainError> {
        let previous = self.write_active().take();
        match previous {
            Some(previous) => {
                if previous.source == CredentialSource::Stored {
                    self.store.clear()?;
                }
                info!("API key {} removed", previous.key.hint());
                Ok(true)
            }
            None => match self.store.load() {
                Ok(None) => Ok(false),
                Ok(Some(_)) => {
                    self.store.clear()?;
                    info!("Unusable stored API key removed");
                    Ok(true)
                }
                Err(e) => {
                    warn!("Clearing unreadable credential store: {}", e);
                    self.store.clear()?;
                    Ok(true)
                }
            },
        }
    }

    /// Ask the user for a key and set it.
    pub async fn request(&self) -> Result<(), ExplainError> {
        let value = self.prompter.prompt().await.unwrap_or_default();
        if value.trim().is_empty() {
            return Err(ExplainError::NoCredentialProvided);
        }
        self.set(&value)?;
        self.notifier.info("API key set successfully");
        Ok(())
    }

    /// Gateway for the active key, prompting for a key first if none is set.
    pub async fn ensure_gateway(&self) -> Result<Arc<dyn ChatGateway>, ExplainError> {
        if let Some(gateway) = self.gateway() {
            return Ok(gateway);
        }
        self.request().await?;
        self.gateway().ok_or(ExplainError::NoCredentialProvided)
    }

    /// Gateway bound to the active key.
    pub fn gateway(&self) -> Option<Arc<dyn ChatGateway>> {
        self.read_active().as_ref().map(|a| Arc::clone(&a.gateway))
    }

    pub fn is_set(&self) -> bool {
        self.read_active().is_some()
    }

    pub fn source(&self) -> Option<CredentialSource> {
        self.read_active().as_ref().map(|a| a.source)
    }

    /// Redacted hint of the active key, for display.
    pub fn hint(&self) -> Option<String> {
        self.read_active().as_ref().map(|a| a.key.hint())
    }

    fn install(&self, key: ApiKey, source: CredentialSource) -> Result<(), ExplainError> {
        let gateway = self.connector.connect(&key)?;
        self.activate(key, gateway, source);
        Ok(())
    }

    fn activate(&self, key: ApiKey, gateway: Arc<dyn ChatGateway>, source: CredentialSource) {
        info!("API key {} active ({:?})", key.hint(), source);
        *self.write_active() = Some(ActiveCredential {
            key,
            gateway,
            source,
        });
    }

    fn read_active(&self) -> std::sync::RwLockReadGuard<'_, Option<ActiveCredential>> {
        self.active.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_active(&self) -> std::sync::RwLockWriteGuard<'_, Option<ActiveCredential>> {
        self.active.write().unwrap_or_else(PoisonError::into_inner)
    }
}
