//! JSON file credential store.
//!
//! Keeps the obfuscated key in `{data_dir}/snippet-explain/state.json` under
//! [`CREDENTIAL_KEY`]. Other entries in the file are left untouched.

use explain_application::ports::credential_store::{CREDENTIAL_KEY, CredentialStore, StoreError};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the state file.
pub const STATE_FILE: &str = "state.json";

/// Credential store backed by a JSON file.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location, if it can be resolved.
    pub fn at_default_location() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// `{data_dir}/snippet-explain/state.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("snippet-explain").join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(io_error(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Corrupt(format!(
                "{}: expected a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(StoreError::Corrupt(format!("{}: {}", self.path.display(), e))),
        }
    }

    /// State to modify and write back. A corrupt file is replaced.
    fn state_for_update(&self) -> Result<Map<String, Value>, StoreError> {
        match self.read_state() {
            Err(StoreError::Corrupt(reason)) => {
                warn!("Overwriting corrupt credential state ({})", reason);
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn write_state(&self, state: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        let content = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|e| io_error(&self.path, e))?;
        // the creation mode does not apply to a file that already exists
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(|e| io_error(&self.path, e))?;
        }
        file.write_all(content.as_bytes())
            .map_err(|e| io_error(&self.path, e))?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let state = self.read_state()?;
        match state.get(CREDENTIAL_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(StoreError::Corrupt(format!(
                "{} is not a string: {}",
                CREDENTIAL_KEY, other
            ))),
        }
    }

    fn save(&self, obfuscated: &str) -> Result<(), StoreError> {
        let mut state = self.state_for_update()?;
        state.insert(CREDENTIAL_KEY.to_string(), Value::from(obfuscated));
        self.write_state(&state)?;
        debug!("Saved credential to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let state = match self.read_state() {
            Err(StoreError::Corrupt(reason)) => {
                warn!("Overwriting corrupt credential state ({})", reason);
                Map::new()
            }
            state => {
                let mut state = state?;
                if state.remove(CREDENTIAL_KEY).is_none() {
                    return Ok(());
                }
                state
            }
        };
        self.write_state(&state)?;
        debug!("Cleared credential from {}", self.path.display());
        Ok(())
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Io(format!("{}: {}", path.display(), e))
}
