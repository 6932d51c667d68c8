//! JSON-backed configuration store with init-once process semantics.
//!
//! Replaces the lazy global-singleton shape with an explicit handle: load a
//! store wherever configuration lives, optionally publish it once for the
//! whole process, and pass the resulting reference to consumers. The file
//! read is scoped inside `load`, so nothing stays open on any exit path.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ConfigStore {
    settings: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Parse a JSON object of string settings from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| Error::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Look up a setting; absence is `NotFound`, never an empty sentinel.
    pub fn setting(&self, key: &str) -> Result<&str> {
        if key.is_empty() {
            return Err(Error::invalid_argument("key", "must not be empty"));
        }
        self.settings
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::not_found("setting", key))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::invalid_argument("key", "must not be empty"));
        }
        self.settings.insert(key, value.into());
        Ok(())
    }

    /// Setting keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }
}

static PROCESS_CONFIG: OnceLock<ConfigStore> = OnceLock::new();

/// Publish `store` as the process-wide configuration, once.
///
/// Returns the installed handle; a second call is an `InvalidArgument` error
/// rather than a silent replacement. Consumers receive the returned
/// reference explicitly instead of reaching for a global accessor.
pub fn init_process_config(store: ConfigStore) -> Result<&'static ConfigStore> {
    if PROCESS_CONFIG.set(store).is_err() {
        return Err(Error::invalid_argument(
            "process_config",
            "already initialized",
        ));
    }
    process_config()
}

/// The process-wide configuration, if one was published.
pub fn process_config() -> Result<&'static ConfigStore> {
    PROCESS_CONFIG
        .get()
        .ok_or_else(|| Error::not_found("process_config", "not initialized"))
}
