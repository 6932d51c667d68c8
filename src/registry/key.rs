use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable discriminator for a registered capability constructor
/// (e.g., `creditcard`, `notify_email`).
///
/// Keys travel in transcripts and failure reports, so the accepted character
/// set is the conservative `^[A-Za-z0-9_.-]+$` and validation happens at
/// registration time rather than on each lookup.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryKey(pub String);

impl RegistryKey {
    pub fn new(value: impl Into<String>) -> Self {
        RegistryKey(value.into())
    }

    /// Reject empty or out-of-charset keys before they enter the map.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::invalid_argument("key", "must not be empty"));
        }
        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(Error::invalid_argument(
                "key",
                format!("must match ^[A-Za-z0-9_.-]+$, got '{}'", self.0),
            ));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegistryKey {
    fn from(value: &str) -> Self {
        RegistryKey(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_through_serde() {
        let key = RegistryKey::new("creditcard");
        let serialized = serde_json::to_string(&key).unwrap();
        assert_eq!(serialized, "\"creditcard\"");
        let parsed: RegistryKey = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn validation_rejects_empty_and_out_of_charset_keys() {
        assert!(RegistryKey::new("").validate().is_err());
        assert!(RegistryKey::new("pay pal").validate().is_err());
        assert!(RegistryKey::new("tier.low-1_a").validate().is_ok());
    }
}
