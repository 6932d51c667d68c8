//! Error taxonomy for the composition runtime.
//!
//! Callers are expected to match on kinds rather than parse messages: an
//! invalid identifier and an absent record are distinct variants, and a
//! failed fan-out carries every subscriber failure instead of only the first.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// One subscriber failure recorded during a notify pass.
///
/// `subscriber` is the capability id so hosts can react per-listener; the
/// underlying error is preserved intact for programmatic inspection.
#[derive(Debug)]
pub struct NotifyFailure {
    pub subscriber: String,
    pub error: Box<Error>,
}

#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied a structurally invalid input (empty identifier,
    /// negative amount, duplicate registration).
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A well-formed identifier has no corresponding entry.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Registry or rule-set resolution failed; never a sentinel capability.
    #[error("lookup failed for '{key}': no matching entry")]
    Lookup { key: String },

    /// One or more subscriber notifications failed after every subscriber in
    /// the snapshot was attempted.
    #[error("{}/{attempted} subscriber notifications failed", failures.len())]
    Aggregate {
        attempted: usize,
        failures: Vec<NotifyFailure>,
    },

    #[error("unable to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn lookup(key: impl Into<String>) -> Self {
        Error::Lookup { key: key.into() }
    }
}
