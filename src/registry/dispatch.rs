//! Keyed and rule-based capability resolution.
//!
//! The registry is deliberately strict: duplicate registrations and unknown
//! keys fail loudly instead of overwriting or returning a sentinel, so a
//! mis-wired host surfaces at the call site that caused it. Rule sets give
//! the threshold-style selection (first matching rule wins) with an explicit
//! default rather than an implicit catch-all.

use crate::capability::BoxCapability;
use crate::error::{Error, Result};
use crate::registry::key::RegistryKey;
use std::collections::BTreeMap;

/// Zero-argument constructor producing a fresh capability per resolution.
pub type Constructor<I, O> = Box<dyn Fn() -> BoxCapability<I, O>>;

/// Maps validated keys to capability constructors.
pub struct Registry<I, O> {
    entries: BTreeMap<RegistryKey, Constructor<I, O>>,
}

impl<I, O> Default for Registry<I, O> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<I, O> Registry<I, O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `key`.
    ///
    /// The key is validated first; registering an already-present key is an
    /// `InvalidArgument` error, never a silent overwrite.
    pub fn register<F>(&mut self, key: RegistryKey, constructor: F) -> Result<()>
    where
        F: Fn() -> BoxCapability<I, O> + 'static,
    {
        key.validate()?;
        if self.entries.contains_key(&key) {
            return Err(Error::invalid_argument(
                "key",
                format!("'{key}' is already registered"),
            ));
        }
        log::debug!("registry: registered '{key}'");
        self.entries.insert(key, Box::new(constructor));
        Ok(())
    }

    /// Resolve `key` to a freshly constructed capability.
    ///
    /// Absent keys fail with [`Error::Lookup`]; resolved instances never
    /// share state because the constructor runs per call.
    pub fn resolve(&self, key: &RegistryKey) -> Result<BoxCapability<I, O>> {
        match self.entries.get(key) {
            Some(constructor) => {
                log::debug!("registry: resolved '{key}'");
                Ok(constructor())
            }
            None => Err(Error::lookup(key.as_str())),
        }
    }

    pub fn contains(&self, key: &RegistryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &RegistryKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Rule<I, O> {
    label: String,
    applies: Box<dyn Fn(&I) -> bool>,
    constructor: Constructor<I, O>,
}

/// Ordered rule list for discriminator-by-value selection.
///
/// Evaluation is deterministic: rules run in insertion order and the first
/// match wins. Inputs matching no rule fall through to the default; with no
/// default registered, resolution fails with [`Error::Lookup`] carrying the
/// set label.
pub struct RuleSet<I, O> {
    label: String,
    rules: Vec<Rule<I, O>>,
    default: Option<Constructor<I, O>>,
}

impl<I, O> RuleSet<I, O> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            rules: Vec::new(),
            default: None,
        }
    }

    /// Append a rule; later rules are shadowed by earlier matches.
    pub fn rule<P, F>(mut self, label: impl Into<String>, applies: P, constructor: F) -> Self
    where
        P: Fn(&I) -> bool + 'static,
        F: Fn() -> BoxCapability<I, O> + 'static,
    {
        self.rules.push(Rule {
            label: label.into(),
            applies: Box::new(applies),
            constructor: Box::new(constructor),
        });
        self
    }

    /// Constructor used when no rule matches.
    pub fn default_rule<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> BoxCapability<I, O> + 'static,
    {
        self.default = Some(Box::new(constructor));
        self
    }

    /// Resolve the first matching rule for `input`.
    pub fn resolve_by_rule(&self, input: &I) -> Result<BoxCapability<I, O>> {
        for rule in &self.rules {
            if (rule.applies)(input) {
                log::debug!("rule set '{}': matched rule '{}'", self.label, rule.label);
                return Ok((rule.constructor)());
            }
        }
        match &self.default {
            Some(constructor) => {
                log::debug!("rule set '{}': fell through to default", self.label);
                Ok(constructor())
            }
            None => Err(Error::lookup(self.label.as_str())),
        }
    }
}
