//! Capability resolution: keyed registry, rule-based dispatch, and the
//! runtime-swappable strategy holder.
//!
//! Registration and resolution are the only mutable map operations in the
//! crate; a host exposing them to concurrent callers guards the registry and
//! each holder with its own mutual exclusion, since concurrent `resolve`
//! during `register` (or invocation during `set_active`) is undefined here.

pub mod dispatch;
pub mod key;
pub mod strategy;

pub use dispatch::{Constructor, Registry, RuleSet};
pub use key::RegistryKey;
pub use strategy::StrategyHolder;
