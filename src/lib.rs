//! Behavior-composition runtime.
//!
//! The crate exposes one composable primitive, the single-operation
//! [`Capability`], and three structures built over it: wrapper chains where
//! each layer delegates to exactly one inner layer, a keyed/rule-based
//! registry that constructs capabilities on demand, and an ordered publisher
//! that fans an event out to capability-shaped subscribers. Concrete
//! notification, pricing, directory, and configuration capabilities show the
//! primitives in use; the demo binary records their effects as JSON lines.
//!
//! Nothing here is concurrent on its own. The registry map, the strategy
//! holder's active slot, and the publisher's subscriber list are the only
//! mutable state; hosts that share them across threads guard each with
//! external mutual exclusion as documented on the respective types.

pub mod capability;
pub mod chain;
pub mod config;
pub mod directory;
pub mod error;
pub mod notify;
pub mod pricing;
pub mod publisher;
pub mod registry;

pub use capability::{BoxCapability, Capability, FnCapability, SharedCapability};
pub use chain::{WrapperFactory, build_chain};
pub use config::{ConfigStore, init_process_config, process_config};
pub use directory::{Customer, CustomerDirectory};
pub use error::{Error, NotifyFailure, Result};
pub use notify::{BasicNotification, Effect, EffectSink, Message, NotificationCapability};
pub use publisher::Publisher;
pub use registry::{Constructor, Registry, RegistryKey, RuleSet, StrategyHolder};
