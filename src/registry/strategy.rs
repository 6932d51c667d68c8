//! Holder for a runtime-swappable capability.
//!
//! The holder isolates the one piece of genuinely mutable state in the
//! runtime: which capability is active. `set_active` is the sole mutator and
//! affects only invocations that happen after the swap. The holder is not
//! thread-safe by contract; a host exposing it to concurrent callers must
//! synchronize `set_active` against in-flight invocations externally.

use crate::capability::BoxCapability;
use crate::error::Result;

pub struct StrategyHolder<I, O> {
    active: BoxCapability<I, O>,
}

impl<I, O> StrategyHolder<I, O> {
    pub fn new(initial: BoxCapability<I, O>) -> Self {
        Self { active: initial }
    }

    /// Swap the active capability; completed invocations are unaffected.
    pub fn set_active(&mut self, next: BoxCapability<I, O>) {
        log::debug!(
            "strategy holder: active '{}' -> '{}'",
            self.active.id(),
            next.id()
        );
        self.active = next;
    }

    pub fn active_id(&self) -> &str {
        self.active.id()
    }

    /// Invoke whatever capability is active right now.
    pub fn invoke(&self, input: &I) -> Result<O> {
        self.active.invoke(input)
    }
}
