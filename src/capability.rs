//! The single-operation behavior primitive everything else composes.
//!
//! A capability exposes exactly one fallible operation plus a stable id used
//! for logging and failure attribution. Wrappers, registries, strategy
//! holders, and publishers all traffic in these trait objects; nothing in the
//! crate requires a wider interface than the one operation a component
//! actually supports.

use crate::error::Result;
use std::marker::PhantomData;
use std::sync::Arc;

pub trait Capability {
    type Input;
    type Output;

    /// Stable identifier for logs and aggregate failure reports.
    fn id(&self) -> &str;

    /// Perform the capability's one operation.
    ///
    /// Implementations are immutable between invocations; failures propagate
    /// to the caller unchanged unless an outer wrapper translates them.
    fn invoke(&self, input: &Self::Input) -> Result<Self::Output>;
}

/// Owned capability used for chain composition and registry construction.
pub type BoxCapability<I, O> = Box<dyn Capability<Input = I, Output = O>>;

/// Shared capability used for subscriber sets, where detach works by
/// pointer identity.
pub type SharedCapability<I, O> = Arc<dyn Capability<Input = I, Output = O>>;

/// Adapter lifting a closure into a [`Capability`].
///
/// Keeps one-off behaviors (test fixtures, registry constructors) from each
/// needing a named struct.
pub struct FnCapability<I, O, F> {
    id: String,
    op: F,
    _io: PhantomData<fn(&I) -> O>,
}

impl<I, O, F> FnCapability<I, O, F>
where
    F: Fn(&I) -> Result<O>,
{
    pub fn new(id: impl Into<String>, op: F) -> Self {
        Self {
            id: id.into(),
            op,
            _io: PhantomData,
        }
    }
}

impl<I, O, F> Capability for FnCapability<I, O, F>
where
    F: Fn(&I) -> Result<O>,
{
    type Input = I;
    type Output = O;

    fn id(&self) -> &str {
        &self.id
    }

    fn invoke(&self, input: &I) -> Result<O> {
        (self.op)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn fn_capability_delegates_to_closure() {
        let double = FnCapability::new("double", |n: &i64| Ok(n * 2));
        assert_eq!(double.id(), "double");
        assert_eq!(double.invoke(&21).unwrap(), 42);
    }

    #[test]
    fn fn_capability_propagates_failures() {
        let strict = FnCapability::new("strict", |n: &i64| {
            if *n < 0 {
                Err(Error::invalid_argument("n", "must be non-negative"))
            } else {
                Ok(*n)
            }
        });
        assert!(matches!(
            strict.invoke(&-1),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
