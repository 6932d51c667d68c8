//! Wrapper chain construction (the decorator side of the runtime).
//!
//! A chain is built front-to-back around a leaf: each factory consumes the
//! previously built capability and returns the capability that wraps it, so
//! cycles are impossible by construction. The convention is fixed across the
//! crate: the last-listed factory produces the outermost wrapper, the
//! outermost wrapper's effect is observed first, and the leaf's effect is
//! observed last.

use crate::capability::BoxCapability;

/// Consumes the inner capability and returns the wrapping capability.
pub type WrapperFactory<I, O> = Box<dyn FnOnce(BoxCapability<I, O>) -> BoxCapability<I, O>>;

/// Build a chain around `leaf`, applying `wrappers` in order.
///
/// An empty wrapper list returns the leaf unchanged. Composition itself
/// cannot fail; an invocation of the result fails only when a layer's
/// operation fails, and that failure propagates outward untranslated.
pub fn build_chain<I, O>(
    leaf: BoxCapability<I, O>,
    wrappers: Vec<WrapperFactory<I, O>>,
) -> BoxCapability<I, O> {
    let mut built = leaf;
    for wrap in wrappers {
        built = wrap(built);
        log::debug!("chain layer added: {}", built.id());
    }
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Capability, FnCapability};

    #[test]
    fn empty_wrapper_list_returns_leaf() {
        let leaf: BoxCapability<i64, i64> = Box::new(FnCapability::new("leaf", |n: &i64| Ok(*n)));
        let chain = build_chain(leaf, Vec::new());
        assert_eq!(chain.id(), "leaf");
        assert_eq!(chain.invoke(&7).unwrap(), 7);
    }

    #[test]
    fn later_factories_wrap_earlier_layers() {
        struct AddOne {
            inner: BoxCapability<i64, Vec<String>>,
        }
        impl Capability for AddOne {
            type Input = i64;
            type Output = Vec<String>;
            fn id(&self) -> &str {
                "add_one"
            }
            fn invoke(&self, input: &i64) -> crate::error::Result<Vec<String>> {
                let mut effects = vec![format!("outer saw {input}")];
                effects.extend(self.inner.invoke(input)?);
                Ok(effects)
            }
        }

        let leaf: BoxCapability<i64, Vec<String>> =
            Box::new(FnCapability::new("leaf", |n: &i64| Ok(vec![format!("leaf saw {n}")])));
        let chain = build_chain(
            leaf,
            vec![Box::new(|inner| Box::new(AddOne { inner }) as BoxCapability<_, _>)],
        );
        assert_eq!(
            chain.invoke(&3).unwrap(),
            vec!["outer saw 3".to_string(), "leaf saw 3".to_string()]
        );
    }
}
