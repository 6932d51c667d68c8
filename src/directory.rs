//! Customer lookup with an unambiguous error contract.
//!
//! `get_by_id` never answers "invalid input" and "no such record" with the
//! same shape: a non-positive id is `InvalidArgument` at the boundary, a
//! well-formed id with no entry is `NotFound`. Callers match the kind, not
//! the message.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Default)]
pub struct CustomerDirectory {
    customers: BTreeMap<i64, Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a customer; ids must be positive and unique.
    pub fn insert(&mut self, customer: Customer) -> Result<()> {
        if customer.id <= 0 {
            return Err(Error::invalid_argument(
                "customer_id",
                format!("must be positive, got {}", customer.id),
            ));
        }
        if self.customers.contains_key(&customer.id) {
            return Err(Error::invalid_argument(
                "customer_id",
                format!("{} is already present", customer.id),
            ));
        }
        self.customers.insert(customer.id, customer);
        Ok(())
    }

    pub fn get_by_id(&self, id: i64) -> Result<&Customer> {
        if id <= 0 {
            return Err(Error::invalid_argument(
                "customer_id",
                format!("must be positive, got {id}"),
            ));
        }
        self.customers
            .get(&id)
            .ok_or_else(|| Error::not_found("customer", id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
