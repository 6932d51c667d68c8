//! Pricing capabilities: discount strategies and payment processor selection.
//!
//! Amounts are minor currency units (cents) so percentage math stays exact.
//! Negative amounts are rejected at the boundary of whichever operation sees
//! them first, never deeper in. Processor selection demonstrates both keyed
//! resolution and the amount-tier rules; tier upper bounds are exclusive, so
//! an amount exactly at a threshold selects the next tier.

use crate::capability::{BoxCapability, Capability};
use crate::error::{Error, Result};
use crate::notify::Effect;
use crate::registry::{Registry, RegistryKey, RuleSet};

/// Minor currency units.
pub type Amount = i64;

/// Tier boundaries for processor-by-amount selection, in minor units.
pub const PAYPAL_TIER_LIMIT: Amount = 100_00;
pub const CREDITCARD_TIER_LIMIT: Amount = 10_000_00;

/// Reject negative amounts with the offending value in the error.
pub fn validate_amount(amount: Amount) -> Result<Amount> {
    if amount < 0 {
        return Err(Error::invalid_argument(
            "amount",
            format!("must not be negative, got {amount}"),
        ));
    }
    Ok(amount)
}

/// Percentage discount expressed in basis points.
pub struct PercentDiscount {
    id: &'static str,
    basis_points: i64,
}

impl PercentDiscount {
    pub fn regular() -> Self {
        Self {
            id: "discount_regular",
            basis_points: 500,
        }
    }

    pub fn gold() -> Self {
        Self {
            id: "discount_gold",
            basis_points: 1000,
        }
    }

    pub fn vip() -> Self {
        Self {
            id: "discount_vip",
            basis_points: 2000,
        }
    }

    pub fn seasonal() -> Self {
        Self {
            id: "discount_seasonal",
            basis_points: 1500,
        }
    }
}

impl Capability for PercentDiscount {
    type Input = Amount;
    type Output = Amount;

    fn id(&self) -> &str {
        self.id
    }

    fn invoke(&self, amount: &Amount) -> Result<Amount> {
        let amount = validate_amount(*amount)?;
        Ok(amount * self.basis_points / 10_000)
    }
}

/// Sum of two discounts, capped at the amount itself so the final price
/// never goes negative.
pub struct CompositeDiscount {
    first: BoxCapability<Amount, Amount>,
    second: BoxCapability<Amount, Amount>,
}

impl CompositeDiscount {
    pub fn new(
        first: BoxCapability<Amount, Amount>,
        second: BoxCapability<Amount, Amount>,
    ) -> Self {
        Self { first, second }
    }
}

impl Capability for CompositeDiscount {
    type Input = Amount;
    type Output = Amount;

    fn id(&self) -> &str {
        "discount_composite"
    }

    fn invoke(&self, amount: &Amount) -> Result<Amount> {
        let amount = validate_amount(*amount)?;
        let combined = self.first.invoke(&amount)? + self.second.invoke(&amount)?;
        Ok(combined.min(amount))
    }
}

/// Amount minus whatever the discount capability computes.
pub fn final_price(discount: &dyn Capability<Input = Amount, Output = Amount>, amount: Amount) -> Result<Amount> {
    let amount = validate_amount(amount)?;
    Ok(amount - discount.invoke(&amount)?)
}

struct Processor {
    id: &'static str,
    channel: &'static str,
    account: String,
}

impl Capability for Processor {
    type Input = Amount;
    type Output = Effect;

    fn id(&self) -> &str {
        self.id
    }

    fn invoke(&self, amount: &Amount) -> Result<Effect> {
        let amount = validate_amount(*amount)?;
        Ok(Effect::new(
            self.channel,
            format!("charged {amount} via {}", self.account),
        ))
    }
}

fn creditcard(masked_card: &str) -> BoxCapability<Amount, Effect> {
    Box::new(Processor {
        id: "pay_creditcard",
        channel: "creditcard",
        account: format!("card {masked_card}"),
    })
}

fn paypal(account: &str) -> BoxCapability<Amount, Effect> {
    Box::new(Processor {
        id: "pay_paypal",
        channel: "paypal",
        account: format!("account {account}"),
    })
}

fn crypto(wallet: &str) -> BoxCapability<Amount, Effect> {
    Box::new(Processor {
        id: "pay_crypto",
        channel: "crypto",
        account: format!("wallet {wallet}"),
    })
}

/// Keyed processor registry: `creditcard`, `paypal`, `crypto`.
pub fn processor_registry(
    masked_card: &str,
    paypal_account: &str,
    wallet: &str,
) -> Result<Registry<Amount, Effect>> {
    let mut registry = Registry::new();
    let card = masked_card.to_string();
    registry.register(RegistryKey::from("creditcard"), move || creditcard(&card))?;
    let account = paypal_account.to_string();
    registry.register(RegistryKey::from("paypal"), move || paypal(&account))?;
    let wallet = wallet.to_string();
    registry.register(RegistryKey::from("crypto"), move || crypto(&wallet))?;
    Ok(registry)
}

/// Processor-by-amount rules: paypal below 100_00, creditcard below
/// 10_000_00, crypto otherwise.
pub fn processor_tiers(
    masked_card: &str,
    paypal_account: &str,
    wallet: &str,
) -> RuleSet<Amount, Effect> {
    let account = paypal_account.to_string();
    let card = masked_card.to_string();
    let wallet = wallet.to_string();
    RuleSet::new("processor_tiers")
        .rule(
            "paypal_small",
            |amount: &Amount| *amount < PAYPAL_TIER_LIMIT,
            move || paypal(&account),
        )
        .rule(
            "creditcard_medium",
            |amount: &Amount| *amount < CREDITCARD_TIER_LIMIT,
            move || creditcard(&card),
        )
        .default_rule(move || crypto(&wallet))
}
