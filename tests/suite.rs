// Centralized integration suite for the composition runtime; exercises chain
// ordering, registry resolution rules, publisher fan-out policy, and the
// error-kind contracts so changes surface in one place.
mod support;

use anyhow::Result;
use capstack::notify::{
    email_subscriber, email_wrapper, sms_wrapper,
};
use capstack::pricing::{self, PAYPAL_TIER_LIMIT, PercentDiscount};
use capstack::{
    BasicNotification, ConfigStore, EffectSink, Error, Message, Publisher, RegistryKey,
    StrategyHolder, build_chain,
};
use serde_json::json;
use std::io::Write;
use support::{failing_subscriber, recording_subscriber, sample_directory, tag_wrapper};
use tempfile::NamedTempFile;

// A chain of N wrappers always yields N+1 effects, outermost wrapper first
// and leaf last, for every N in the supported range.
#[test]
fn chain_effect_count_and_order_hold_for_all_lengths() -> Result<()> {
    for n in 0..=10usize {
        let wrappers = (0..n).map(|i| tag_wrapper(&format!("w{i}"))).collect();
        let chain = build_chain(Box::new(BasicNotification), wrappers);
        let effects = chain.invoke(&Message::new("ping"))?;

        assert_eq!(effects.len(), n + 1, "chain of {n} wrappers");
        // Wrappers added later are outermost and therefore observed first.
        for (position, effect) in effects.iter().take(n).enumerate() {
            assert_eq!(effect.detail, format!("w{}", n - 1 - position));
        }
        assert_eq!(effects[n].channel, "console");
    }
    Ok(())
}

// The documented convention for the notification scenario: leaf wrapped by
// email then sms delivers sms first, email second, leaf last.
#[test]
fn email_sms_chain_delivers_in_fixed_order() -> Result<()> {
    let chain = build_chain(
        Box::new(BasicNotification),
        vec![
            email_wrapper("admin@example.com"),
            sms_wrapper("+1-555-0123"),
        ],
    );
    let effects = chain.invoke(&Message::new("X"))?;
    let channels: Vec<&str> = effects.iter().map(|e| e.channel.as_str()).collect();
    assert_eq!(channels, ["sms", "email", "console"]);
    assert_eq!(effects[0].detail, "to +1-555-0123: X");
    Ok(())
}

#[test]
fn detach_restores_the_pre_attach_subscriber_set() -> Result<()> {
    let sink = EffectSink::new();
    let mut publisher = Publisher::new("ticker");
    publisher.attach(recording_subscriber("stable", sink.clone()));
    let before = publisher.subscriber_ids();

    let transient = email_subscriber("investor@example.com", sink.clone());
    publisher.attach(transient.clone());
    publisher.detach(&transient);
    assert_eq!(publisher.subscriber_ids(), before);

    publisher.notify(&Message::new("tick"))?;
    let effects = sink.drain();
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].channel, "stable");
    Ok(())
}

#[test]
fn notify_attempts_every_subscriber_and_aggregates_failures() {
    let sink = EffectSink::new();
    let mut publisher = Publisher::new("ticker");
    publisher.attach(recording_subscriber("first", sink.clone()));
    publisher.attach(failing_subscriber("broken_a"));
    publisher.attach(failing_subscriber("broken_b"));
    publisher.attach(recording_subscriber("last", sink.clone()));

    let err = publisher.notify(&Message::new("tick")).unwrap_err();
    match err {
        Error::Aggregate {
            attempted,
            failures,
        } => {
            assert_eq!(attempted, 4);
            let failed: Vec<&str> = failures.iter().map(|f| f.subscriber.as_str()).collect();
            assert_eq!(failed, ["broken_a", "broken_b"]);
            assert!(matches!(*failures[0].error, Error::NotFound { .. }));
        }
        other => panic!("expected aggregate failure, got {other:?}"),
    }
    // Both healthy subscribers ran despite the failures between them.
    assert_eq!(sink.drain().len(), 2);
}

#[test]
fn registry_resolution_matches_what_was_registered() -> Result<()> {
    let registry = pricing::processor_registry("****1234", "user@example.com", "0x7a2f")?;

    let Err(err) = registry.resolve(&RegistryKey::from("wire")) else {
        panic!("unregistered key must not resolve");
    };
    assert!(matches!(err, Error::Lookup { key } if key == "wire"));

    let processor = registry.resolve(&RegistryKey::from("paypal"))?;
    let effect = processor.invoke(&42_00)?;
    assert_eq!(effect.channel, "paypal");
    assert_eq!(effect.detail, "charged 4200 via account user@example.com");
    Ok(())
}

// An amount exactly at a tier threshold belongs to the next tier: upper
// bounds are exclusive.
#[test]
fn tier_boundaries_are_deterministic() -> Result<()> {
    let tiers = pricing::processor_tiers("****1234", "user@example.com", "0x7a2f");
    assert_eq!(tiers.resolve_by_rule(&PAYPAL_TIER_LIMIT)?.id(), "pay_creditcard");
    assert_eq!(
        tiers.resolve_by_rule(&(PAYPAL_TIER_LIMIT - 1))?.id(),
        "pay_paypal"
    );
    Ok(())
}

#[test]
fn strategy_swap_affects_only_later_invocations() -> Result<()> {
    let order = 1000_00;
    let mut discount = StrategyHolder::new(Box::new(PercentDiscount::regular()));
    let before = discount.invoke(&order)?;
    discount.set_active(Box::new(PercentDiscount::vip()));

    assert_eq!(before, 50_00);
    assert_eq!(discount.invoke(&order)?, 200_00);
    assert_eq!(pricing::final_price(&PercentDiscount::vip(), order)?, 800_00);
    Ok(())
}

#[test]
fn get_by_id_distinguishes_invalid_from_absent() {
    let directory = sample_directory();
    assert!(matches!(
        directory.get_by_id(-1),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        directory.get_by_id(99999),
        Err(Error::NotFound { .. })
    ));
    assert_eq!(directory.get_by_id(7).unwrap().email, "ada@example.com");
}

#[test]
fn config_store_loads_settings_from_json() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    let settings = json!({
        "database": "Server=localhost;Database=MyApp;",
        "max_connections": "100",
    });
    write!(file, "{settings}")?;

    let store = ConfigStore::load(file.path())?;
    assert_eq!(store.setting("max_connections")?, "100");
    assert!(matches!(
        store.setting("api_key"),
        Err(Error::NotFound { .. })
    ));
    Ok(())
}
