//! Walk-through binary for the composition runtime.
//!
//! Each scenario builds capabilities through the public API, invokes them,
//! and emits every observed effect as one JSON line so the transcript can be
//! piped into JSON tooling. Scenarios are selected by flag; with no flag all
//! of them run in a fixed order. An optional `--config <path>` loads a JSON
//! settings file and prints the resolved settings first.

use anyhow::{Context, Result, bail};
use capstack::{
    BasicNotification, ConfigStore, Customer, CustomerDirectory, Effect, EffectSink,
    Message, Publisher, RegistryKey, StrategyHolder, build_chain,
    notify::{
        email_subscriber, email_wrapper, push_subscriber, slack_wrapper, sms_subscriber,
        sms_wrapper, urgent_wrapper,
    },
    pricing::{self, PercentDiscount},
};
use serde_json::json;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;

    if let Some(path) = &cli.config {
        let store = ConfigStore::load(path)
            .with_context(|| format!("loading config {}", path.display()))?;
        for key in store.keys() {
            let value = store.setting(key)?;
            emit("config", &Effect::new("setting", format!("{key}={value}")));
        }
    }

    match cli.scenario {
        Scenario::Chain => chain_scenario()?,
        Scenario::Registry => registry_scenario()?,
        Scenario::Publish => publish_scenario()?,
        Scenario::Pricing => pricing_scenario()?,
        Scenario::All => {
            chain_scenario()?;
            registry_scenario()?;
            publish_scenario()?;
            pricing_scenario()?;
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Chain,
    Registry,
    Publish,
    Pricing,
    All,
}

struct Cli {
    scenario: Scenario,
    config: Option<PathBuf>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut scenario = Scenario::All;
        let mut config = None;

        let mut args = env::args();
        let _program = args.next();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--chain" => scenario = Scenario::Chain,
                "--registry" => scenario = Scenario::Registry,
                "--publish" => scenario = Scenario::Publish,
                "--pricing" => scenario = Scenario::Pricing,
                "--config" => {
                    let Some(path) = args.next() else {
                        bail!("--config requires a path argument");
                    };
                    config = Some(PathBuf::from(path));
                }
                "--help" | "-h" => usage(0),
                _ => usage(1),
            }
        }

        Ok(Self { scenario, config })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: capstack-demo [--chain | --registry | --publish | --pricing] [--config <path>]\n\nScenarios:\n  --chain      Build a notification wrapper chain and show effect order.\n  --registry   Resolve payment processors by key and by amount tier.\n  --publish    Fan a price update out to subscribers, then detach one.\n  --pricing    Swap discount strategies at runtime and price an order.\n\nWithout a scenario flag, all scenarios run in the order above."
    );
    std::process::exit(code);
}

fn emit(scenario: &str, effect: &Effect) {
    println!(
        "{}",
        json!({
            "scenario": scenario,
            "channel": effect.channel,
            "detail": effect.detail,
        })
    );
}

/// Outermost wrapper (listed last) acts first; the leaf always acts last.
fn chain_scenario() -> Result<()> {
    let chain = build_chain(
        Box::new(BasicNotification),
        vec![
            email_wrapper("admin@example.com"),
            sms_wrapper("+1-555-0123"),
            slack_wrapper("alerts"),
            urgent_wrapper(),
        ],
    );
    for effect in chain.invoke(&Message::new("server is down"))? {
        emit("chain", &effect);
    }
    Ok(())
}

fn registry_scenario() -> Result<()> {
    let registry = pricing::processor_registry("****1234", "user@example.com", "0x7a2f")?;
    let processor = registry.resolve(&RegistryKey::from("creditcard"))?;
    emit("registry", &processor.invoke(&150_00)?);

    // Unknown keys fail loudly; show the error shape in the transcript.
    if let Err(err) = registry.resolve(&RegistryKey::from("wire")) {
        emit("registry", &Effect::new("error", err.to_string()));
    }

    let tiers = pricing::processor_tiers("****1234", "user@example.com", "0x7a2f");
    for amount in [25_00, 100_00, 25_000_00] {
        let selected = tiers.resolve_by_rule(&amount)?;
        emit("registry", &selected.invoke(&amount)?);
    }
    Ok(())
}

fn publish_scenario() -> Result<()> {
    let sink = EffectSink::new();
    let mut ticker = Publisher::new("AAPL");
    let sms = sms_subscriber("+1-555-0123", sink.clone());
    ticker.attach(email_subscriber("investor@example.com", sink.clone()));
    ticker.attach(sms.clone());
    ticker.attach(push_subscriber("user123", sink.clone()));

    ticker.notify(&Message::new("AAPL at 150.25"))?;
    ticker.detach(&sms);
    ticker.notify(&Message::new("AAPL at 148.75"))?;

    for effect in sink.drain() {
        emit("publish", &effect);
    }
    Ok(())
}

fn pricing_scenario() -> Result<()> {
    let order = 1000_00;
    let mut discount = StrategyHolder::new(Box::new(PercentDiscount::regular()));
    emit_price(&discount, order)?;
    discount.set_active(Box::new(PercentDiscount::vip()));
    emit_price(&discount, order)?;

    let directory = sample_directory()?;
    let customer = directory.get_by_id(7)?;
    emit(
        "pricing",
        &Effect::new("customer", format!("pricing order for {}", customer.name)),
    );
    Ok(())
}

fn emit_price(discount: &StrategyHolder<i64, i64>, amount: i64) -> Result<()> {
    let off = discount.invoke(&amount)?;
    emit(
        "pricing",
        &Effect::new(
            discount.active_id(),
            format!("amount {amount}, discount {off}, final {}", amount - off),
        ),
    );
    Ok(())
}

fn sample_directory() -> Result<CustomerDirectory> {
    let mut directory = CustomerDirectory::new();
    directory.insert(Customer {
        id: 7,
        name: "Ada".into(),
        email: "ada@example.com".into(),
    })?;
    Ok(directory)
}
