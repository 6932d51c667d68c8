// Shared fixtures for the integration suite: a generic tagging wrapper for
// chain-length properties, sink-backed and failing subscribers, and sample
// domain data.

use capstack::chain::WrapperFactory;
use capstack::notify::{Effect, EffectSink, Message, NotificationCapability};
use capstack::{Capability, Customer, CustomerDirectory, Error, FnCapability, SharedCapability};
use std::sync::Arc;

struct TagLayer {
    id: String,
    tag: String,
    inner: NotificationCapability,
}

impl Capability for TagLayer {
    type Input = Message;
    type Output = Vec<Effect>;

    fn id(&self) -> &str {
        &self.id
    }

    fn invoke(&self, input: &Message) -> capstack::Result<Vec<Effect>> {
        let mut effects = vec![Effect::new("tag", self.tag.clone())];
        effects.extend(self.inner.invoke(input)?);
        Ok(effects)
    }
}

/// Wrapper whose only effect is a `tag` record, for counting layers.
pub fn tag_wrapper(tag: &str) -> WrapperFactory<Message, Vec<Effect>> {
    let tag = tag.to_string();
    Box::new(move |inner| {
        Box::new(TagLayer {
            id: format!("tag_{tag}"),
            tag,
            inner,
        })
    })
}

/// Subscriber that records `<id>:<message>` into the sink and never fails.
pub fn recording_subscriber(id: &str, sink: EffectSink) -> SharedCapability<Message, ()> {
    let tag = id.to_string();
    Arc::new(FnCapability::new(id, move |event: &Message| {
        sink.record(Effect::new(tag.clone(), event.text.clone()));
        Ok(())
    }))
}

/// Subscriber that always fails with `NotFound`, for aggregate tests.
pub fn failing_subscriber(id: &'static str) -> SharedCapability<Message, ()> {
    Arc::new(FnCapability::new(id, move |_: &Message| {
        Err(Error::not_found("endpoint", id))
    }))
}

pub fn sample_directory() -> CustomerDirectory {
    let mut directory = CustomerDirectory::new();
    directory
        .insert(Customer {
            id: 7,
            name: "Ada".into(),
            email: "ada@example.com".into(),
        })
        .expect("fixture insert");
    directory
}
