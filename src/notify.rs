//! Notification capabilities: the concrete chain and subscriber material.
//!
//! Effects are returned (and recorded) as serializable records rather than
//! printed, so callers observe delivery order from the value itself and can
//! emit transcripts as JSON. Chain convention applies throughout: a wrapper
//! records its own effect before delegating inward, so the outermost wrapper
//! appears first in the effect list and the leaf appears last.

use crate::capability::{BoxCapability, Capability, SharedCapability};
use crate::chain::WrapperFactory;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Event/input for the notification family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One observable delivery effect produced by a notification layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub channel: String,
    pub detail: String,
}

impl Effect {
    pub fn new(channel: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            detail: detail.into(),
        }
    }
}

/// Capability shape shared by the notification chain layers.
pub type NotificationCapability = BoxCapability<Message, Vec<Effect>>;

/// Leaf notification: one console-style effect, no delegation.
pub struct BasicNotification;

impl Capability for BasicNotification {
    type Input = Message;
    type Output = Vec<Effect>;

    fn id(&self) -> &str {
        "notify_basic"
    }

    fn invoke(&self, input: &Message) -> Result<Vec<Effect>> {
        Ok(vec![Effect::new(
            "console",
            format!("notification: {}", input.text),
        )])
    }
}

struct EmailLayer {
    inner: NotificationCapability,
    address: String,
}

impl Capability for EmailLayer {
    type Input = Message;
    type Output = Vec<Effect>;

    fn id(&self) -> &str {
        "notify_email"
    }

    fn invoke(&self, input: &Message) -> Result<Vec<Effect>> {
        let mut effects = vec![Effect::new(
            "email",
            format!("to {}: {}", self.address, input.text),
        )];
        effects.extend(self.inner.invoke(input)?);
        Ok(effects)
    }
}

struct SmsLayer {
    inner: NotificationCapability,
    number: String,
}

impl Capability for SmsLayer {
    type Input = Message;
    type Output = Vec<Effect>;

    fn id(&self) -> &str {
        "notify_sms"
    }

    fn invoke(&self, input: &Message) -> Result<Vec<Effect>> {
        let mut effects = vec![Effect::new(
            "sms",
            format!("to {}: {}", self.number, input.text),
        )];
        effects.extend(self.inner.invoke(input)?);
        Ok(effects)
    }
}

struct SlackLayer {
    inner: NotificationCapability,
    channel: String,
}

impl Capability for SlackLayer {
    type Input = Message;
    type Output = Vec<Effect>;

    fn id(&self) -> &str {
        "notify_slack"
    }

    fn invoke(&self, input: &Message) -> Result<Vec<Effect>> {
        let mut effects = vec![Effect::new(
            "slack",
            format!("to #{}: {}", self.channel, input.text),
        )];
        effects.extend(self.inner.invoke(input)?);
        Ok(effects)
    }
}

/// Escalation layer: records its own effect, then delegates with the message
/// rewritten so every inner layer sees the urgent form.
struct UrgentLayer {
    inner: NotificationCapability,
}

impl Capability for UrgentLayer {
    type Input = Message;
    type Output = Vec<Effect>;

    fn id(&self) -> &str {
        "notify_urgent"
    }

    fn invoke(&self, input: &Message) -> Result<Vec<Effect>> {
        let escalated = Message::new(format!("URGENT: {}", input.text));
        let mut effects = vec![Effect::new("priority", "message escalated")];
        effects.extend(self.inner.invoke(&escalated)?);
        Ok(effects)
    }
}

pub fn email_wrapper(address: impl Into<String>) -> WrapperFactory<Message, Vec<Effect>> {
    let address = address.into();
    Box::new(move |inner| Box::new(EmailLayer { inner, address }))
}

pub fn sms_wrapper(number: impl Into<String>) -> WrapperFactory<Message, Vec<Effect>> {
    let number = number.into();
    Box::new(move |inner| Box::new(SmsLayer { inner, number }))
}

pub fn slack_wrapper(channel: impl Into<String>) -> WrapperFactory<Message, Vec<Effect>> {
    let channel = channel.into();
    Box::new(move |inner| Box::new(SlackLayer { inner, channel }))
}

pub fn urgent_wrapper() -> WrapperFactory<Message, Vec<Effect>> {
    Box::new(|inner| Box::new(UrgentLayer { inner }))
}

/// Shared, clonable effect collector used by the subscriber side.
///
/// Poison on the inner lock is tolerated; a panicking subscriber in a host's
/// thread should not make the transcript unreadable.
#[derive(Clone, Default)]
pub struct EffectSink {
    effects: Arc<Mutex<Vec<Effect>>>,
}

impl EffectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, effect: Effect) {
        self.effects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(effect);
    }

    /// Copy of everything recorded so far, in record order.
    pub fn snapshot(&self) -> Vec<Effect> {
        self.effects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drain recorded effects, leaving the sink empty.
    pub fn drain(&self) -> Vec<Effect> {
        std::mem::take(
            &mut *self
                .effects
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

struct SinkSubscriber {
    id: String,
    channel: String,
    target: String,
    sink: EffectSink,
}

impl Capability for SinkSubscriber {
    type Input = Message;
    type Output = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn invoke(&self, event: &Message) -> Result<()> {
        if self.target.is_empty() {
            return Err(Error::invalid_argument("target", "must not be empty"));
        }
        self.sink.record(Effect::new(
            self.channel.clone(),
            format!("to {}: {}", self.target, event.text),
        ));
        Ok(())
    }
}

pub fn email_subscriber(
    address: impl Into<String>,
    sink: EffectSink,
) -> SharedCapability<Message, ()> {
    let address = address.into();
    Arc::new(SinkSubscriber {
        id: format!("sub_email_{address}"),
        channel: "email".into(),
        target: address,
        sink,
    })
}

pub fn sms_subscriber(
    number: impl Into<String>,
    sink: EffectSink,
) -> SharedCapability<Message, ()> {
    let number = number.into();
    Arc::new(SinkSubscriber {
        id: format!("sub_sms_{number}"),
        channel: "sms".into(),
        target: number,
        sink,
    })
}

pub fn push_subscriber(
    user_id: impl Into<String>,
    sink: EffectSink,
) -> SharedCapability<Message, ()> {
    let user_id = user_id.into();
    Arc::new(SinkSubscriber {
        id: format!("sub_push_{user_id}"),
        channel: "push".into(),
        target: user_id,
        sink,
    })
}
