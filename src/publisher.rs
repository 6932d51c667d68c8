//! Ordered subscriber set with synchronous fan-out.
//!
//! Subscribers are capabilities over the event type whose output is `()`.
//! `notify` snapshots the subscriber list before invoking anyone, so a host
//! that interleaves attach/detach with an in-flight notification never
//! changes that notification's listener set. Failure policy: every snapshot
//! entry is attempted, and failures are reported together afterwards rather
//! than aborting at the first one.

use crate::capability::SharedCapability;
use crate::error::{Error, NotifyFailure, Result};
use std::sync::Arc;

pub struct Publisher<E> {
    topic: String,
    subscribers: Vec<SharedCapability<E, ()>>,
}

impl<E> Publisher<E> {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            subscribers: Vec::new(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Append a subscriber; duplicates are allowed and notified once per
    /// attachment.
    pub fn attach(&mut self, subscriber: SharedCapability<E, ()>) {
        log::trace!("publisher '{}': attach '{}'", self.topic, subscriber.id());
        self.subscribers.push(subscriber);
    }

    /// Remove the first pointer-identical attachment.
    ///
    /// A no-op when the subscriber was never attached; detaching is not an
    /// error condition.
    pub fn detach(&mut self, subscriber: &SharedCapability<E, ()>) {
        if let Some(position) = self
            .subscribers
            .iter()
            .position(|attached| Arc::ptr_eq(attached, subscriber))
        {
            log::trace!("publisher '{}': detach '{}'", self.topic, subscriber.id());
            self.subscribers.remove(position);
        }
    }

    /// Subscriber ids in attachment order.
    pub fn subscriber_ids(&self) -> Vec<String> {
        self.subscribers
            .iter()
            .map(|subscriber| subscriber.id().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Notify every currently-attached subscriber, in attachment order.
    ///
    /// All subscribers in the snapshot run even when earlier ones fail; any
    /// failures come back as a single [`Error::Aggregate`] carrying one
    /// [`NotifyFailure`] per failing subscriber.
    pub fn notify(&self, event: &E) -> Result<()> {
        let snapshot: Vec<SharedCapability<E, ()>> = self.subscribers.clone();
        log::trace!(
            "publisher '{}': notifying {} subscribers",
            self.topic,
            snapshot.len()
        );

        let mut failures = Vec::new();
        for subscriber in &snapshot {
            if let Err(error) = subscriber.invoke(event) {
                failures.push(NotifyFailure {
                    subscriber: subscriber.id().to_string(),
                    error: Box::new(error),
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Aggregate {
                attempted: snapshot.len(),
                failures,
            })
        }
    }
}
