//! Per-widget event subscription channel
//!
//! One emission source, many observers. Delivery is synchronous and in
//! attachment order; there is no buffering and no replay, so a sink
//! attached after an emission never sees it.
//!
//! The channel exposes no `unsubscribe`: a [`Subscription`] is a scoped
//! resource that detaches its sink when dropped, which is how observers
//! release themselves on their own teardown.
//!
//! Emission snapshots the sink list before iterating. A sink that
//! detaches while an emission is in flight still receives that event;
//! a sink attached while an emission is in flight does not.

use std::sync::{Arc, RwLock, Weak};

use smallvec::SmallVec;

type Sink<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct ChannelInner<E> {
    /// Monotonic attachment token; delivery order is attachment order,
    /// so tokens are never reused
    next_token: u64,
    sinks: SmallVec<[(u64, Sink<E>); 4]>,
}

impl<E> ChannelInner<E> {
    fn new() -> Self {
        Self {
            next_token: 0,
            sinks: SmallVec::new(),
        }
    }
}

/// A single-source, many-observer event conduit
///
/// Cloning yields another handle to the same channel. The channel is
/// dropped (and all sinks released) when the last strong handle goes
/// away; [`WeakChannel`] handles do not keep it alive.
pub struct EventChannel<E: Clone + Send + Sync + 'static> {
    inner: Arc<RwLock<ChannelInner<E>>>,
}

impl<E: Clone + Send + Sync + 'static> EventChannel<E> {
    /// Create an empty channel
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ChannelInner::new())),
        }
    }

    /// Attach a sink; it receives every event emitted while the
    /// returned [`Subscription`] is alive
    pub fn subscribe<F>(&self, sink: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let token = {
            let mut inner = self.inner.write().unwrap();
            let token = inner.next_token;
            inner.next_token += 1;
            inner.sinks.push((token, Arc::new(sink)));
            token
        };

        let channel = Arc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = channel.upgrade() {
                    inner.write().unwrap().sinks.retain(|(t, _)| *t != token);
                }
            })),
        }
    }

    /// Synchronously deliver `event` to every attached sink, in
    /// attachment order, exactly once each
    pub fn emit(&self, event: E) {
        // Snapshot so sinks may subscribe/detach reentrantly without
        // holding the lock across user code
        let snapshot: SmallVec<[Sink<E>; 4]> = {
            let inner = self.inner.read().unwrap();
            inner.sinks.iter().map(|(_, sink)| Arc::clone(sink)).collect()
        };
        for sink in snapshot {
            sink(&event);
        }
    }

    /// Number of currently attached sinks
    pub fn subscriber_count(&self) -> usize {
        self.inner.read().unwrap().sinks.len()
    }

    /// A non-owning handle for deferred emissions
    pub fn downgrade(&self) -> WeakChannel<E> {
        WeakChannel {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<E: Clone + Send + Sync + 'static> Clone for EventChannel<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Clone + Send + Sync + 'static> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// A non-owning channel handle
///
/// Scheduled or otherwise deferred emissions hold one of these instead
/// of an [`EventChannel`], so a widget removed from its registry is not
/// kept alive by a pending task; the deferred emission simply vanishes.
pub struct WeakChannel<E: Clone + Send + Sync + 'static> {
    inner: Weak<RwLock<ChannelInner<E>>>,
}

impl<E: Clone + Send + Sync + 'static> WeakChannel<E> {
    /// Emit if the channel is still alive; returns whether it was
    pub fn emit(&self, event: E) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                EventChannel { inner }.emit(event);
                true
            }
            None => false,
        }
    }
}

impl<E: Clone + Send + Sync + 'static> Clone for WeakChannel<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

/// Handle tying a sink's lifetime to its owner
///
/// Dropping the subscription detaches the sink from its channel. There
/// is deliberately no other way to unsubscribe.
#[must_use = "dropping a Subscription detaches its sink immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_delivery_in_attachment_order() {
        let channel: EventChannel<i32> = EventChannel::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = seen.clone();
        let _a = channel.subscribe(move |n| first.lock().unwrap().push(("a", *n)));
        let second = seen.clone();
        let _b = channel.subscribe(move |n| second.lock().unwrap().push(("b", *n)));

        channel.emit(1);
        channel.emit(2);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]
        );
    }

    #[test]
    fn test_no_replay_for_late_subscribers() {
        let channel: EventChannel<i32> = EventChannel::new();
        channel.emit(1);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = channel.subscribe(move |n| sink.lock().unwrap().push(*n));

        channel.emit(2);
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_drop_detaches_sink() {
        let channel: EventChannel<i32> = EventChannel::new();
        let count = Arc::new(Mutex::new(0));

        let counter = count.clone();
        let sub = channel.subscribe(move |_| *counter.lock().unwrap() += 1);
        assert_eq!(channel.subscriber_count(), 1);

        channel.emit(1);
        drop(sub);
        assert_eq!(channel.subscriber_count(), 0);

        channel.emit(2);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_emit_snapshots_sinks() {
        // A sink that detaches another subscription mid-emission must
        // not suppress the in-flight delivery to that subscription
        let channel: EventChannel<i32> = EventChannel::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let victim_slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let slot = victim_slot.clone();
        let _killer = channel.subscribe(move |_| {
            slot.lock().unwrap().take();
        });

        let sink = seen.clone();
        let victim = channel.subscribe(move |n| sink.lock().unwrap().push(*n));
        *victim_slot.lock().unwrap() = Some(victim);

        channel.emit(7);
        assert_eq!(*seen.lock().unwrap(), vec![7]);
        assert_eq!(channel.subscriber_count(), 1);

        channel.emit(8);
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_subscribe_during_emission_misses_event() {
        let channel: EventChannel<i32> = EventChannel::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let late: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let chan = channel.clone();
        let slot = late.clone();
        let sink = seen.clone();
        let _outer = channel.subscribe(move |_| {
            let inner_sink = sink.clone();
            let sub = chan.subscribe(move |n| inner_sink.lock().unwrap().push(*n));
            *slot.lock().unwrap() = Some(sub);
        });

        channel.emit(1);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_weak_channel_emits_while_alive() {
        let channel: EventChannel<i32> = EventChannel::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = channel.subscribe(move |n| sink.lock().unwrap().push(*n));

        let weak = channel.downgrade();
        assert!(weak.emit(3));
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_weak_channel_is_inert_after_drop() {
        let channel: EventChannel<i32> = EventChannel::new();
        let weak = channel.downgrade();
        drop(channel);
        assert!(!weak.emit(3));
    }
}
