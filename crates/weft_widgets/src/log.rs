//! Event-recording subscriber
//!
//! An order-preserving log of every event received from the widgets it
//! was attached to. Doubles as test instrumentation and as a simple
//! host-side event sink.

use std::sync::{Arc, Mutex};

use weft_core::{Subscriber, Subscription, Widget};

/// Records every received event, in arrival order
///
/// The log owns its [`Subscription`]s, so dropping it detaches it from
/// every widget it was attached to.
pub struct EventLog<E: Clone + Send + Sync + 'static> {
    events: Arc<Mutex<Vec<E>>>,
    subscriptions: Vec<Subscription>,
}

impl<E: Clone + Send + Sync + 'static> EventLog<E> {
    /// Create an empty log
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            subscriptions: Vec::new(),
        }
    }

    /// Snapshot of the received events
    pub fn events(&self) -> Vec<E> {
        self.events.lock().unwrap().clone()
    }

    /// Number of received events
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Whether nothing has been received
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }

    /// Number of widgets this log is attached to
    pub fn attached(&self) -> usize {
        self.subscriptions.len()
    }

    /// Forget received events; attachments are kept
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl<E: Clone + Send + Sync + 'static> Subscriber<E> for EventLog<E> {
    fn attach(&mut self, widget: &dyn Widget<E>) {
        let events = self.events.clone();
        self.subscriptions.push(widget.channel().subscribe(move |event: &E| {
            events.lock().unwrap().push(event.clone());
        }));
    }
}

impl<E: Clone + Send + Sync + 'static> Default for EventLog<E> {
    fn default() -> Self {
        Self::new()
    }
}
