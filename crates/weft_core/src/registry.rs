//! Widget registry and coordination core
//!
//! The registry owns the authoritative, insertion-ordered collection of
//! widgets, mediates every state transition, and bridges subscribers to
//! widget event channels so that widgets and subscribers never hold
//! direct references to each other.
//!
//! Lookup semantics around duplicate ids are intentionally asymmetric
//! and preserved as such (see the operation docs): `add` appends
//! duplicates, `remove` deletes every match, the state mutators address
//! only the first match in insertion order. Id uniqueness is a caller
//! convention enforced at the factory boundary, not here.
//!
//! All "not found" conditions are silent no-ops or lenient defaults;
//! none of these operations can fail.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::channel::{EventChannel, Subscription};
use crate::factory::WidgetFactory;
use crate::widget::{Widget, WidgetId, WidgetState};

new_key_type! {
    /// Storage handle for a widget owned by a registry
    pub struct WidgetKey;
}

/// A change to the registry's collection or to a widget's state
///
/// The host's render layer observes these to re-render reactively; the
/// registry's job ends at making the transitions correct and orderly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryChange {
    /// A widget was appended to the collection
    Added(WidgetId),
    /// A widget instance was removed (one notification per instance)
    Removed(WidgetId),
    /// A registry-mediated transition changed a widget's state
    StateChanged(WidgetId, WidgetState),
}

/// An external observer that attaches itself to widget event channels
///
/// The registry hands each widget to `attach` during
/// [`WidgetRegistry::subscribe_all`]; the subscriber keeps the
/// [`Subscription`](crate::channel::Subscription)s it creates and
/// thereby manages its own lifetime. The registry tracks no subscriber
/// identity.
pub trait Subscriber<E: Clone + Send + Sync + 'static> {
    /// Attach this subscriber to `widget`'s event channel
    fn attach(&mut self, widget: &dyn Widget<E>);
}

/// Owns the ordered widget collection and mediates state transitions
///
/// Insertion order is rendering order and is preserved by every
/// operation; `remove` only deletes matched entries, never reorders the
/// survivors. A mirror map caches each id's state so `state_of` is a
/// plain lookup; the mirror stays consistent with widget state as long
/// as all mutation goes through the registry, which the design requires.
pub struct WidgetRegistry<E: Clone + Send + Sync + 'static> {
    widgets: SlotMap<WidgetKey, Box<dyn Widget<E>>>,
    /// Insertion order of `widgets` keys
    order: Vec<WidgetKey>,
    /// Mirror of widget state by id; on duplicate ids this tracks the
    /// most recently added or mutated instance
    states: FxHashMap<WidgetId, WidgetState>,
    changes: EventChannel<RegistryChange>,
}

impl<E: Clone + Send + Sync + 'static> WidgetRegistry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            order: Vec::new(),
            states: FxHashMap::default(),
            changes: EventChannel::new(),
        }
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// Append a widget at the end of the collection
    ///
    /// A widget whose id is already present is appended alongside it
    /// (no dedup); the mirror entry for that id is overwritten with the
    /// new widget's state.
    pub fn add(&mut self, widget: Box<dyn Widget<E>>) -> WidgetKey {
        let id = widget.id().clone();
        let state = widget.state();
        let key = self.widgets.insert(widget);
        self.order.push(key);
        self.states.insert(id.clone(), state);
        debug!("widget {} added ({:?})", id, state);
        self.changes.emit(RegistryChange::Added(id));
        key
    }

    /// Append every widget a factory produces, in the factory's order
    pub fn populate(&mut self, factory: &dyn WidgetFactory<E>) {
        for widget in factory.build_widgets() {
            self.add(widget);
        }
    }

    /// Remove **all** widgets with this id, keeping the relative order
    /// of the remaining widgets; a no-op for absent ids
    ///
    /// Returns the number of instances removed.
    pub fn remove(&mut self, id: &WidgetId) -> usize {
        let mut removed = 0usize;
        self.order.retain(|key| {
            let matches = self.widgets.get(*key).is_some_and(|w| w.id() == id);
            if matches {
                self.widgets.remove(*key);
                removed += 1;
            }
            !matches
        });

        if removed == 0 {
            trace!("remove of unknown widget {} ignored", id);
            return 0;
        }

        self.states.remove(id);
        debug!("widget {} removed ({} instance(s))", id, removed);
        for _ in 0..removed {
            self.changes.emit(RegistryChange::Removed(id.clone()));
        }
        removed
    }

    /// Number of widgets in the collection
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate widgets in insertion order
    pub fn widgets(&self) -> impl Iterator<Item = &dyn Widget<E>> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.widgets.get(*key).map(|boxed| boxed.as_ref()))
    }

    /// First widget (insertion order) with this id, if any
    pub fn get(&self, id: &WidgetId) -> Option<&dyn Widget<E>> {
        self.widgets().find(|widget| widget.id() == id)
    }

    /// Widget by its storage handle
    pub fn widget(&self, key: WidgetKey) -> Option<&dyn Widget<E>> {
        self.widgets.get(key).map(|boxed| boxed.as_ref())
    }

    // =========================================================================
    // State transitions
    // =========================================================================

    /// Set the first widget with this id to [`WidgetState::Visible`]
    pub fn show(&mut self, id: &WidgetId) {
        self.transition(id, WidgetState::Visible);
    }

    /// Set the first widget with this id to [`WidgetState::Hidden`]
    pub fn hide(&mut self, id: &WidgetId) {
        self.transition(id, WidgetState::Hidden);
    }

    /// Set the first widget with this id to [`WidgetState::Disabled`]
    pub fn disable(&mut self, id: &WidgetId) {
        self.transition(id, WidgetState::Disabled);
    }

    /// Re-enable the first widget with this id; equivalent to [`show`](Self::show)
    pub fn enable(&mut self, id: &WidgetId) {
        self.transition(id, WidgetState::Visible);
    }

    /// Apply a transition to the first matching widget: mirror first,
    /// then the widget's own state, so both end consistent
    fn transition(&mut self, id: &WidgetId, next: WidgetState) {
        let Some(key) = self
            .order
            .iter()
            .copied()
            .find(|key| self.widgets.get(*key).is_some_and(|w| w.id() == id))
        else {
            trace!("state change for unknown widget {} ignored", id);
            return;
        };

        self.states.insert(id.clone(), next);
        let Some(widget) = self.widgets.get(key) else {
            return;
        };
        let prev = widget.state();
        widget.set_state(next);

        if prev != next {
            debug!("widget {} {:?} -> {:?}", id, prev, next);
            self.changes.emit(RegistryChange::StateChanged(id.clone(), next));
        }
    }

    /// State of the id per the mirror map, defaulting to
    /// [`WidgetState::Visible`] for unknown ids
    ///
    /// The default-on-miss is a deliberate trade-off: callers never
    /// handle an optional, at the cost of "absent" being
    /// indistinguishable from "present and visible". Use
    /// [`try_state_of`](Self::try_state_of) when absence matters.
    pub fn state_of(&self, id: &WidgetId) -> WidgetState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Strict variant of [`state_of`](Self::state_of) that signals absence
    pub fn try_state_of(&self, id: &WidgetId) -> Option<WidgetState> {
        self.states.get(id).copied()
    }

    // =========================================================================
    // Subscription wiring
    // =========================================================================

    /// Hand every widget currently in the collection to `subscriber`
    ///
    /// One-time snapshot: widgets added afterwards are NOT
    /// auto-subscribed. A host that adds widgets later re-invokes this
    /// with a fresh subscriber (re-attaching the same one would
    /// double-deliver on the widgets it already covers).
    pub fn subscribe_all(&self, subscriber: &mut dyn Subscriber<E>) {
        for widget in self.widgets() {
            subscriber.attach(widget);
        }
        trace!("subscriber attached to {} widget(s)", self.len());
    }

    /// The registry's change feed
    pub fn changes(&self) -> &EventChannel<RegistryChange> {
        &self.changes
    }

    /// Observe collection and state changes; detaches on drop
    pub fn observe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&RegistryChange) + Send + Sync + 'static,
    {
        self.changes.subscribe(observer)
    }
}

impl<E: Clone + Send + Sync + 'static> Default for WidgetRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
