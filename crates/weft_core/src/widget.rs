//! Base widget contract and state types
//!
//! A widget is an identity-bearing, stateful, event-emitting unit. Its
//! visibility state is a small closed enumeration owned by the widget
//! itself and mutated only through [`Widget::set_state`]; external code
//! never writes it directly. State storage plus change notification is
//! packaged as [`StateCell`] so concrete widget types don't re-implement
//! the watcher plumbing.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::channel::{EventChannel, Subscription};

/// Opaque widget identity, unique within one registry by caller
/// convention. Cheap to clone and hashable.
///
/// Uniqueness is NOT enforced by the registry; see
/// [`WidgetRegistry`](crate::registry::WidgetRegistry) for how duplicate
/// ids behave in lookups.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(Arc<str>);

impl WidgetId {
    /// Create an id from anything string-like
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WidgetId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visibility/enablement state of a widget
///
/// Governs whether the host renders the widget's content, renders
/// nothing, or renders content non-interactively. No state is terminal;
/// every transition is allowed from every state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidgetState {
    /// Rendered and interactive
    #[default]
    Visible,
    /// Not rendered at all
    Hidden,
    /// Rendered, but interaction is ignored
    Disabled,
}

impl WidgetState {
    /// Whether the host should draw the widget's content
    pub fn is_visible(&self) -> bool {
        matches!(self, WidgetState::Visible | WidgetState::Disabled)
    }

    /// Whether the widget reacts to user interaction
    pub fn is_interactive(&self) -> bool {
        matches!(self, WidgetState::Visible)
    }
}

/// Widget state with change notification
///
/// Bundles the current [`WidgetState`] with a watcher channel so that
/// `set` transparently notifies observers (the reactive re-render
/// bridge). Watchers are only notified when the value actually changed;
/// overwriting a state with itself is observable-state idempotent.
pub struct StateCell {
    state: RwLock<WidgetState>,
    watchers: EventChannel<WidgetState>,
}

impl StateCell {
    /// Create a cell holding `initial`
    pub fn new(initial: WidgetState) -> Self {
        Self {
            state: RwLock::new(initial),
            watchers: EventChannel::new(),
        }
    }

    /// Current state
    pub fn get(&self) -> WidgetState {
        *self.state.read().unwrap()
    }

    /// Unconditional overwrite; notifies watchers if the value changed
    pub fn set(&self, next: WidgetState) {
        let prev = {
            let mut state = self.state.write().unwrap();
            let prev = *state;
            *state = next;
            prev
        };
        if prev != next {
            self.watchers.emit(next);
        }
    }

    /// Watch for state changes; the subscription detaches on drop
    pub fn watch<F>(&self, watcher: F) -> Subscription
    where
        F: Fn(&WidgetState) + Send + Sync + 'static,
    {
        self.watchers.subscribe(watcher)
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new(WidgetState::default())
    }
}

/// The presentation artifact a widget hands to the host's view layer
///
/// Deliberately inert data: composing, animating, and laying out these
/// is the presentation collaborator's concern. Widgets return their
/// artifact unconditionally; whether it is drawn is the host's
/// visibility decision, made from registry state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderNode {
    pub id: WidgetId,
    pub text: String,
    /// Whether the widget would currently accept interaction
    pub interactive: bool,
}

/// Base trait for all widgets, generic over the host's event type
///
/// Every method takes `&self`; concrete widgets keep their mutable
/// state behind a [`StateCell`] (or equivalent interior mutability) so
/// they can be driven through shared handles.
pub trait Widget<E: Clone + Send + Sync + 'static>: Send + Sync {
    /// Stable identity, immutable for the widget's lifetime
    fn id(&self) -> &WidgetId;

    /// Current visibility/enablement state
    fn state(&self) -> WidgetState;

    /// Unconditional state overwrite; no transition is ever rejected
    fn set_state(&self, state: WidgetState);

    /// Watch this widget's own state changes (the reactive re-render
    /// bridge); the subscription detaches on drop
    fn watch_state(&self, watcher: Box<dyn Fn(&WidgetState) + Send + Sync>) -> Subscription;

    /// The widget's event channel
    fn channel(&self) -> &EventChannel<E>;

    /// Produce the presentation artifact for the host to draw
    fn render(&self) -> RenderNode;

    /// Fire-and-forget event emission to every attached subscriber
    fn emit(&self, event: E) {
        self.channel().emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_widget_id_roundtrip() {
        let id = WidgetId::from("sidebar");
        assert_eq!(id.as_str(), "sidebar");
        assert_eq!(id.to_string(), "sidebar");
        assert_eq!(id, WidgetId::from("sidebar".to_string()));
        assert_ne!(id, WidgetId::from("toolbar"));
    }

    #[test]
    fn test_state_default_is_visible() {
        assert_eq!(WidgetState::default(), WidgetState::Visible);
    }

    #[test]
    fn test_state_predicates() {
        assert!(WidgetState::Visible.is_visible());
        assert!(WidgetState::Visible.is_interactive());

        assert!(!WidgetState::Hidden.is_visible());
        assert!(!WidgetState::Hidden.is_interactive());

        assert!(WidgetState::Disabled.is_visible());
        assert!(!WidgetState::Disabled.is_interactive());
    }

    #[test]
    fn test_state_cell_set_and_get() {
        let cell = StateCell::default();
        assert_eq!(cell.get(), WidgetState::Visible);

        cell.set(WidgetState::Hidden);
        assert_eq!(cell.get(), WidgetState::Hidden);

        cell.set(WidgetState::Disabled);
        assert_eq!(cell.get(), WidgetState::Disabled);
    }

    #[test]
    fn test_state_cell_notifies_watchers() {
        let cell = StateCell::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = cell.watch(move |state| sink.lock().unwrap().push(*state));

        cell.set(WidgetState::Hidden);
        cell.set(WidgetState::Visible);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![WidgetState::Hidden, WidgetState::Visible]
        );
    }

    #[test]
    fn test_state_cell_skips_no_op_overwrites() {
        let cell = StateCell::default();
        let count = Arc::new(Mutex::new(0));
        let counter = count.clone();
        let _sub = cell.watch(move |_| *counter.lock().unwrap() += 1);

        cell.set(WidgetState::Hidden);
        cell.set(WidgetState::Hidden);
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(cell.get(), WidgetState::Hidden);
    }

    #[test]
    fn test_state_cell_watch_detaches_on_drop() {
        let cell = StateCell::default();
        let count = Arc::new(Mutex::new(0));
        let counter = count.clone();
        let sub = cell.watch(move |_| *counter.lock().unwrap() += 1);

        cell.set(WidgetState::Hidden);
        drop(sub);
        cell.set(WidgetState::Visible);
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
