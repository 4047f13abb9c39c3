//! Toggle widget
//!
//! A two-position switch. `toggle()` flips the value and emits
//! [`UiEvent::Toggled`] with the new position; programmatic `set_on`
//! changes the value silently.

use std::sync::{Arc, RwLock};

use tracing::trace;
use weft_core::{EventChannel, RenderNode, StateCell, Subscription, Widget, WidgetId, WidgetState};

use crate::event::UiEvent;

/// Toggle configuration
#[derive(Clone, Debug)]
pub struct ToggleConfig {
    /// Label text
    pub label: String,
    /// Whether the toggle starts in the on position
    pub initially_on: bool,
    /// State the toggle starts in
    pub initial_state: WidgetState,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            initially_on: false,
            initial_state: WidgetState::Visible,
        }
    }
}

impl ToggleConfig {
    /// Create a new toggle config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the starting position
    pub fn on(mut self, on: bool) -> Self {
        self.initially_on = on;
        self
    }

    /// Set the initial state
    pub fn state(mut self, state: WidgetState) -> Self {
        self.initial_state = state;
        self
    }
}

struct ToggleInner {
    id: WidgetId,
    cell: StateCell,
    on: RwLock<bool>,
    channel: EventChannel<UiEvent>,
    config: ToggleConfig,
}

/// A flip-to-emit switch widget
#[derive(Clone)]
pub struct Toggle {
    inner: Arc<ToggleInner>,
}

impl Toggle {
    /// Create a toggle from a config
    pub fn new(id: impl Into<WidgetId>, config: ToggleConfig) -> Self {
        Self {
            inner: Arc::new(ToggleInner {
                id: id.into(),
                cell: StateCell::new(config.initial_state),
                on: RwLock::new(config.initially_on),
                channel: EventChannel::new(),
                config,
            }),
        }
    }

    /// The label text
    pub fn label(&self) -> &str {
        &self.inner.config.label
    }

    /// Current position
    pub fn is_on(&self) -> bool {
        *self.inner.on.read().unwrap()
    }

    /// Simulated user interaction: flips the position and emits
    /// [`UiEvent::Toggled`] if the toggle is currently interactive
    pub fn toggle(&self) {
        if !self.state().is_interactive() {
            trace!("toggle on {} ignored ({:?})", self.inner.id, self.state());
            return;
        }
        let on = {
            let mut on = self.inner.on.write().unwrap();
            *on = !*on;
            *on
        };
        self.emit(UiEvent::Toggled {
            id: self.inner.id.clone(),
            on,
        });
    }

    /// Programmatic position change; no event is emitted
    pub fn set_on(&self, on: bool) {
        *self.inner.on.write().unwrap() = on;
    }

    /// Another handle to this toggle, boxed for a registry
    pub fn boxed(&self) -> Box<dyn Widget<UiEvent>> {
        Box::new(self.clone())
    }
}

impl Widget<UiEvent> for Toggle {
    fn id(&self) -> &WidgetId {
        &self.inner.id
    }

    fn state(&self) -> WidgetState {
        self.inner.cell.get()
    }

    fn set_state(&self, state: WidgetState) {
        self.inner.cell.set(state);
    }

    fn watch_state(&self, watcher: Box<dyn Fn(&WidgetState) + Send + Sync>) -> Subscription {
        self.inner.cell.watch(watcher)
    }

    fn channel(&self) -> &EventChannel<UiEvent> {
        &self.inner.channel
    }

    fn render(&self) -> RenderNode {
        let marker = if self.is_on() { "[x]" } else { "[ ]" };
        RenderNode {
            id: self.inner.id.clone(),
            text: format!("{} {}", marker, self.inner.config.label),
            interactive: self.state().is_interactive(),
        }
    }
}

/// Create a visible toggle, initially off
pub fn toggle(id: impl Into<WidgetId>, label: impl Into<String>) -> Toggle {
    Toggle::new(id, ToggleConfig::new().label(label))
}
