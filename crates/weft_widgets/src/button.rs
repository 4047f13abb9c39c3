//! Button widget
//!
//! The simplest event source: a labelled widget that emits
//! [`UiEvent::Pressed`] when pressed while interactive. Presses on a
//! hidden or disabled button are ignored.

use std::sync::Arc;

use tracing::trace;
use weft_core::{EventChannel, RenderNode, StateCell, Subscription, Widget, WidgetId, WidgetState};

use crate::event::UiEvent;

/// Button configuration
#[derive(Clone, Debug)]
pub struct ButtonConfig {
    /// Label text
    pub label: String,
    /// State the button starts in
    pub initial_state: WidgetState,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            initial_state: WidgetState::Visible,
        }
    }
}

impl ButtonConfig {
    /// Create a new button config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the initial state
    pub fn state(mut self, state: WidgetState) -> Self {
        self.initial_state = state;
        self
    }
}

struct ButtonInner {
    id: WidgetId,
    cell: StateCell,
    channel: EventChannel<UiEvent>,
    config: ButtonConfig,
}

/// A press-to-emit widget
///
/// Cloning yields another handle to the same button, so a host can keep
/// one handle to drive interactions while the registry owns another.
#[derive(Clone)]
pub struct Button {
    inner: Arc<ButtonInner>,
}

impl Button {
    /// Create a button from a config
    pub fn new(id: impl Into<WidgetId>, config: ButtonConfig) -> Self {
        Self {
            inner: Arc::new(ButtonInner {
                id: id.into(),
                cell: StateCell::new(config.initial_state),
                channel: EventChannel::new(),
                config,
            }),
        }
    }

    /// The label text
    pub fn label(&self) -> &str {
        &self.inner.config.label
    }

    /// Simulated user interaction: emits [`UiEvent::Pressed`] if the
    /// button is currently interactive, otherwise does nothing
    pub fn press(&self) {
        if !self.state().is_interactive() {
            trace!("press on {} ignored ({:?})", self.inner.id, self.state());
            return;
        }
        self.emit(UiEvent::Pressed {
            id: self.inner.id.clone(),
        });
    }

    /// Another handle to this button, boxed for a registry
    pub fn boxed(&self) -> Box<dyn Widget<UiEvent>> {
        Box::new(self.clone())
    }
}

impl Widget<UiEvent> for Button {
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
        RenderNode {
            id: self.inner.id.clone(),
            text: self.inner.config.label.clone(),
            interactive: self.state().is_interactive(),
        }
    }
}

/// Create a visible button with a label
pub fn button(id: impl Into<WidgetId>, label: impl Into<String>) -> Button {
    Button::new(id, ButtonConfig::new().label(label))
}
