//! Event vocabulary for the shipped widgets
//!
//! Hosts with custom widgets are free to define their own event type;
//! the core is generic over it. This is the vocabulary the in-tree
//! widgets speak.

use weft_core::WidgetId;

/// Events emitted by the widgets in this crate
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// A button was pressed
    Pressed { id: WidgetId },
    /// A toggle flipped; `on` is the new value
    Toggled { id: WidgetId, on: bool },
    /// A banner's display time elapsed
    Dismissed { id: WidgetId },
}

impl UiEvent {
    /// The widget this event originated from
    pub fn widget_id(&self) -> &WidgetId {
        match self {
            UiEvent::Pressed { id } => id,
            UiEvent::Toggled { id, .. } => id,
            UiEvent::Dismissed { id } => id,
        }
    }
}
