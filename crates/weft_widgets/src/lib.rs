//! Weft Widget Library
//!
//! Concrete widgets over the `weft_core` coordination layer.
//!
//! # Architecture
//!
//! Every widget here follows the same shape:
//!
//! 1. **Handle semantics**: a widget is a cheap clone of an `Arc`'d
//!    inner, so the host can keep one handle to drive interactions
//!    while the registry owns another.
//! 2. **State through `StateCell`**: visibility/enablement lives in the
//!    core's state cell, so registry-mediated transitions and watcher
//!    notification come for free.
//! 3. **Events through the widget's channel**: interactions emit
//!    [`UiEvent`]s; subscribers attach via the registry's
//!    `subscribe_all` and never hold the widget itself.
//!
//! # Example
//!
//! ```rust
//! use weft_core::{WidgetRegistry, WidgetId};
//! use weft_widgets::prelude::*;
//!
//! let ok = button("ok", "OK");
//!
//! let mut registry = WidgetRegistry::new();
//! registry.add(ok.boxed());
//!
//! let mut log: EventLog<UiEvent> = EventLog::new();
//! registry.subscribe_all(&mut log);
//!
//! ok.press();
//! assert_eq!(log.events(), vec![UiEvent::Pressed { id: WidgetId::from("ok") }]);
//! ```

pub mod banner;
pub mod button;
pub mod event;
pub mod log;
pub mod manifest;
pub mod toggle;

pub use banner::{banner, Banner, BannerConfig};
pub use button::{button, Button, ButtonConfig};
pub use event::UiEvent;
pub use log::EventLog;
pub use manifest::{ManifestError, ManifestFactory, WidgetSpec};
pub use toggle::{toggle, Toggle, ToggleConfig};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::banner::{banner, Banner, BannerConfig};
    pub use crate::button::{button, Button, ButtonConfig};
    pub use crate::event::UiEvent;
    pub use crate::log::EventLog;
    pub use crate::manifest::{ManifestFactory, WidgetSpec};
    pub use crate::toggle::{toggle, Toggle, ToggleConfig};
}
