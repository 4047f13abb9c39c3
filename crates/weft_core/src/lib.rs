//! Weft Core
//!
//! Foundational primitives for the Weft widget layer:
//!
//! - **Widgets**: identity-bearing, stateful, event-emitting units
//!   behind one object-safe trait
//! - **Registry**: the ordered, authoritative widget collection that
//!   mediates every state transition and wires subscribers to widget
//!   event channels
//! - **Event Channels**: synchronous per-widget publish/subscribe with
//!   scoped, drop-released subscriptions
//! - **Scheduling**: a host-supplied timer capability for deferred
//!   widget behavior
//!
//! Rendering is not here by design: the presentation layer is an
//! external collaborator that reads registry state and widget
//! [`RenderNode`]s to decide what to draw, and calls registry mutators
//! in response to user actions.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use weft_core::EventChannel;
//!
//! let channel: EventChannel<String> = EventChannel::new();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let _sub = channel.subscribe(move |event: &String| {
//!     sink.lock().unwrap().push(event.clone());
//! });
//!
//! channel.emit("clicked".to_string());
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

pub mod channel;
pub mod factory;
pub mod registry;
pub mod scheduler;
pub mod widget;

pub use channel::{EventChannel, Subscription, WeakChannel};
pub use factory::WidgetFactory;
pub use registry::{RegistryChange, Subscriber, WidgetKey, WidgetRegistry};
pub use scheduler::{ManualScheduler, Task, TaskScheduler};
pub use widget::{RenderNode, StateCell, Widget, WidgetId, WidgetState};
