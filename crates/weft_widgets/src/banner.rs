//! Banner widget
//!
//! A transient notice that dismisses itself: once armed against a
//! [`TaskScheduler`], it emits [`UiEvent::Dismissed`] after its display
//! duration so the host can remove it from the registry. The deferred
//! emission holds only a weak channel handle, so a banner that was
//! already removed dismisses into nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;
use weft_core::{
    EventChannel, RenderNode, StateCell, Subscription, TaskScheduler, Widget, WidgetId,
    WidgetState,
};

use crate::event::UiEvent;

/// Banner configuration
#[derive(Clone, Debug)]
pub struct BannerConfig {
    /// Notice text
    pub text: String,
    /// How long the banner stays up once armed
    pub auto_dismiss: Duration,
    /// State the banner starts in
    pub initial_state: WidgetState,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            auto_dismiss: Duration::from_secs(4),
            initial_state: WidgetState::Visible,
        }
    }
}

impl BannerConfig {
    /// Create a new banner config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the notice text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the display duration
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.auto_dismiss = duration;
        self
    }

    /// Set the initial state
    pub fn state(mut self, state: WidgetState) -> Self {
        self.initial_state = state;
        self
    }
}

struct BannerInner {
    id: WidgetId,
    cell: StateCell,
    channel: EventChannel<UiEvent>,
    armed: AtomicBool,
    config: BannerConfig,
}

/// A self-dismissing notice widget
#[derive(Clone)]
pub struct Banner {
    inner: Arc<BannerInner>,
}

impl Banner {
    /// Create a banner from a config
    pub fn new(id: impl Into<WidgetId>, config: BannerConfig) -> Self {
        Self {
            inner: Arc::new(BannerInner {
                id: id.into(),
                cell: StateCell::new(config.initial_state),
                channel: EventChannel::new(),
                armed: AtomicBool::new(false),
                config,
            }),
        }
    }

    /// The notice text
    pub fn text(&self) -> &str {
        &self.inner.config.text
    }

    /// Whether the dismissal timer has been started
    pub fn is_armed(&self) -> bool {
        self.inner.armed.load(Ordering::SeqCst)
    }

    /// Start the dismissal timer; arming twice is a no-op
    ///
    /// After the configured duration, [`UiEvent::Dismissed`] is emitted
    /// through a weak channel handle; if the banner (and thus its
    /// channel) is gone by then, nothing happens.
    pub fn arm(&self, scheduler: &dyn TaskScheduler) {
        if self.inner.armed.swap(true, Ordering::SeqCst) {
            trace!("banner {} already armed", self.inner.id);
            return;
        }
        let channel = self.inner.channel.downgrade();
        let id = self.inner.id.clone();
        scheduler.schedule(
            self.inner.config.auto_dismiss,
            Box::new(move || {
                channel.emit(UiEvent::Dismissed { id });
            }),
        );
    }

    /// Another handle to this banner, boxed for a registry
    pub fn boxed(&self) -> Box<dyn Widget<UiEvent>> {
        Box::new(self.clone())
    }
}

impl Widget<UiEvent> for Banner {
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
            text: self.inner.config.text.clone(),
            // Banners are informational; they never accept interaction
            interactive: false,
        }
    }
}

/// Create a visible banner with the default display duration
pub fn banner(id: impl Into<WidgetId>, text: impl Into<String>) -> Banner {
    Banner::new(id, BannerConfig::new().text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use weft_core::ManualScheduler;

    #[test]
    fn test_armed_banner_dismisses_after_duration() {
        let banner = Banner::new(
            "saved",
            BannerConfig::new()
                .text("Saved")
                .auto_dismiss(Duration::from_millis(200)),
        );
        let scheduler = ManualScheduler::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = banner.channel().subscribe(move |e: &UiEvent| {
            sink.lock().unwrap().push(e.clone());
        });

        banner.arm(&scheduler);
        scheduler.advance(Duration::from_millis(100));
        assert!(seen.lock().unwrap().is_empty());

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![UiEvent::Dismissed {
                id: WidgetId::from("saved")
            }]
        );
    }

    #[test]
    fn test_arming_twice_schedules_once() {
        let banner = banner("saved", "Saved");
        let scheduler = ManualScheduler::new();

        banner.arm(&scheduler);
        banner.arm(&scheduler);
        assert!(banner.is_armed());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_dismissal_vanishes_if_banner_dropped() {
        let scheduler = ManualScheduler::new();
        {
            let banner = Banner::new(
                "saved",
                BannerConfig::new()
                    .text("Saved")
                    .auto_dismiss(Duration::from_millis(50)),
            );
            banner.arm(&scheduler);
        }
        // The deferred task only holds a weak handle; this must not panic
        // or deliver anywhere
        scheduler.advance(Duration::from_millis(100));
        assert_eq!(scheduler.pending(), 0);
    }
}
