//! Widget factory boundary
//!
//! Construction of concrete widgets is a collaborator concern; the core
//! consumes only the factory's output. A factory promises nothing more
//! than a finite, ordered sequence of widgets with unique-by-convention
//! ids.

use crate::widget::Widget;

/// External collaborator that produces the widget set
pub trait WidgetFactory<E: Clone + Send + Sync + 'static> {
    /// Build the widgets, in the order the registry should hold them
    fn build_widgets(&self) -> Vec<Box<dyn Widget<E>>>;
}
