//! Column headers that drive a [`TableSorter`](crate::model::TableSorter).
//!
//! A header reports clicks as [`HeaderClick`]s on its `clicked` signal and
//! renders its cells through a replaceable [`HeaderRenderer`]. Attaching a
//! header to a sorter connects both: clicks cycle the sort and the renderer
//! is wrapped in a [`SortableHeaderRenderer`] that adds direction glyphs.
//!
//! [`HeaderView`] is a headless implementation that tracks section order and
//! produces [`HeaderCell`]s; toolkit integrations implement [`SortHeader`]
//! on their own widgets.

pub(crate) mod controller;
pub(crate) mod indicator;
mod view;

use std::sync::Arc;

use tablesort_core::Signal;

pub use controller::{ClickModifiers, HeaderClick, SortCycle};
pub use indicator::{
    DefaultHeaderRenderer, HeaderCell, HeaderRenderer, IndicatorStyle, SortIcon,
    SortIndicatorProvider, SortableHeaderRenderer,
};
pub use view::HeaderView;

/// A header a sorter can attach to.
pub trait SortHeader: Send + Sync {
    /// Emitted when a section is clicked, with the model column under the
    /// pointer.
    fn clicked(&self) -> &Signal<HeaderClick>;

    /// Returns the renderer used for sections without their own.
    fn default_renderer(&self) -> Arc<dyn HeaderRenderer>;

    /// Replaces the default renderer.
    fn set_default_renderer(&self, renderer: Arc<dyn HeaderRenderer>);

    /// Requests that the header be redrawn.
    fn repaint(&self);
}
