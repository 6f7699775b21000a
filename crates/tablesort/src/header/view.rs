//! A headless header view.

use std::sync::Arc;

use parking_lot::RwLock;
use tablesort_core::logging::targets;
use tablesort_core::Signal;

use super::controller::{ClickModifiers, HeaderClick};
use super::indicator::{DefaultHeaderRenderer, HeaderCell, HeaderRenderer};
use super::SortHeader;
use crate::model::TableSource;

/// Visual and logical section order.
#[derive(Debug, Default)]
struct SectionOrder {
    /// Maps logical index to visual index.
    visual_indices: Vec<usize>,
    /// Maps visual index to logical index.
    logical_indices: Vec<usize>,
}

impl SectionOrder {
    fn identity(count: usize) -> Self {
        Self {
            visual_indices: (0..count).collect(),
            logical_indices: (0..count).collect(),
        }
    }

    fn rebuild_visual(&mut self) {
        for (visual, &logical) in self.logical_indices.iter().enumerate() {
            self.visual_indices[logical] = visual;
        }
    }
}

/// Header for the columns of a table.
///
/// Sections are addressed by visual index (position on screen) or logical
/// index (model column). Sections can be moved, which changes the visual
/// order only.
///
/// # Signals
///
/// - `section_clicked(HeaderClick)`: Emitted when a section is clicked, with
///   the logical column
/// - `section_moved((usize, usize, usize))`: Emitted when a section is moved
///   (logical, old_visual, new_visual)
/// - `repaint_requested(())`: Emitted when the header needs redrawing
pub struct HeaderView {
    order: RwLock<SectionOrder>,
    renderer: RwLock<Arc<dyn HeaderRenderer>>,

    /// Emitted when a section header is clicked.
    pub section_clicked: Signal<HeaderClick>,

    /// Emitted when a section is moved.
    pub section_moved: Signal<(usize, usize, usize)>,

    /// Emitted when the header needs to be redrawn.
    pub repaint_requested: Signal<()>,
}

impl Default for HeaderView {
    fn default() -> Self {
        Self::new(0)
    }
}

impl HeaderView {
    /// Creates a header with `section_count` sections in model order.
    pub fn new(section_count: usize) -> Self {
        Self {
            order: RwLock::new(SectionOrder::identity(section_count)),
            renderer: RwLock::new(Arc::new(DefaultHeaderRenderer::default())),
            section_clicked: Signal::new(),
            section_moved: Signal::new(),
            repaint_requested: Signal::new(),
        }
    }

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.order.read().logical_indices.len()
    }

    /// Sets the number of sections, resetting the order to model order.
    pub fn set_section_count(&self, count: usize) {
        *self.order.write() = SectionOrder::identity(count);
        self.repaint_requested.emit(());
    }

    // =========================================================================
    // Section Ordering (Visual vs Logical)
    // =========================================================================

    /// Returns the visual index for a logical index.
    pub fn visual_index(&self, logical_index: usize) -> Option<usize> {
        self.order.read().visual_indices.get(logical_index).copied()
    }

    /// Returns the logical index for a visual index.
    pub fn logical_index(&self, visual_index: usize) -> Option<usize> {
        self.order.read().logical_indices.get(visual_index).copied()
    }

    /// Moves a section from one visual position to another.
    pub fn move_section(&self, from_visual: usize, to_visual: usize) {
        let logical = {
            let mut order = self.order.write();
            let count = order.logical_indices.len();
            if from_visual >= count || to_visual >= count || from_visual == to_visual {
                return;
            }
            let logical = order.logical_indices.remove(from_visual);
            order.logical_indices.insert(to_visual, logical);
            order.rebuild_visual();
            logical
        };

        self.section_moved.emit((logical, from_visual, to_visual));
        self.repaint_requested.emit(());
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Reports a click on the section at `visual_index`.
    ///
    /// A click past the last section is reported with no column.
    pub fn click_section(&self, visual_index: usize, modifiers: ClickModifiers) {
        let column = self.logical_index(visual_index);
        tracing::trace!(target: targets::HEADER, visual_index, ?column, "section clicked");
        self.section_clicked
            .emit(HeaderClick::new(column).with_modifiers(modifiers));
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Renders the section at `visual_index` with the given label.
    pub fn render_section(&self, visual_index: usize, label: &str) -> Option<HeaderCell> {
        let logical = self.logical_index(visual_index)?;
        let renderer = self.renderer.read().clone();
        Some(renderer.render(logical, label))
    }

    /// Renders every section in visual order, labelled from `model`.
    pub fn render_sections<M: TableSource + ?Sized>(&self, model: &M) -> Vec<HeaderCell> {
        let logical_indices = self.order.read().logical_indices.clone();
        let renderer = self.renderer.read().clone();
        logical_indices
            .into_iter()
            .map(|logical| renderer.render(logical, &model.column_name(logical)))
            .collect()
    }
}

impl SortHeader for HeaderView {
    fn clicked(&self) -> &Signal<HeaderClick> {
        &self.section_clicked
    }

    fn default_renderer(&self) -> Arc<dyn HeaderRenderer> {
        self.renderer.read().clone()
    }

    fn set_default_renderer(&self, renderer: Arc<dyn HeaderRenderer>) {
        *self.renderer.write() = renderer;
        self.repaint_requested.emit(());
    }

    fn repaint(&self) {
        self.repaint_requested.emit(());
    }
}

static_assertions::assert_impl_all!(HeaderView: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_section_count() {
        let header = HeaderView::new(3);
        assert_eq!(header.section_count(), 3);
        header.set_section_count(5);
        assert_eq!(header.section_count(), 5);
        assert_eq!(header.logical_index(4), Some(4));
        assert_eq!(header.logical_index(5), None);
    }

    #[test]
    fn test_visual_logical_mapping() {
        let header = HeaderView::new(3);

        // Initially, visual == logical
        assert_eq!(header.visual_index(0), Some(0));
        assert_eq!(header.logical_index(0), Some(0));

        let moves = Arc::new(Mutex::new(Vec::new()));
        let moves_slot = moves.clone();
        header.section_moved.connect(move |args| moves_slot.lock().push(*args));

        // Move section 0 to visual position 2
        header.move_section(0, 2);
        assert_eq!(header.logical_index(2), Some(0));
        assert_eq!(header.logical_index(0), Some(1));
        assert_eq!(header.visual_index(0), Some(2));
        assert_eq!(*moves.lock(), vec![(0, 0, 2)]);

        // Out of range moves are ignored.
        header.move_section(0, 7);
        assert_eq!(moves.lock().len(), 1);
    }

    #[test]
    fn test_click_reports_logical_column() {
        let header = HeaderView::new(3);
        header.move_section(2, 0);

        let clicks = Arc::new(Mutex::new(Vec::new()));
        let clicks_slot = clicks.clone();
        header
            .clicked()
            .connect(move |click| clicks_slot.lock().push(*click));

        header.click_section(0, ClickModifiers::COMPOUND);
        header.click_section(9, ClickModifiers::NONE);

        assert_eq!(
            *clicks.lock(),
            vec![
                HeaderClick::new(Some(2)).with_modifiers(ClickModifiers::COMPOUND),
                HeaderClick::new(None),
            ]
        );
    }

    #[test]
    fn test_render_section_uses_logical_column() {
        struct ColumnEcho;
        impl HeaderRenderer for ColumnEcho {
            fn render(&self, column: usize, label: &str) -> HeaderCell {
                HeaderCell {
                    text: format!("{column}:{label}"),
                    font_size: 10,
                    icon: None,
                    text_before_icon: false,
                }
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        let header = HeaderView::new(2);
        header.set_default_renderer(Arc::new(ColumnEcho));
        header.move_section(1, 0);

        assert_eq!(
            header.render_section(0, "x").map(|cell| cell.text),
            Some("1:x".to_string())
        );
        assert!(header.render_section(2, "x").is_none());
    }

    #[test]
    fn test_repaint_signal() {
        let header = HeaderView::new(1);
        let count = Arc::new(Mutex::new(0));
        let count_slot = count.clone();
        header.repaint_requested.connect(move |_| *count_slot.lock() += 1);

        header.repaint();
        header.set_default_renderer(Arc::new(DefaultHeaderRenderer::default()));
        assert_eq!(*count.lock(), 2);
    }
}
