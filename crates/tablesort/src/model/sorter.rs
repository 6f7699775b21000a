//! Sorting decorator for table sources.
//!
//! `TableSorter` wraps a [`TableSource`] and presents its rows in sorted order
//! without copying or mutating the source. It keeps a lazily built map from
//! view rows to model rows; every read is translated through that map and
//! delegated to the source.
//!
//! The sorter listens to the source's `table_changed` signal. Each change is
//! examined, translated or widened, and re-emitted on the sorter's own
//! signals. When a change may have invalidated the row order, the map is
//! dropped and rebuilt on the next read.
//!
//! Attaching a [`SortHeader`] turns the header into a complete UI for the
//! sorter: clicks cycle the sort direction of a column and the header's
//! renderer is decorated with a direction glyph.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tablesort_core::logging::{span_names, targets};
use tablesort_core::{ConnectionId, Error, Result};

use super::comparator::{compare_rows, CompareFn, ComparatorRegistry, SortKey};
use super::directive::{Directive, SortDirection, SortDirectives};
use super::mapping::RowMapping;
use super::traits::{column_letters, TableChange, TableSignals, TableSource};
use super::value::{CellValue, ColumnType};
use crate::header::controller::{resolve_click, HeaderClick};
use crate::header::indicator::{
    IndicatorStyle, SortIcon, SortIndicatorProvider, SortableHeaderRenderer,
};
use crate::header::SortHeader;

/// Configuration for a [`TableSorter`].
#[derive(Debug, Clone, Default)]
pub struct SorterConfig {
    /// Geometry of the header sort glyphs.
    pub indicator: IndicatorStyle,
}

/// A header attached to a sorter, with the click connection to undo on detach.
struct AttachedHeader {
    header: Arc<dyn SortHeader>,
    click_connection: ConnectionId,
}

impl AttachedHeader {
    /// Disconnects the click handler and unwraps the sortable renderer.
    fn detach(self) {
        self.header.clicked().disconnect(self.click_connection);
        let renderer = self.header.default_renderer();
        if let Some(sortable) = renderer.as_any().downcast_ref::<SortableHeaderRenderer>() {
            self.header.set_default_renderer(sortable.inner().clone());
        }
    }
}

/// A sorting decorator over any [`TableSource`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tablesort::model::{CellValue, Column, ColumnType, SimpleTableModel, SortDirection, TableSorter, TableSource};
///
/// let source = Arc::new(SimpleTableModel::from_data(
///     vec![Column::new("id", ColumnType::Integer), Column::new("name", ColumnType::Text)],
///     vec![
///         vec![CellValue::from(3), CellValue::from("b")],
///         vec![CellValue::from(1), CellValue::from("a")],
///         vec![CellValue::from(2), CellValue::from("a")],
///     ],
/// ));
///
/// let sorter = TableSorter::new(source);
/// sorter.set_sorting_status(0, SortDirection::Ascending);
///
/// assert_eq!(sorter.view_order(), vec![1, 2, 0]);
/// assert_eq!(sorter.value_at(0, 0), CellValue::from(1));
/// ```
pub struct TableSorter<S: TableSource + 'static> {
    source: RwLock<Option<Arc<S>>>,
    /// Connection to the current source's `table_changed` signal.
    source_connection: Mutex<Option<ConnectionId>>,
    directives: RwLock<SortDirectives>,
    comparators: RwLock<ComparatorRegistry>,
    mapping: RwLock<RowMapping>,
    header: RwLock<Option<AttachedHeader>>,
    config: SorterConfig,
    signals: TableSignals,
    weak_self: Weak<Self>,
}

impl<S: TableSource + 'static> TableSorter<S> {
    /// Creates a sorter over `source` with default configuration.
    pub fn new(source: Arc<S>) -> Arc<Self> {
        Self::with_config(Some(source), SorterConfig::default())
    }

    /// Creates a sorter with no source attached.
    pub fn empty() -> Arc<Self> {
        Self::with_config(None, SorterConfig::default())
    }

    /// Creates a sorter with custom configuration.
    pub fn with_config(source: Option<Arc<S>>, config: SorterConfig) -> Arc<Self> {
        let sorter = Arc::new_cyclic(|weak_self| Self {
            source: RwLock::new(None),
            source_connection: Mutex::new(None),
            directives: RwLock::new(SortDirectives::new()),
            comparators: RwLock::new(ComparatorRegistry::new()),
            mapping: RwLock::new(RowMapping::new()),
            header: RwLock::new(None),
            config,
            signals: TableSignals::new(),
            weak_self: weak_self.clone(),
        });
        if source.is_some() {
            sorter.set_source(source);
        }
        sorter
    }

    // -------------------------------------------------------------------------
    // Source
    // -------------------------------------------------------------------------

    /// Returns the wrapped source.
    pub fn source(&self) -> Option<Arc<S>> {
        self.source.read().clone()
    }

    /// Replaces the wrapped source.
    ///
    /// Stops listening to the previous source, starts listening to the new
    /// one, drops the row map and emits `StructureChanged`. The sort
    /// directives are kept.
    pub fn set_source(&self, source: Option<Arc<S>>) {
        let previous = std::mem::replace(&mut *self.source.write(), source.clone());
        let previous_connection = self.source_connection.lock().take();
        if let (Some(previous), Some(id)) = (previous, previous_connection) {
            previous.signals().table_changed.disconnect(id);
        }

        if let Some(source) = source {
            let weak = self.weak_self.clone();
            let id = source.signals().table_changed.connect(move |change| {
                if let Some(sorter) = weak.upgrade() {
                    sorter.source_changed(change);
                }
            });
            *self.source_connection.lock() = Some(id);
        }

        self.clear_sorting_state();
        self.signals.table_changed.emit(TableChange::StructureChanged);
    }

    // -------------------------------------------------------------------------
    // Sort directives
    // -------------------------------------------------------------------------

    /// Returns `true` if at least one column is sorting.
    pub fn is_sorting(&self) -> bool {
        self.directives.read().is_sorting()
    }

    /// Returns the sort direction of `column`.
    ///
    /// Columns without a directive, including out-of-range ones, report
    /// `NotSorted`.
    pub fn sorting_status(&self, column: usize) -> SortDirection {
        self.directives.read().status(column)
    }

    /// Returns the priority rank of `column` in the compound sort.
    pub fn sort_priority(&self, column: usize) -> Option<usize> {
        self.directives.read().priority(column)
    }

    /// Returns the active directives in priority order.
    pub fn sorting_columns(&self) -> Vec<Directive> {
        self.directives.read().to_vec()
    }

    /// Sets the sort direction of `column`.
    ///
    /// A sorting column keeps its priority when its direction changes and is
    /// dropped when set to `NotSorted`; a new column becomes the lowest
    /// priority key. Sorting on a column outside the source is ignored.
    pub fn set_sorting_status(&self, column: usize, direction: SortDirection) {
        if direction.is_sorted() && column >= self.column_count() {
            tracing::debug!(
                target: targets::SORTER,
                column,
                column_count = self.column_count(),
                "ignoring sort on unknown column"
            );
            return;
        }
        self.directives.write().set_status(column, direction);
        self.sorting_status_changed();
    }

    /// Removes every sort directive.
    pub fn cancel_sorting(&self) {
        self.directives.write().cancel();
        self.sorting_status_changed();
    }

    /// Sets or, with `None`, removes the comparator used for columns of
    /// `column_type`. Takes effect at the next rebuild of the row map.
    pub fn set_column_comparator(&self, column_type: ColumnType, comparator: Option<CompareFn>) {
        self.comparators.write().set(column_type, comparator);
    }

    fn sorting_status_changed(&self) {
        self.clear_sorting_state();
        self.signals.table_changed.emit(TableChange::LayoutChanged);
        if let Some(header) = self.header() {
            header.repaint();
        }
    }

    // -------------------------------------------------------------------------
    // Index translation
    // -------------------------------------------------------------------------

    /// Drops the cached row map. It is rebuilt on the next read.
    pub fn clear_sorting_state(&self) {
        self.mapping.write().clear();
    }

    /// Maps a view row to the source row it shows.
    ///
    /// The first call after an invalidation sorts all rows.
    pub fn model_index(&self, view_row: usize) -> Option<usize> {
        self.with_view_to_model(|view_to_model| view_to_model.get(view_row).copied())
            .flatten()
    }

    /// Maps a source row to the view row showing it.
    pub fn view_index(&self, model_row: usize) -> Option<usize> {
        if let Some(model_to_view) = self.mapping.read().model_to_view() {
            return model_to_view.get(model_row).copied();
        }
        self.with_view_to_model(|_| ())?;
        self.mapping
            .write()
            .ensure_inverse()
            .and_then(|model_to_view| model_to_view.get(model_row).copied())
    }

    /// Returns the source rows in view order.
    pub fn view_order(&self) -> Vec<usize> {
        self.with_view_to_model(|view_to_model| view_to_model.to_vec())
            .unwrap_or_default()
    }

    fn with_view_to_model<R>(&self, f: impl FnOnce(&[usize]) -> R) -> Option<R> {
        {
            let mapping = self.mapping.read();
            if let Some(view_to_model) = mapping.view_to_model() {
                return Some(f(view_to_model));
            }
        }
        let view_to_model = self.build_view_to_model()?;
        let mut mapping = self.mapping.write();
        Some(f(mapping.install(view_to_model)))
    }

    fn build_view_to_model(&self) -> Option<Vec<usize>> {
        let source = self.source()?;
        let _span = tracing::debug_span!(target: targets::SORTER, span_names::REBUILD).entered();
        let row_count = source.row_count();
        let mut rows: Vec<usize> = (0..row_count).collect();

        let directives = self.directives.read().to_vec();
        if !directives.is_empty() {
            let keys = SortKey::resolve_all(&directives, &self.comparators.read(), source.as_ref());
            // Stable: rows that compare equal keep their source order.
            rows.sort_by(|&a, &b| compare_rows(source.as_ref(), &keys, a, b));
        }

        tracing::debug!(
            target: targets::SORTER,
            row_count,
            key_count = directives.len(),
            "rebuilt row mapping"
        );
        Some(rows)
    }

    // -------------------------------------------------------------------------
    // Change propagation
    // -------------------------------------------------------------------------

    fn source_changed(&self, change: &TableChange) {
        tracing::trace!(target: targets::SORTER, ?change, "source changed");

        // View order equals model order: nothing to translate.
        if !self.is_sorting() {
            self.clear_sorting_state();
            self.signals.table_changed.emit(*change);
            return;
        }

        if *change == TableChange::StructureChanged {
            self.clear_sorting_state();
            self.signals.table_changed.emit(TableChange::StructureChanged);
            return;
        }

        // A single cell outside the sort keys can be forwarded without a
        // re-sort, but only if the reverse map is already built.
        if let Some((model_row, column)) = change.single_cell() {
            if !self.sorting_status(column).is_sorted() {
                let view_row = self
                    .mapping
                    .read()
                    .model_to_view()
                    .and_then(|model_to_view| model_to_view.get(model_row).copied());
                if let Some(view_row) = view_row {
                    self.signals
                        .table_changed
                        .emit(TableChange::cell(view_row, column));
                    return;
                }
            }
        }

        self.clear_sorting_state();
        self.signals.table_changed.emit(TableChange::DataChanged);
    }

    // -------------------------------------------------------------------------
    // Cell access
    // -------------------------------------------------------------------------

    /// Resolves a view cell to the source and its model row.
    fn locate(&self, row: usize, column: usize) -> Result<(Arc<S>, usize)> {
        let source = self.source().ok_or(Error::NoSource)?;
        let column_count = source.column_count();
        if column >= column_count {
            return Err(Error::column_out_of_range(column, column_count));
        }
        let model_row = self
            .model_index(row)
            .ok_or_else(|| Error::row_out_of_range(row, source.row_count()))?;
        Ok((source, model_row))
    }

    /// Reads the cell at a view row.
    pub fn try_value_at(&self, row: usize, column: usize) -> Result<CellValue> {
        let (source, model_row) = self.locate(row, column)?;
        Ok(source.value_at(model_row, column))
    }

    /// Writes the cell at a view row.
    pub fn try_set_value_at(&self, value: CellValue, row: usize, column: usize) -> Result<()> {
        let (source, model_row) = self.locate(row, column)?;
        if source.set_value_at(value, model_row, column) {
            Ok(())
        } else {
            Err(Error::not_editable(row, column))
        }
    }

    // -------------------------------------------------------------------------
    // Header
    // -------------------------------------------------------------------------

    /// Returns the attached header.
    pub fn header(&self) -> Option<Arc<dyn SortHeader>> {
        self.header
            .read()
            .as_ref()
            .map(|attached| attached.header.clone())
    }

    /// Attaches a header, or detaches the current one with `None`.
    ///
    /// An attached header's clicks drive the sort and its default renderer
    /// is wrapped to show the sort glyphs. Detaching restores the original
    /// renderer.
    pub fn set_header(&self, header: Option<Arc<dyn SortHeader>>) {
        let previous = self.header.write().take();
        if let Some(previous) = previous {
            previous.detach();
        }

        if let Some(header) = header {
            let weak = self.weak_self.clone();
            let click_connection = header.clicked().connect(move |click| {
                if let Some(sorter) = weak.upgrade() {
                    sorter.header_clicked(click);
                }
            });

            let provider: Weak<dyn SortIndicatorProvider> = self.weak_self.clone();
            let renderer = SortableHeaderRenderer::new(header.default_renderer(), provider);
            header.set_default_renderer(Arc::new(renderer));

            *self.header.write() = Some(AttachedHeader {
                header,
                click_connection,
            });
        }
    }

    /// Applies a header click.
    ///
    /// Without the compound modifier all other sort keys are dropped first.
    /// The column then advances one step through its direction cycle.
    pub fn header_clicked(&self, click: &HeaderClick) {
        let _span = tracing::debug_span!(
            target: targets::HEADER,
            span_names::HEADER_CLICK,
            column = ?click.column
        )
        .entered();
        let column_count = self.column_count();
        let Some(column) = click.column.filter(|&column| column < column_count) else {
            tracing::debug!(target: targets::HEADER, column_count, "ignoring click outside data columns");
            return;
        };
        let column_type = self.column_type(column);

        let outcome = {
            let mut directives = self.directives.write();
            let outcome = resolve_click(&directives, column, column_type, click.modifiers);
            if outcome.cancel_others {
                directives.cancel();
            }
            directives.set_status(column, outcome.status);
            outcome
        };
        tracing::debug!(
            target: targets::HEADER,
            column,
            status = ?outcome.status,
            compound = click.modifiers.compound,
            "header click"
        );

        self.sorting_status_changed();
    }
}

impl<S: TableSource + 'static> SortIndicatorProvider for TableSorter<S> {
    fn sort_icon(&self, column: usize, size: u32) -> Option<SortIcon> {
        let directives = self.directives.read();
        let priority = directives.priority(column)?;
        let ascending = directives.status(column) == SortDirection::Ascending;
        Some(SortIcon::with_style(
            ascending,
            size,
            priority,
            self.config.indicator,
        ))
    }
}

impl<S: TableSource + 'static> TableSource for TableSorter<S> {
    fn row_count(&self) -> usize {
        self.source().map_or(0, |source| source.row_count())
    }

    fn column_count(&self) -> usize {
        self.source().map_or(0, |source| source.column_count())
    }

    fn value_at(&self, row: usize, column: usize) -> CellValue {
        self.try_value_at(row, column).unwrap_or_default()
    }

    fn signals(&self) -> &TableSignals {
        &self.signals
    }

    fn column_name(&self, column: usize) -> String {
        match self.source() {
            Some(source) => source.column_name(column),
            None => column_letters(column),
        }
    }

    fn column_type(&self, column: usize) -> ColumnType {
        self.source()
            .map_or(ColumnType::Any, |source| source.column_type(column))
    }

    fn set_value_at(&self, value: CellValue, row: usize, column: usize) -> bool {
        self.try_set_value_at(value, row, column).is_ok()
    }

    fn is_cell_editable(&self, row: usize, column: usize) -> bool {
        match (self.source(), self.model_index(row)) {
            (Some(source), Some(model_row)) => source.is_cell_editable(model_row, column),
            _ => false,
        }
    }
}

impl<S: TableSource + 'static> Drop for TableSorter<S> {
    fn drop(&mut self) {
        let connection = self.source_connection.get_mut().take();
        if let (Some(source), Some(id)) = (self.source.get_mut().as_ref(), connection) {
            source.signals().table_changed.disconnect(id);
        }
        if let Some(attached) = self.header.get_mut().take() {
            attached.detach();
        }
    }
}

/// Builder for [`TableSorter`].
pub struct TableSorterBuilder<S: TableSource + 'static> {
    source: Option<Arc<S>>,
    header: Option<Arc<dyn SortHeader>>,
    comparators: ComparatorRegistry,
    directives: Vec<Directive>,
    config: SorterConfig,
}

impl<S: TableSource + 'static> Default for TableSorterBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TableSource + 'static> TableSorterBuilder<S> {
    /// Creates a builder with no source.
    pub fn new() -> Self {
        Self {
            source: None,
            header: None,
            comparators: ComparatorRegistry::new(),
            directives: Vec::new(),
            config: SorterConfig::default(),
        }
    }

    /// Sets the wrapped source.
    pub fn source(mut self, source: Arc<S>) -> Self {
        self.source = Some(source);
        self
    }

    /// Attaches a header.
    pub fn header(mut self, header: Arc<dyn SortHeader>) -> Self {
        self.header = Some(header);
        self
    }

    /// Overrides the comparator for a column type.
    pub fn comparator<F>(mut self, column_type: ColumnType, compare: F) -> Self
    where
        F: Fn(&CellValue, &CellValue) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        self.comparators.set(column_type, Some(Arc::new(compare)));
        self
    }

    /// Adds an initial sort key, lowest priority so far.
    pub fn sort(mut self, column: usize, direction: SortDirection) -> Self {
        self.directives.push(Directive::new(column, direction));
        self
    }

    /// Sets the glyph geometry.
    pub fn indicator_style(mut self, style: IndicatorStyle) -> Self {
        self.config.indicator = style;
        self
    }

    /// Builds the sorter.
    pub fn build(self) -> Arc<TableSorter<S>> {
        let sorter = TableSorter::with_config(self.source, self.config);
        *sorter.comparators.write() = self.comparators;
        for directive in self.directives {
            sorter.set_sorting_status(directive.column, directive.direction);
        }
        if self.header.is_some() {
            sorter.set_header(self.header);
        }
        sorter
    }
}

static_assertions::assert_impl_all!(TableSorter<crate::model::SimpleTableModel>: Send, Sync);
