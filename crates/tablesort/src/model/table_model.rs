//! Concrete table sources.
//!
//! `TableModel` presents a `Vec` of application rows through a cell
//! extractor. `SimpleTableModel` stores cells directly in a 2D vector.

use std::sync::Arc;

use parking_lot::RwLock;
use tablesort_core::logging::targets;

use super::traits::{column_letters, TableSignals, TableSource};
use super::value::{CellValue, ColumnType};

/// Type alias for a cell data extractor function.
pub type CellExtractor<T> = Arc<dyn Fn(&T, usize) -> CellValue + Send + Sync>;

/// Type alias for a cell writer function. Returns `true` if the value was
/// accepted.
pub type CellSetter<T> = Arc<dyn Fn(&mut T, usize, CellValue) -> bool + Send + Sync>;

/// Name and type of one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    /// Creates a column description.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// A table over application-defined rows.
///
/// # Example
///
/// ```
/// use tablesort::model::{CellValue, Column, ColumnType, TableModel, TableSource};
///
/// struct Host {
///     name: String,
///     load: f64,
/// }
///
/// let model = TableModel::new(
///     vec![
///         Host { name: "alpha".into(), load: 0.7 },
///         Host { name: "beta".into(), load: 0.2 },
///     ],
///     vec![
///         Column::new("Host", ColumnType::Text),
///         Column::new("Load", ColumnType::Float),
///     ],
///     |host, column| match column {
///         0 => CellValue::from(host.name.as_str()),
///         1 => CellValue::from(host.load),
///         _ => CellValue::Null,
///     },
/// );
///
/// assert_eq!(model.row_count(), 2);
/// assert_eq!(model.column_name(1), "Load");
/// ```
pub struct TableModel<T> {
    rows: RwLock<Vec<T>>,
    columns: Vec<Column>,
    cell_extractor: CellExtractor<T>,
    cell_setter: Option<CellSetter<T>>,
    signals: TableSignals,
}

impl<T: Send + Sync + 'static> TableModel<T> {
    /// Creates a new table model.
    ///
    /// `cell_extractor` maps `(row, column)` to a value; it is only called
    /// with in-range columns.
    pub fn new<F>(rows: Vec<T>, columns: Vec<Column>, cell_extractor: F) -> Self
    where
        F: Fn(&T, usize) -> CellValue + Send + Sync + 'static,
    {
        Self {
            rows: RwLock::new(rows),
            columns,
            cell_extractor: Arc::new(cell_extractor),
            cell_setter: None,
            signals: TableSignals::new(),
        }
    }

    /// Makes the model editable through `cell_setter`.
    pub fn with_setter<F>(mut self, cell_setter: F) -> Self
    where
        F: Fn(&mut T, usize, CellValue) -> bool + Send + Sync + 'static,
    {
        self.cell_setter = Some(Arc::new(cell_setter));
        self
    }

    /// Appends a row to the end of the table.
    pub fn push_row(&self, row: T) {
        let row_index = self.rows.read().len();
        self.signals.emit_rows_inserted(row_index, row_index, || {
            self.rows.write().push(row);
        });
    }

    /// Removes and returns the row at `index`.
    pub fn remove_row(&self, index: usize) -> Option<T> {
        if index >= self.rows.read().len() {
            return None;
        }
        let mut removed = None;
        self.signals.emit_rows_removed(index, index, || {
            removed = Some(self.rows.write().remove(index));
        });
        removed
    }

    /// Mutates a row in place and emits an update for the whole row.
    pub fn modify_row<F, R>(&self, row_index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut rows = self.rows.write();
        let row = rows.get_mut(row_index)?;
        let result = f(row);
        drop(rows);

        self.signals.emit_row_updated(row_index);
        Some(result)
    }
}

impl<T: Send + Sync + 'static> TableSource for TableModel<T> {
    fn row_count(&self) -> usize {
        self.rows.read().len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn value_at(&self, row: usize, column: usize) -> CellValue {
        if column >= self.columns.len() {
            return CellValue::Null;
        }
        match self.rows.read().get(row) {
            Some(data) => (self.cell_extractor)(data, column),
            None => CellValue::Null,
        }
    }

    fn signals(&self) -> &TableSignals {
        &self.signals
    }

    fn column_name(&self, column: usize) -> String {
        self.columns
            .get(column)
            .map_or_else(|| column_letters(column), |c| c.name.clone())
    }

    fn column_type(&self, column: usize) -> ColumnType {
        self.columns
            .get(column)
            .map_or(ColumnType::Any, |c| c.column_type)
    }

    fn set_value_at(&self, value: CellValue, row: usize, column: usize) -> bool {
        let Some(setter) = &self.cell_setter else {
            return false;
        };
        if column >= self.columns.len() {
            return false;
        }
        let mut rows = self.rows.write();
        let Some(data) = rows.get_mut(row) else {
            return false;
        };
        let accepted = setter(data, column, value);
        drop(rows);

        if accepted {
            self.signals.emit_cell_updated(row, column);
        }
        accepted
    }

    fn is_cell_editable(&self, row: usize, column: usize) -> bool {
        self.cell_setter.is_some() && row < self.row_count() && column < self.columns.len()
    }
}

/// A table that stores cells directly.
///
/// Short rows read as `Null` in their missing columns.
pub struct SimpleTableModel {
    data: RwLock<Vec<Vec<CellValue>>>,
    columns: RwLock<Vec<Column>>,
    editable: bool,
    signals: TableSignals,
}

impl SimpleTableModel {
    /// Creates an empty model with the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self::from_data(columns, Vec::new())
    }

    /// Creates a model from columns and row data.
    pub fn from_data(columns: Vec<Column>, data: Vec<Vec<CellValue>>) -> Self {
        Self {
            data: RwLock::new(data),
            columns: RwLock::new(columns),
            editable: false,
            signals: TableSignals::new(),
        }
    }

    /// Sets whether cells accept writes through [`TableSource::set_value_at`].
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Replaces the column set.
    pub fn set_columns(&self, columns: Vec<Column>) {
        self.signals.emit_structure_changed(|| {
            *self.columns.write() = columns;
        });
    }

    /// Sets the value of a single cell. Out-of-range positions are ignored.
    pub fn set_cell(&self, row: usize, column: usize, value: CellValue) {
        if column >= self.columns.read().len() {
            return;
        }
        let mut data = self.data.write();
        let Some(cells) = data.get_mut(row) else {
            return;
        };
        if column >= cells.len() {
            cells.resize(column + 1, CellValue::Null);
        }
        cells[column] = value;
        drop(data);

        self.signals.emit_cell_updated(row, column);
    }

    /// Appends a row.
    pub fn append_row(&self, row: Vec<CellValue>) {
        let row_index = self.data.read().len();
        self.signals.emit_rows_inserted(row_index, row_index, || {
            self.data.write().push(row);
        });
    }

    /// Inserts a row at `index`, clamped to the row count.
    pub fn insert_row(&self, index: usize, row: Vec<CellValue>) {
        let index = index.min(self.data.read().len());
        self.signals.emit_rows_inserted(index, index, || {
            self.data.write().insert(index, row);
        });
    }

    /// Removes and returns a row.
    pub fn remove_row(&self, index: usize) -> Option<Vec<CellValue>> {
        if index >= self.data.read().len() {
            tracing::debug!(target: targets::MODEL, index, "remove_row out of range");
            return None;
        }
        let mut removed = None;
        self.signals.emit_rows_removed(index, index, || {
            removed = Some(self.data.write().remove(index));
        });
        removed
    }

    /// Removes all rows.
    pub fn clear(&self) {
        self.signals.emit_data_changed(|| {
            self.data.write().clear();
        });
    }
}

impl TableSource for SimpleTableModel {
    fn row_count(&self) -> usize {
        self.data.read().len()
    }

    fn column_count(&self) -> usize {
        self.columns.read().len()
    }

    fn value_at(&self, row: usize, column: usize) -> CellValue {
        if column >= self.columns.read().len() {
            return CellValue::Null;
        }
        self.data
            .read()
            .get(row)
            .and_then(|cells| cells.get(column))
            .cloned()
            .unwrap_or_default()
    }

    fn signals(&self) -> &TableSignals {
        &self.signals
    }

    fn column_name(&self, column: usize) -> String {
        self.columns
            .read()
            .get(column)
            .map_or_else(|| column_letters(column), |c| c.name.clone())
    }

    fn column_type(&self, column: usize) -> ColumnType {
        self.columns
            .read()
            .get(column)
            .map_or(ColumnType::Any, |c| c.column_type)
    }

    fn set_value_at(&self, value: CellValue, row: usize, column: usize) -> bool {
        if !self.is_cell_editable(row, column) {
            return false;
        }
        self.set_cell(row, column, value);
        true
    }

    fn is_cell_editable(&self, row: usize, column: usize) -> bool {
        self.editable && row < self.row_count() && column < self.column_count()
    }
}

static_assertions::assert_impl_all!(SimpleTableModel: Send, Sync);
static_assertions::assert_impl_all!(TableModel<String>: Send, Sync);
