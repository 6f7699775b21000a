//! Core traits for table models.
//!
//! This module defines the tabular-data contract shared by plain sources and
//! by the [`TableSorter`](super::TableSorter) decorator, plus the change
//! notifications they emit.

use tablesort_core::Signal;

use super::value::{CellValue, ColumnType};

/// A change notification emitted by a table source.
///
/// Row ranges are inclusive. For a sorter, rows are view rows; for a plain
/// source they are model rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableChange {
    /// The column set changed (count, names or types). Everything should be
    /// re-read, including headers.
    StructureChanged,
    /// Any row may have changed, and the row count may differ.
    DataChanged,
    /// Rows were reordered; row count, columns and values are unchanged.
    ///
    /// A [`TableSorter`](super::TableSorter) emits this whenever its sort
    /// directives change, so observers must re-read every visible row on it
    /// just as on `DataChanged`.
    LayoutChanged,
    /// Rows `first..=last` were inserted.
    RowsInserted { first: usize, last: usize },
    /// Rows `first..=last` were removed.
    RowsRemoved { first: usize, last: usize },
    /// Cells in rows `first..=last` changed; `column` is `None` when every
    /// column of those rows may have changed.
    RowsUpdated {
        first: usize,
        last: usize,
        column: Option<usize>,
    },
}

impl TableChange {
    /// Creates an update notification for a single cell.
    pub fn cell(row: usize, column: usize) -> Self {
        TableChange::RowsUpdated {
            first: row,
            last: row,
            column: Some(column),
        }
    }

    /// Returns the single `(row, column)` this change is confined to, if any.
    pub fn single_cell(&self) -> Option<(usize, usize)> {
        match *self {
            TableChange::RowsUpdated {
                first,
                last,
                column: Some(column),
            } if first == last => Some((first, column)),
            _ => None,
        }
    }
}

/// The tabular-data contract.
///
/// Implemented by concrete sources such as [`TableModel`](super::TableModel)
/// and by [`TableSorter`](super::TableSorter), so a sorter is a drop-in
/// substitute anywhere its source was used.
///
/// At minimum, implement [`row_count`](TableSource::row_count),
/// [`column_count`](TableSource::column_count),
/// [`value_at`](TableSource::value_at) and
/// [`signals`](TableSource::signals). Editable sources also override
/// [`set_value_at`](TableSource::set_value_at) and
/// [`is_cell_editable`](TableSource::is_cell_editable).
///
/// Implementations must emit a [`TableChange`] on `signals().table_changed`
/// after every mutation, otherwise decorators keep serving a stale order.
pub trait TableSource: Send + Sync {
    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the number of columns.
    fn column_count(&self) -> usize;

    /// Returns the value at `(row, column)`, or `CellValue::Null` when the
    /// position is out of range.
    fn value_at(&self, row: usize, column: usize) -> CellValue;

    /// Returns the signals for this source.
    fn signals(&self) -> &TableSignals;

    // -------------------------------------------------------------------------
    // Optional methods with default implementations
    // -------------------------------------------------------------------------

    /// Returns the column's display name.
    ///
    /// The default uses spreadsheet letters: `A`, `B`, ..., `Z`, `AA`, ...
    fn column_name(&self, column: usize) -> String {
        column_letters(column)
    }

    /// Returns the column's declared type.
    fn column_type(&self, _column: usize) -> ColumnType {
        ColumnType::Any
    }

    /// Writes a value. Returns `true` if the source accepted it.
    ///
    /// The default is read-only.
    fn set_value_at(&self, _value: CellValue, _row: usize, _column: usize) -> bool {
        false
    }

    /// Returns `true` if the cell accepts [`set_value_at`](TableSource::set_value_at).
    fn is_cell_editable(&self, _row: usize, _column: usize) -> bool {
        false
    }
}

/// Signals emitted by table sources.
pub struct TableSignals {
    /// Emitted after every mutation.
    pub table_changed: Signal<TableChange>,
}

impl Default for TableSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSignals {
    /// Creates a new set of table signals.
    pub fn new() -> Self {
        Self {
            table_changed: Signal::new(),
        }
    }

    /// Emits a row insertion, running `insert_fn` first.
    pub fn emit_rows_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        insert_fn();
        self.table_changed
            .emit(TableChange::RowsInserted { first, last });
    }

    /// Emits a row removal, running `remove_fn` first.
    pub fn emit_rows_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        remove_fn();
        self.table_changed.emit(TableChange::RowsRemoved { first, last });
    }

    /// Emits an update for a single cell.
    pub fn emit_cell_updated(&self, row: usize, column: usize) {
        self.table_changed.emit(TableChange::cell(row, column));
    }

    /// Emits an update for every column of one row.
    pub fn emit_row_updated(&self, row: usize) {
        self.table_changed.emit(TableChange::RowsUpdated {
            first: row,
            last: row,
            column: None,
        });
    }

    /// Emits a full data change, running `change_fn` first.
    pub fn emit_data_changed<F>(&self, change_fn: F)
    where
        F: FnOnce(),
    {
        change_fn();
        self.table_changed.emit(TableChange::DataChanged);
    }

    /// Emits a structure change, running `change_fn` first.
    pub fn emit_structure_changed<F>(&self, change_fn: F)
    where
        F: FnOnce(),
    {
        change_fn();
        self.table_changed.emit(TableChange::StructureChanged);
    }
}

/// Spreadsheet-style column label for a zero-based index.
pub(crate) fn column_letters(index: usize) -> String {
    let mut result = String::new();
    let mut n = index + 1;

    while n > 0 {
        n -= 1;
        let c = (b'A' + (n % 26) as u8) as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}
