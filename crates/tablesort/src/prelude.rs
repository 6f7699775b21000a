//! Prelude module for tablesort.
//!
//! ```ignore
//! use tablesort::prelude::*;
//! ```

// ============================================================================
// Signals and Errors
// ============================================================================

pub use crate::{ConnectionId, Error, Result, Signal};

// ============================================================================
// Models
// ============================================================================

pub use crate::model::{
    CellValue, Column, ColumnType, SimpleTableModel, TableChange, TableModel, TableSource,
};

// ============================================================================
// Sorting
// ============================================================================

pub use crate::model::{
    CompareFn, Directive, SortDirection, SorterConfig, TableSorter, TableSorterBuilder,
};

// ============================================================================
// Headers
// ============================================================================

pub use crate::header::{ClickModifiers, HeaderClick, HeaderView, SortHeader};
