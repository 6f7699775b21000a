//! Table models and the sorting decorator.
//!
//! # Core Types
//!
//! - `TableSource`: The trait every table implements
//! - `CellValue` / `ColumnType`: Cell contents and declared column types
//! - `TableChange` / `TableSignals`: Change notifications
//! - `TableSorter`: Presents a source's rows in sorted order
//!
//! # Model Implementations
//!
//! - `TableModel`: Rows of application data read through an extractor
//! - `SimpleTableModel`: Cells stored in a 2D vector
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  table_changed  ┌─────────────┐  table_changed  ┌──────────┐
//! │   Source    │────────────────>│ TableSorter │────────────────>│ Observer │
//! │(TableSource)│<────────────────│(TableSource)│<────────────────│          │
//! └─────────────┘  model rows     └─────────────┘  view rows      └──────────┘
//! ```
//!
//! The sorter never copies or reorders source data. It keeps a permutation
//! of model rows, rebuilt lazily after anything that might have changed the
//! order.

mod comparator;
mod directive;
mod mapping;
mod sorter;
mod table_model;
mod traits;
mod value;

pub use comparator::{lexical_order, natural_order, CompareFn, ComparatorRegistry};
pub use directive::{Directive, SortDirection, SortDirectives};
pub use sorter::{SorterConfig, TableSorter, TableSorterBuilder};
pub use table_model::{CellExtractor, CellSetter, Column, SimpleTableModel, TableModel};
pub use traits::{TableChange, TableSignals, TableSource};
pub use value::{CellValue, ColumnType};

