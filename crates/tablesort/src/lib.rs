//! tablesort - a sorting decorator for table models.
//!
//! Wrap any [`TableSource`](model::TableSource) in a
//! [`TableSorter`](model::TableSorter) to present its rows in sorted order
//! without touching the source. Sorting can be compound (several columns with
//! priorities), and an attached header turns column clicks into sort changes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tablesort::prelude::*;
//!
//! let source = Arc::new(SimpleTableModel::from_data(
//!     vec![Column::new("name", ColumnType::Text)],
//!     vec![vec!["pear".into()], vec!["apple".into()]],
//! ));
//! let header = Arc::new(HeaderView::new(1));
//! let sorter = TableSorterBuilder::new()
//!     .source(source)
//!     .header(header.clone())
//!     .build();
//!
//! header.click_section(0, ClickModifiers::NONE);
//! assert_eq!(sorter.sorting_status(0), SortDirection::Ascending);
//! assert_eq!(sorter.value_at(0, 0), CellValue::from("apple"));
//! ```

pub use tablesort_core::*;

pub mod header;
pub mod model;
pub mod prelude;
