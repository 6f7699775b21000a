//! Core systems for tablesort.
//!
//! This crate provides the foundational pieces shared by the sorter and its
//! collaborators:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Errors**: The [`Error`] type and [`Result`] alias
//! - **Logging**: `tracing` target names used across the workspace
//!
//! # Signal/Slot Example
//!
//! ```
//! use tablesort_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{Error, Result};
pub use signal::{ConnectionId, Signal};
