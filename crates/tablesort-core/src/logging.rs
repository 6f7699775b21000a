//! Logging facilities for tablesort.
//!
//! tablesort uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("tablesort=debug")
//!     .init();
//! ```
//!
//! Permutation rebuilds are logged at `debug`, event propagation and signal
//! delivery at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "tablesort_core::signal";
    /// Sorter (index translation and change propagation) target.
    pub const SORTER: &str = "tablesort::sorter";
    /// Header interaction target.
    pub const HEADER: &str = "tablesort::header";
    /// Concrete table models target.
    pub const MODEL: &str = "tablesort::model";
}

/// Span names used for tracing.
pub mod span_names {
    /// Permutation rebuild span.
    pub const REBUILD: &str = "tablesort::rebuild";
    /// Header click handling span.
    pub const HEADER_CLICK: &str = "tablesort::header_click";
}
