//! Error types for tablesort.

/// Result type alias for tablesort operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the sorter and its collaborators.
///
/// Most precondition failures (an unknown column, a click outside the
/// header) are silent no-ops rather than errors; the variants here cover the
/// cases where a caller asked for something that cannot be answered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A raw sort direction code outside `{-1, 0, 1}`.
    #[error("unexpected sort direction: {0}")]
    UnexpectedDirection(i32),

    /// A cell was read or written while no source model is attached.
    #[error("no source model attached")]
    NoSource,

    /// A view row outside the current row range.
    #[error("row {row} out of range for {row_count} rows")]
    RowOutOfRange { row: usize, row_count: usize },

    /// A column outside the current column range.
    #[error("column {column} out of range for {column_count} columns")]
    ColumnOutOfRange { column: usize, column_count: usize },

    /// The source refused a cell write.
    #[error("cell ({row}, {column}) is not editable")]
    NotEditable { row: usize, column: usize },
}

impl Error {
    /// Create a row range error.
    pub fn row_out_of_range(row: usize, row_count: usize) -> Self {
        Self::RowOutOfRange { row, row_count }
    }

    /// Create a column range error.
    pub fn column_out_of_range(column: usize, column_count: usize) -> Self {
        Self::ColumnOutOfRange {
            column,
            column_count,
        }
    }

    /// Create a not-editable error.
    pub fn not_editable(row: usize, column: usize) -> Self {
        Self::NotEditable { row, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::UnexpectedDirection(7).to_string(),
            "unexpected sort direction: 7"
        );
        assert_eq!(
            Error::row_out_of_range(5, 3).to_string(),
            "row 5 out of range for 3 rows"
        );
        assert_eq!(
            Error::column_out_of_range(4, 2).to_string(),
            "column 4 out of range for 2 columns"
        );
        assert_eq!(Error::NoSource.to_string(), "no source model attached");
    }
}
