//! Header click handling.
//!
//! A click advances the clicked column one step through its direction
//! cycle. Number and time columns start descending; everything else starts
//! ascending.
//!
//! Without the compound modifier the click replaces the whole sort with the
//! clicked column. With it, the clicked column is added to (or cycled within)
//! the existing compound sort.

use crate::model::{ColumnType, SortDirection, SortDirectives};

/// Modifier keys held during a header click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClickModifiers {
    /// Keep the existing sort keys (usually Ctrl).
    pub compound: bool,
    /// Cycle in the opposite direction (usually Shift).
    pub reverse: bool,
}

impl ClickModifiers {
    /// No modifiers held.
    pub const NONE: ClickModifiers = ClickModifiers {
        compound: false,
        reverse: false,
    };

    /// Only the compound modifier.
    pub const COMPOUND: ClickModifiers = ClickModifiers {
        compound: true,
        reverse: false,
    };

    /// Only the reverse modifier.
    pub const REVERSE: ClickModifiers = ClickModifiers {
        compound: false,
        reverse: true,
    };
}

/// A click on a header section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderClick {
    /// The model column under the pointer, `None` past the last section.
    pub column: Option<usize>,
    pub modifiers: ClickModifiers,
}

impl HeaderClick {
    /// Creates a click without modifiers.
    pub fn new(column: Option<usize>) -> Self {
        Self {
            column,
            modifiers: ClickModifiers::NONE,
        }
    }

    /// Sets the modifiers.
    pub fn with_modifiers(mut self, modifiers: ClickModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The order a column's direction steps through on repeated clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortCycle {
    /// Unsorted, ascending, descending, unsorted.
    AscendingFirst,
    /// Unsorted, descending, ascending, unsorted.
    DescendingFirst,
}

impl SortCycle {
    /// Returns the cycle for a column of the given type.
    pub fn for_column_type(column_type: ColumnType) -> Self {
        if column_type.is_numeric() || column_type.is_temporal() {
            SortCycle::DescendingFirst
        } else {
            SortCycle::AscendingFirst
        }
    }

    /// Returns the direction following `current`.
    pub fn next(self, current: SortDirection) -> SortDirection {
        use SortDirection::*;
        match (self, current) {
            (SortCycle::AscendingFirst, NotSorted) => Ascending,
            (SortCycle::AscendingFirst, Ascending) => Descending,
            (SortCycle::AscendingFirst, Descending) => NotSorted,
            (SortCycle::DescendingFirst, NotSorted) => Descending,
            (SortCycle::DescendingFirst, Descending) => Ascending,
            (SortCycle::DescendingFirst, Ascending) => NotSorted,
        }
    }
}

/// What a click does to the directive set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClickOutcome {
    /// Drop every directive before applying `status`.
    pub cancel_others: bool,
    /// The clicked column's new direction.
    pub status: SortDirection,
}

/// Resolves a click on `column` against the current directives.
///
/// A plain click on a column that is not the primary key of a compound sort
/// restarts that column's cycle, so the result is a fresh single-column sort.
/// The reverse modifier steps the cycle once more, which walks it backwards.
pub(crate) fn resolve_click(
    directives: &SortDirectives,
    column: usize,
    column_type: ColumnType,
    modifiers: ClickModifiers,
) -> ClickOutcome {
    let cancel_others = !modifiers.compound;
    let mut status = directives.status(column);
    if cancel_others && directives.len() > 1 && directives.priority(column) != Some(0) {
        status = SortDirection::NotSorted;
    }

    let cycle = SortCycle::for_column_type(column_type);
    if modifiers.reverse {
        status = cycle.next(status);
    }
    ClickOutcome {
        cancel_others,
        status: cycle.next(status),
    }
}
