//! Sort directions and the ordered directive set.

use std::cmp::Ordering;

use indexmap::IndexMap;
use tablesort_core::{Error, Result};

/// Sort direction of a column.
///
/// `NotSorted` is a distinct value so "is this column sorting?" is a single
/// comparison. The raw codes (`-1`, `0`, `1`) match the integer constants
/// hosts commonly use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Largest first.
    Descending,
    /// Not part of the sort.
    #[default]
    NotSorted,
    /// Smallest first.
    Ascending,
}

impl SortDirection {
    /// Returns the raw integer code.
    pub fn as_raw(self) -> i32 {
        match self {
            SortDirection::Descending => -1,
            SortDirection::NotSorted => 0,
            SortDirection::Ascending => 1,
        }
    }

    /// Returns `true` for `Ascending` and `Descending`.
    pub fn is_sorted(self) -> bool {
        self != SortDirection::NotSorted
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    }
}

impl TryFrom<i32> for SortDirection {
    type Error = Error;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            -1 => Ok(SortDirection::Descending),
            0 => Ok(SortDirection::NotSorted),
            1 => Ok(SortDirection::Ascending),
            other => Err(Error::UnexpectedDirection(other)),
        }
    }
}

/// One key of a compound sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Directive {
    /// The model column sorted on.
    pub column: usize,
    /// Never `NotSorted` for a stored directive.
    pub direction: SortDirection,
}

impl Directive {
    /// Creates a directive.
    pub fn new(column: usize, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// The active compound sort: directives in priority order, unique by column.
///
/// Backed by an insertion-ordered map, so status and priority lookups are
/// direct and removal keeps the relative order of the remaining keys.
#[derive(Debug, Clone, Default)]
pub struct SortDirectives {
    directives: IndexMap<usize, SortDirection>,
}

impl SortDirectives {
    /// Creates an empty directive set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the direction for `column`, `NotSorted` if it has no directive.
    pub fn status(&self, column: usize) -> SortDirection {
        self.directives
            .get(&column)
            .copied()
            .unwrap_or(SortDirection::NotSorted)
    }

    /// Returns the priority rank of `column` (0 = primary key).
    pub fn priority(&self, column: usize) -> Option<usize> {
        self.directives.get_index_of(&column)
    }

    /// Sets the direction for `column`.
    ///
    /// An existing directive is overwritten in place, keeping its priority, or
    /// removed when `direction` is `NotSorted`. A new directive is appended as
    /// the lowest priority. Returns `true` if the set changed.
    pub fn set_status(&mut self, column: usize, direction: SortDirection) -> bool {
        if !direction.is_sorted() {
            return self.directives.shift_remove(&column).is_some();
        }
        // `insert` keeps an existing key at its position.
        match self.directives.insert(column, direction) {
            Some(previous) => previous != direction,
            None => true,
        }
    }

    /// Removes every directive.
    pub fn cancel(&mut self) {
        self.directives.clear();
    }

    /// Returns `true` if at least one column is sorting.
    pub fn is_sorting(&self) -> bool {
        !self.directives.is_empty()
    }

    /// Returns the number of active directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns `true` if no column is sorting.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Returns the primary directive.
    pub fn primary(&self) -> Option<Directive> {
        self.directives
            .first()
            .map(|(&column, &direction)| Directive::new(column, direction))
    }

    /// Iterates directives in priority order.
    pub fn iter(&self) -> impl Iterator<Item = Directive> + '_ {
        self.directives
            .iter()
            .map(|(&column, &direction)| Directive::new(column, direction))
    }

    /// Returns a snapshot of the directives in priority order.
    pub fn to_vec(&self) -> Vec<Directive> {
        self.iter().collect()
    }
}
