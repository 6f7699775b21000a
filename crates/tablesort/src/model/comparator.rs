//! Value comparators and the row comparison rule.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use super::directive::{Directive, SortDirection};
use super::traits::TableSource;
use super::value::{CellValue, ColumnType};

/// Type alias for a value comparator.
///
/// Receives two non-null values from the same column.
pub type CompareFn = Arc<dyn Fn(&CellValue, &CellValue) -> Ordering + Send + Sync>;

/// Compares by natural ordering.
///
/// A total order even over a column holding mixed variants: values of
/// different classes order by class (see [`CellValue::total_cmp`]).
pub fn natural_order(a: &CellValue, b: &CellValue) -> Ordering {
    a.total_cmp(b)
}

/// Compares by display string.
pub fn lexical_order(a: &CellValue, b: &CellValue) -> Ordering {
    a.to_string().cmp(&b.to_string())
}

/// Per-column-type comparator overrides.
///
/// Without an override a column uses [`natural_order`] when its type has a
/// natural ordering and [`lexical_order`] otherwise.
#[derive(Clone, Default)]
pub struct ComparatorRegistry {
    overrides: HashMap<ColumnType, CompareFn>,
}

impl ComparatorRegistry {
    /// Creates a registry with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or, with `None`, removes the override for `column_type`.
    pub fn set(&mut self, column_type: ColumnType, comparator: Option<CompareFn>) {
        match comparator {
            Some(comparator) => {
                self.overrides.insert(column_type, comparator);
            }
            None => {
                self.overrides.remove(&column_type);
            }
        }
    }

    /// Returns `true` if `column_type` has an override.
    pub fn has_override(&self, column_type: ColumnType) -> bool {
        self.overrides.contains_key(&column_type)
    }

    /// Resolves the comparator for a column type.
    pub fn resolve(&self, column_type: ColumnType) -> CompareFn {
        if let Some(comparator) = self.overrides.get(&column_type) {
            return comparator.clone();
        }
        if column_type.has_natural_order() {
            Arc::new(natural_order)
        } else {
            Arc::new(lexical_order)
        }
    }
}

impl std::fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparatorRegistry")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A directive with its comparator already resolved.
#[derive(Clone)]
pub(crate) struct SortKey {
    pub column: usize,
    pub direction: SortDirection,
    pub compare: CompareFn,
}

impl SortKey {
    /// Resolves one key per directive against the source's column types.
    pub fn resolve_all<S: TableSource + ?Sized>(
        directives: &[Directive],
        registry: &ComparatorRegistry,
        source: &S,
    ) -> Vec<SortKey> {
        directives
            .iter()
            .map(|directive| SortKey {
                column: directive.column,
                direction: directive.direction,
                compare: registry.resolve(source.column_type(directive.column)),
            })
            .collect()
    }
}

/// Compares two model rows by the sort keys in priority order.
///
/// Null equals null and is less than any value. The first non-equal key
/// decides, reversed for descending keys.
pub(crate) fn compare_rows<S: TableSource + ?Sized>(
    source: &S,
    keys: &[SortKey],
    row1: usize,
    row2: usize,
) -> Ordering {
    for key in keys {
        let a = source.value_at(row1, key.column);
        let b = source.value_at(row2, key.column);

        let comparison = match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => (key.compare)(&a, &b),
        };
        if comparison != Ordering::Equal {
            return key.direction.apply(comparison);
        }
    }
    Ordering::Equal
}
