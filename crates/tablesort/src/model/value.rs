//! Cell values and column types.
//!
//! Every cell a [`TableSource`](super::TableSource) hands out is a
//! [`CellValue`]. Columns declare a [`ColumnType`], which selects the
//! comparator used when sorting on that column and the direction a header
//! click starts with.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// The declared type of a table column.
///
/// Used as the key of the comparator registry, so it is resolved once per
/// column rather than by inspecting each value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    /// Boolean flags.
    Bool,
    /// Signed integers.
    Integer,
    /// Floating point numbers.
    Float,
    /// Free text.
    Text,
    /// Points in time.
    Timestamp,
    /// Anything else; only the display string is comparable.
    #[default]
    Any,
}

impl ColumnType {
    /// Returns `true` if values of this type have a natural ordering.
    ///
    /// Columns without one sort by their display strings.
    pub fn has_natural_order(&self) -> bool {
        !matches!(self, ColumnType::Any)
    }

    /// Returns `true` for number columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns `true` for time columns.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Timestamp)
    }
}

/// A single cell value.
///
/// `Null` is the absent value; it sorts before everything else.
#[derive(Clone, Default)]
pub enum CellValue {
    /// No value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Timestamp value.
    Timestamp(DateTime<Utc>),
    /// Application value that only knows how to display itself.
    Custom(Arc<dyn fmt::Display + Send + Sync>),
}

impl CellValue {
    /// Wraps an arbitrary displayable value.
    pub fn custom<T: fmt::Display + Send + Sync + 'static>(value: T) -> Self {
        CellValue::Custom(Arc::new(value))
    }

    /// Returns `true` if this is `CellValue::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Rank of the value's comparison class.
    ///
    /// Integers and floats share a class. Classes order as null, bool,
    /// number, timestamp, text, custom.
    fn class_rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Timestamp(_) => 3,
            CellValue::Text(_) => 4,
            CellValue::Custom(_) => 5,
        }
    }

    /// Compares two values by their natural ordering.
    ///
    /// Returns `None` when the pair has no natural ordering (custom values,
    /// or variants from different classes). Integers and floats compare
    /// exactly by numeric value; `-0.0` equals `0.0`.
    pub fn natural_cmp(&self, other: &CellValue) -> Option<Ordering> {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Some(Ordering::Equal),
            (CellValue::Bool(a), CellValue::Bool(b)) => Some(a.cmp(b)),
            (CellValue::Int(a), CellValue::Int(b)) => Some(a.cmp(b)),
            (CellValue::Float(a), CellValue::Float(b)) => Some(float_cmp(*a, *b)),
            (CellValue::Int(a), CellValue::Float(b)) => Some(int_float_cmp(*a, *b)),
            (CellValue::Float(a), CellValue::Int(b)) => Some(int_float_cmp(*b, *a).reverse()),
            (CellValue::Text(a), CellValue::Text(b)) => Some(a.cmp(b)),
            (CellValue::Timestamp(a), CellValue::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total order over all values.
    ///
    /// Values from different classes order by class. Within a class the
    /// natural ordering applies; custom values compare by display string.
    pub fn total_cmp(&self, other: &CellValue) -> Ordering {
        self.class_rank()
            .cmp(&other.class_rank())
            .then_with(|| {
                self.natural_cmp(other)
                    .unwrap_or_else(|| self.to_string().cmp(&other.to_string()))
            })
    }
}

/// `f64::total_cmp` with the two zeros merged.
fn float_cmp(a: f64, b: f64) -> Ordering {
    if a == 0.0 && b == 0.0 {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Exact comparison of an integer with a float, consistent with [`float_cmp`].
fn int_float_cmp(int: i64, float: f64) -> Ordering {
    // 2^63, exactly representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        // total_cmp puts negative NaN below every number and positive NaN above.
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    let floor = float.floor();
    // In range, so the cast is exact.
    let whole = floor as i64;
    int.cmp(&whole).then(if float > floor {
        Ordering::Less
    } else {
        Ordering::Equal
    })
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            CellValue::Custom(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Debug for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "Null"),
            CellValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            CellValue::Int(n) => f.debug_tuple("Int").field(n).finish(),
            CellValue::Float(n) => f.debug_tuple("Float").field(n).finish(),
            CellValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            CellValue::Timestamp(t) => f.debug_tuple("Timestamp").field(t).finish(),
            CellValue::Custom(value) => f.debug_tuple("Custom").field(&value.to_string()).finish(),
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => a == b,
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Timestamp(a), CellValue::Timestamp(b)) => a == b,
            (CellValue::Custom(a), CellValue::Custom(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(t: DateTime<Utc>) -> Self {
        CellValue::Timestamp(t)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => value.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_column_type_kinds() {
        assert!(ColumnType::Integer.is_numeric());
        assert!(ColumnType::Float.is_numeric());
        assert!(!ColumnType::Timestamp.is_numeric());
        assert!(ColumnType::Timestamp.is_temporal());
        assert!(ColumnType::Text.has_natural_order());
        assert!(!ColumnType::Any.has_natural_order());
    }

    #[test]
    fn test_natural_cmp() {
        let a = CellValue::from(2);
        let b = CellValue::from(10);
        assert_eq!(a.natural_cmp(&b), Some(Ordering::Less));

        // Mixed numeric variants compare by value.
        assert_eq!(
            CellValue::from(2.5).natural_cmp(&CellValue::from(2)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            CellValue::from(3).natural_cmp(&CellValue::from(3.0)),
            Some(Ordering::Equal)
        );

        // Text vs number has no natural ordering.
        assert_eq!(CellValue::from("2").natural_cmp(&CellValue::from(2)), None);
        assert_eq!(
            CellValue::custom("x").natural_cmp(&CellValue::custom("y")),
            None
        );
    }

    #[test]
    fn test_int_float_compare_is_exact() {
        // 2^53 + 1 has no f64 representation; a lossy cast would call these equal.
        let big = CellValue::from(9_007_199_254_740_993_i64);
        let near = CellValue::from(9_007_199_254_740_992.0);
        assert_eq!(big.natural_cmp(&near), Some(Ordering::Greater));
        assert_eq!(near.natural_cmp(&big), Some(Ordering::Less));

        assert_eq!(
            CellValue::from(i64::MAX).natural_cmp(&CellValue::from(f64::INFINITY)),
            Some(Ordering::Less)
        );
        assert_eq!(
            CellValue::from(i64::MIN).natural_cmp(&CellValue::from(-9.3e18)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            CellValue::from(-3).natural_cmp(&CellValue::from(-2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            CellValue::from(0).natural_cmp(&CellValue::from(-0.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            CellValue::from(-0.0).natural_cmp(&CellValue::from(0.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            CellValue::from(5).natural_cmp(&CellValue::from(f64::NAN)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_total_cmp_orders_classes() {
        let ordered = [
            CellValue::Null,
            CellValue::from(true),
            CellValue::from(9),
            CellValue::from(10.5),
            CellValue::from(11),
            CellValue::from(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            CellValue::from("10"),
            CellValue::from("5"),
            CellValue::custom("0"),
        ];
        for (i, a) in ordered.iter().enumerate() {
            for (j, b) in ordered.iter().enumerate() {
                assert_eq!(a.total_cmp(b), i.cmp(&j), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_timestamp_order() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(
            CellValue::from(earlier).natural_cmp(&CellValue::from(later)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from(42).to_string(), "42");
        assert_eq!(CellValue::from("abc").to_string(), "abc");
        assert_eq!(CellValue::custom(7u8).to_string(), "7");
    }

    #[test]
    fn test_from_option() {
        assert!(CellValue::from(None::<i64>).is_null());
        assert_eq!(CellValue::from(Some("a")), CellValue::from("a"));
    }
}
