//! Cell value type for table rows.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single cell scalar: text, a number, or nothing at all.
///
/// Rows are opaque mappings from column key to `CellValue`; a key that a row
/// does not carry reads as [`CellValue::Missing`].
///
/// # Example
///
/// ```
/// use rowdex::CellValue;
///
/// let name = CellValue::from("helium");
/// let mass = CellValue::from(4.0026);
/// let unknown = CellValue::Missing;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Absent/undefined value.
    Missing,
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Numeric coercion. Text parses as a number where possible, anything
    /// else coerces to NaN (which the sort comparator places last).
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Missing => f64::NAN,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }

    /// Text coercion. Missing reads as the empty string.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Missing => Cow::Borrowed(""),
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Text(s) => Cow::Borrowed(s),
        }
    }
}

// Total key order so values can key frequency maps: Missing < Number < Text,
// numbers by total_cmp (distinct from the sort comparator in `order`).
impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
            (CellValue::Missing, _) => Ordering::Less,
            (_, CellValue::Missing) => Ordering::Greater,
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<f32> for CellValue {
    fn from(value: f32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion() {
        assert_eq!(CellValue::from(3).as_number(), 3.0);
        assert_eq!(CellValue::from(" 42 ").as_number(), 42.0);
        assert!(CellValue::from("abc").as_number().is_nan());
        assert!(CellValue::Missing.as_number().is_nan());
    }

    #[test]
    fn key_order_places_missing_first() {
        let mut values = vec![
            CellValue::from("b"),
            CellValue::from(2),
            CellValue::Missing,
            CellValue::from("a"),
            CellValue::from(1),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                CellValue::Missing,
                CellValue::from(1),
                CellValue::from(2),
                CellValue::from("a"),
                CellValue::from("b"),
            ]
        );
    }
}
