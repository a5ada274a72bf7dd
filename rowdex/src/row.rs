//! Row type: an opaque mapping from column key to cell value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

static EMPTY: Row = Row {
    cells: BTreeMap::new(),
};

static MISSING: CellValue = CellValue::Missing;

/// Free-form row predicate (e.g. a text-search gate supplied by the host).
pub type RowPredicate = Box<dyn Fn(&Row) -> bool>;

/// One table row. The indexing engine never mutates rows; it only produces
/// reordered indices into the caller's row array.
///
/// # Example
///
/// ```
/// use rowdex::Row;
///
/// let row = Row::new().cell("name", "helium").cell("mass", 4.0026);
/// assert_eq!(row.get("name").as_text(), "helium");
/// assert!(row.get("symbol").is_missing());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared empty placeholder row handed out for out-of-range probes.
    pub fn placeholder() -> &'static Row {
        &EMPTY
    }

    /// Builder-style cell assignment.
    pub fn cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(key.into(), value.into());
    }

    /// Look up a cell. Absent keys read as [`CellValue::Missing`].
    pub fn get(&self, key: &str) -> &CellValue {
        self.cells.get(key).unwrap_or(&MISSING)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
