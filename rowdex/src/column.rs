//! Column descriptors.

use serde::{Deserialize, Serialize};

/// Describes one table column. Identity is `key`; the position of a column
/// within the schema array defines its canonical index, which coded-rank
/// arithmetic encodes as `sign * (1-based index)`.
///
/// # Example
///
/// ```
/// use rowdex::Column;
///
/// let columns = vec![
///     Column::new("name"),
///     Column::new("mass").numeric(),
///     Column::new("notes").nostat(),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Unique key within the column set; rows are addressed by it.
    pub key: String,
    /// Numeric columns track a min/max range and sort numerically.
    #[serde(default)]
    pub numeric: bool,
    /// Columns that opt out of statistics collection entirely.
    #[serde(default)]
    pub nostat: bool,
}

impl Column {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            numeric: false,
            nostat: false,
        }
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub fn nostat(mut self) -> Self {
        self.nostat = true;
        self
    }
}

/// Position of a column key within the schema, if present.
pub fn column_index(columns: &[Column], key: &str) -> Option<usize> {
    columns.iter().position(|c| c.key == key)
}
