//! Per-column statistics helpers.
//!
//! Each column gets a strategy controlling what its statistics accumulator
//! looks like, how it is updated, and whether a given cell value passes the
//! column's user filter. Selection is a pure function of the descriptor.

use std::collections::BTreeMap;

use crate::column::Column;
use crate::filter::ColumnFilter;
use crate::value::CellValue;

/// Statistics strategy for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Running min/max only; never filterable through this layer.
    Numeric,
    /// Seen/kept frequency maps; filterable via `user_params`.
    Collectible,
    /// No statistics, accepts everything.
    NoStat,
}

impl StatKind {
    /// Strategy selection, evaluated in order: `numeric`, then `nostat`,
    /// then the collectible default.
    pub fn for_column(column: &Column) -> Self {
        if column.numeric {
            StatKind::Numeric
        } else if column.nostat {
            StatKind::NoStat
        } else {
            StatKind::Collectible
        }
    }

    /// Fresh accumulator for one filter pass; `None` for no-op columns.
    pub fn new_stats(self) -> Option<ColumnStats> {
        match self {
            StatKind::Numeric => Some(ColumnStats::Numeric {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            }),
            StatKind::Collectible => Some(ColumnStats::Collectible {
                seen: BTreeMap::new(),
                kept: BTreeMap::new(),
            }),
            StatKind::NoStat => None,
        }
    }

    /// Whether a cell value passes the column's filter entry. Only the
    /// collectible strategy consults `user_params`; an absent or empty
    /// allow-list accepts everything.
    pub fn accepts(self, value: &CellValue, filter: Option<&ColumnFilter>) -> bool {
        match self {
            StatKind::Collectible => match filter.and_then(|f| f.user_params.as_deref()) {
                Some(allowed) if !allowed.is_empty() => allowed.contains(value),
                _ => true,
            },
            StatKind::Numeric | StatKind::NoStat => true,
        }
    }
}

/// Statistics accumulated for one column during a filter pass.
///
/// `seen` reflects the pre-filter population, `kept` only the finally
/// accepted rows; the asymmetry is what lets a filter editor show
/// "N of M rows match" per value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStats {
    Numeric {
        min: f64,
        max: f64,
    },
    Collectible {
        seen: BTreeMap<CellValue, u32>,
        kept: BTreeMap<CellValue, u32>,
    },
}

impl ColumnStats {
    /// Record a value encountered before filtering.
    pub fn record_seen(&mut self, value: &CellValue) {
        match self {
            ColumnStats::Numeric { min, max } => {
                if value.is_missing() {
                    return;
                }
                let n = value.as_number();
                if n.is_nan() {
                    return;
                }
                if n < *min {
                    *min = n;
                }
                if n > *max {
                    *max = n;
                }
            }
            ColumnStats::Collectible { seen, .. } => {
                *seen.entry(value.clone()).or_insert(0) += 1;
            }
        }
    }

    /// Record a value of a row that survived every filter gate.
    pub fn record_kept(&mut self, value: &CellValue) {
        if let ColumnStats::Collectible { kept, .. } = self {
            *kept.entry(value.clone()).or_insert(0) += 1;
        }
    }

    /// Min/max range of a numeric column, `None` when no value was recorded.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            ColumnStats::Numeric { min, max } if min <= max => Some((*min, *max)),
            _ => None,
        }
    }

    pub fn seen_count(&self, value: &CellValue) -> u32 {
        match self {
            ColumnStats::Collectible { seen, .. } => seen.get(value).copied().unwrap_or(0),
            ColumnStats::Numeric { .. } => 0,
        }
    }

    pub fn kept_count(&self, value: &CellValue) -> u32 {
        match self {
            ColumnStats::Collectible { kept, .. } => kept.get(value).copied().unwrap_or(0),
            ColumnStats::Numeric { .. } => 0,
        }
    }

    /// Distinct values encountered, in key order.
    pub fn distinct_seen(&self) -> Vec<&CellValue> {
        match self {
            ColumnStats::Collectible { seen, .. } => seen.keys().collect(),
            ColumnStats::Numeric { .. } => Vec::new(),
        }
    }
}
