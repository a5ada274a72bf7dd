//! Row filter and statistics pass.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::row::Row;
use crate::stats::{ColumnStats, StatKind};
use crate::value::CellValue;

/// Per-column filter entry.
///
/// `user_params` is the end-user allow-list; a row is rejected when its value
/// is not in the list. `outer_params` are caller-seeded values merged into the
/// filter editor's option set, but they never gate acceptance on their own.
/// An entry with neither field set is pruned from the indexer's registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_params: Option<Vec<CellValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_params: Option<Vec<CellValue>>,
}

impl ColumnFilter {
    pub fn is_empty(&self) -> bool {
        self.user_params.is_none() && self.outer_params.is_none()
    }
}

/// Result of one filter/statistics pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPass {
    /// Model indices of accepted rows, in original order.
    pub accepted: Vec<usize>,
    /// Statistics per column key; no-op columns have no entry.
    pub stats: HashMap<String, ColumnStats>,
    /// Size of the unfiltered row set.
    pub total_rows: usize,
}

impl FilterPass {
    /// How many rows the pass removed.
    pub fn removed(&self) -> usize {
        self.total_rows - self.accepted.len()
    }

    /// Whether the pass kept every row (the identity-order shortcut relies
    /// on this).
    pub fn is_complete(&self) -> bool {
        self.accepted.len() == self.total_rows
    }
}

/// Single forward pass over `rows` in original order, producing the accepted
/// row list plus per-column statistics.
///
/// The seen side of each statistic is updated for every value encountered; a
/// row must then pass three gates to be accepted: every column's filter
/// entry, the caller's `external` predicate, and the indexer's `stored`
/// predicate. Only accepted rows contribute to the kept side.
///
/// Returns `None` when `rows` or `columns` is empty; callers treat that as
/// "nothing to display", not as an error.
pub fn pre_filter(
    columns: &[Column],
    rows: &[Row],
    filters: &HashMap<String, ColumnFilter>,
    external: Option<&dyn Fn(&Row) -> bool>,
    stored: Option<&dyn Fn(&Row) -> bool>,
) -> Option<FilterPass> {
    if columns.is_empty() || rows.is_empty() {
        return None;
    }

    let kinds: Vec<StatKind> = columns.iter().map(StatKind::for_column).collect();
    let mut stats: Vec<Option<ColumnStats>> = kinds.iter().map(|k| k.new_stats()).collect();
    let mut accepted = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        let mut ok = true;
        for (ci, column) in columns.iter().enumerate() {
            let value = row.get(&column.key);
            // Seen statistics are unconditional, even for rows already
            // rejected by an earlier column.
            if let Some(stat) = stats[ci].as_mut() {
                stat.record_seen(value);
            }
            if ok && !kinds[ci].accepts(value, filters.get(&column.key)) {
                ok = false;
            }
        }
        if ok {
            if let Some(predicate) = external {
                ok = predicate(row);
            }
        }
        if ok {
            if let Some(predicate) = stored {
                ok = predicate(row);
            }
        }
        if !ok {
            continue;
        }
        for (ci, column) in columns.iter().enumerate() {
            if let Some(stat) = stats[ci].as_mut() {
                stat.record_kept(row.get(&column.key));
            }
        }
        accepted.push(row_index);
    }

    let stats = columns
        .iter()
        .zip(stats)
        .filter_map(|(column, stat)| stat.map(|s| (column.key.clone(), s)))
        .collect();

    Some(FilterPass {
        accepted,
        stats,
        total_rows: rows.len(),
    })
}

/// Option list for a column's filter editor: every distinct value seen during
/// the pass, merged with the caller-seeded `outer_params`, in key order.
pub fn filter_options(stats: Option<&ColumnStats>, filter: Option<&ColumnFilter>) -> Vec<CellValue> {
    let mut options: Vec<CellValue> = match stats {
        Some(ColumnStats::Collectible { seen, .. }) => seen.keys().cloned().collect(),
        _ => Vec::new(),
    };
    if let Some(outer) = filter.and_then(|f| f.outer_params.as_deref()) {
        for value in outer {
            if !options.contains(value) {
                options.push(value.clone());
            }
        }
        options.sort();
    }
    options
}
