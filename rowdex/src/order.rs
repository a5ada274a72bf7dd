//! Composite comparator and ordered-index construction.

use std::cmp::Ordering;

use crate::column::Column;
use crate::filter::FilterPass;
use crate::row::Row;
use crate::sort::{SortDirection, SortKey};
use crate::value::CellValue;

/// Compare two cell values for ordering, with missing sorting first.
///
/// Equivalent to [`compare_cells_missing`] with `Ordering::Less`.
pub fn compare_cells(a: &CellValue, b: &CellValue, numeric: bool) -> Ordering {
    compare_cells_missing(a, b, numeric, Ordering::Less)
}

/// Compare two cell values for ordering.
///
/// `missing_sign` is the result when only `a` is missing (so `Less` places
/// missing values before defined ones). On the numeric path NaN sorts after
/// every non-NaN value and two NaNs compare equal; the text path is a
/// case-folded comparison with a case-sensitive tiebreak.
pub fn compare_cells_missing(
    a: &CellValue,
    b: &CellValue,
    numeric: bool,
    missing_sign: Ordering,
) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => missing_sign,
        (false, true) => missing_sign.reverse(),
        (false, false) if numeric => {
            let (x, y) = (a.as_number(), b.as_number());
            match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            }
        }
        (false, false) => compare_text(&a.as_text(), &b.as_text()),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    if folded != Ordering::Equal {
        folded
    } else {
        a.cmp(b)
    }
}

/// Resolve sort keys to `(schema index, direction)` pairs in priority order.
/// Keys naming columns outside the schema are skipped.
fn coded_keys(sort_keys: &[SortKey], columns: &[Column]) -> Vec<(usize, SortDirection)> {
    sort_keys
        .iter()
        .filter_map(|key| {
            columns
                .iter()
                .position(|c| c.key == key.column)
                .map(|index| (index, key.direction))
        })
        .collect()
}

fn cmp_rows(
    a: &Row,
    b: &Row,
    coded: &[(usize, SortDirection)],
    columns: &[Column],
) -> Ordering {
    for &(index, direction) in coded {
        let column = &columns[index];
        let ordering = compare_cells(a.get(&column.key), b.get(&column.key), column.numeric);
        let ordering = if direction.is_descending() {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Build the view-order index over the accepted rows of a filter pass.
///
/// Returns `None` to signal identity order (no sort, no grouping, and the
/// pass removed zero rows), letting large unfiltered unsorted tables skip
/// the indirection entirely. Otherwise returns accepted model indices in
/// view order; the pass itself is never mutated, so memoized passes can be
/// shared across renders.
///
/// With `grouping_columns = k > 0`, rows are first stable-sorted by the
/// leading k schema columns ascending (independent of the user sort spec),
/// partitioned into runs of equal group values, and the groups and the rows
/// within each group are then independently stable-sorted by the full sort
/// spec. Grouped rows stay contiguous regardless of the user's sort choice.
pub fn build_ordered_index(
    pass: &FilterPass,
    rows: &[Row],
    columns: &[Column],
    sort_keys: &[SortKey],
    grouping_columns: usize,
) -> Option<Vec<usize>> {
    let coded = coded_keys(sort_keys, columns);
    if coded.is_empty() && grouping_columns == 0 && pass.is_complete() {
        return None;
    }

    let mut order = pass.accepted.clone();
    if grouping_columns == 0 {
        order.sort_by(|&a, &b| cmp_rows(&rows[a], &rows[b], &coded, columns));
        return Some(order);
    }

    // Grouping always uses ascending priority over the leading schema
    // columns, regardless of the user sort spec.
    let group_coded: Vec<(usize, SortDirection)> = (0..grouping_columns.min(columns.len()))
        .map(|index| (index, SortDirection::Ascending))
        .collect();
    order.sort_by(|&a, &b| cmp_rows(&rows[a], &rows[b], &group_coded, columns));

    let mut groups: Vec<Vec<usize>> = Vec::new();
    for index in order {
        let same_group = groups.last().is_some_and(|group| {
            let head = group[0];
            group_coded
                .iter()
                .all(|&(ci, _)| rows[head].get(&columns[ci].key) == rows[index].get(&columns[ci].key))
        });
        match groups.last_mut() {
            Some(group) if same_group => group.push(index),
            _ => groups.push(vec![index]),
        }
    }

    // Inter-group order by each group's first row, intra-group order per
    // group, both by the full sort spec.
    groups.sort_by(|a, b| cmp_rows(&rows[a[0]], &rows[b[0]], &coded, columns));
    let mut result = Vec::with_capacity(pass.accepted.len());
    for mut group in groups {
        group.sort_by(|&a, &b| cmp_rows(&rows[a], &rows[b], &coded, columns));
        result.extend(group);
    }
    Some(result)
}
