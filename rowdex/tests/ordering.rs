use std::cmp::Ordering;
use std::collections::HashMap;

use rowdex::{
    build_ordered_index, compare_cells, pre_filter, CellValue, Column, Row, SortKey,
};

fn pass_for(columns: &[Column], rows: &[Row]) -> rowdex::FilterPass {
    pre_filter(columns, rows, &HashMap::new(), None, None).unwrap()
}

// ============================================================================
// Cell comparison
// ============================================================================

#[test]
fn test_missing_sorts_first() {
    let a = CellValue::Missing;
    let b = CellValue::from("x");
    assert_eq!(compare_cells(&a, &b, false), Ordering::Less);
    assert_eq!(compare_cells(&b, &a, false), Ordering::Greater);
    assert_eq!(compare_cells(&a, &CellValue::Missing, false), Ordering::Equal);
}

#[test]
fn test_nan_sorts_after_numbers() {
    let nan = CellValue::from("not a number");
    let one = CellValue::from(1);
    assert_eq!(compare_cells(&nan, &one, true), Ordering::Greater);
    assert_eq!(compare_cells(&one, &nan, true), Ordering::Less);
    assert_eq!(compare_cells(&nan, &nan.clone(), true), Ordering::Equal);
}

#[test]
fn test_text_comparison_folds_case() {
    let upper = CellValue::from("Apple");
    let lower = CellValue::from("apple");
    let banana = CellValue::from("banana");
    assert_eq!(compare_cells(&upper, &banana, false), Ordering::Less);
    // Case-folded equal, case-sensitive tiebreak.
    assert_eq!(compare_cells(&upper, &lower, false), Ordering::Less);
}

#[test]
fn test_numeric_comparison_coerces_text() {
    let ten = CellValue::from("10");
    let two = CellValue::from(2);
    assert_eq!(compare_cells(&ten, &two, true), Ordering::Greater);
    // As text, "10" sorts before "2".
    assert_eq!(compare_cells(&ten, &CellValue::from("2"), false), Ordering::Less);
}

// ============================================================================
// Ordered index
// ============================================================================

#[test]
fn test_identity_shortcut_when_nothing_to_do() {
    let columns = vec![Column::new("k")];
    let rows = vec![Row::new().cell("k", "b"), Row::new().cell("k", "a")];
    let pass = pass_for(&columns, &rows);
    assert_eq!(build_ordered_index(&pass, &rows, &columns, &[], 0), None);
}

#[test]
fn test_filtered_pass_forces_indirection() {
    let columns = vec![Column::new("k")];
    let rows = vec![Row::new().cell("k", "b"), Row::new().cell("k", "a")];
    let mut filters = HashMap::new();
    filters.insert(
        "k".to_string(),
        rowdex::ColumnFilter {
            user_params: Some(vec![CellValue::from("a")]),
            outer_params: None,
        },
    );
    let pass = pre_filter(&columns, &rows, &filters, None, None).unwrap();
    assert_eq!(
        build_ordered_index(&pass, &rows, &columns, &[], 0),
        Some(vec![1])
    );
}

#[test]
fn test_stable_single_key_sort() {
    // Equal 'a' rows must keep their original relative order.
    let columns = vec![Column::new("k"), Column::new("v").numeric()];
    let rows = vec![
        Row::new().cell("k", "b").cell("v", 1),
        Row::new().cell("k", "a").cell("v", 2),
        Row::new().cell("k", "a").cell("v", 1),
    ];
    let pass = pass_for(&columns, &rows);
    let order = build_ordered_index(&pass, &rows, &columns, &[SortKey::asc("k")], 0).unwrap();
    assert_eq!(order, vec![1, 2, 0]);
}

#[test]
fn test_multi_key_priority() {
    let columns = vec![Column::new("k"), Column::new("v").numeric()];
    let rows = vec![
        Row::new().cell("k", "b").cell("v", 1),
        Row::new().cell("k", "a").cell("v", 2),
        Row::new().cell("k", "a").cell("v", 1),
    ];
    let pass = pass_for(&columns, &rows);
    let keys = [SortKey::asc("k"), SortKey::asc("v")];
    let order = build_ordered_index(&pass, &rows, &columns, &keys, 0).unwrap();
    assert_eq!(order, vec![2, 1, 0]);
}

#[test]
fn test_descending_reverses_comparison() {
    let columns = vec![Column::new("v").numeric()];
    let rows = vec![
        Row::new().cell("v", 1),
        Row::new().cell("v", 3),
        Row::new().cell("v", 2),
    ];
    let pass = pass_for(&columns, &rows);
    let order = build_ordered_index(&pass, &rows, &columns, &[SortKey::desc("v")], 0).unwrap();
    assert_eq!(order, vec![1, 2, 0]);
}

#[test]
fn test_numeric_sort_places_missing_first_and_nan_last() {
    let columns = vec![Column::new("v").numeric()];
    let rows = vec![
        Row::new().cell("v", 5),
        Row::new().cell("v", "garbage"),
        Row::new(),
        Row::new().cell("v", 1),
    ];
    let pass = pass_for(&columns, &rows);
    let order = build_ordered_index(&pass, &rows, &columns, &[SortKey::asc("v")], 0).unwrap();
    assert_eq!(order, vec![2, 3, 0, 1]);
}

#[test]
fn test_unknown_sort_column_degrades_to_identity() {
    let columns = vec![Column::new("k")];
    let rows = vec![Row::new().cell("k", "b"), Row::new().cell("k", "a")];
    let pass = pass_for(&columns, &rows);
    let order = build_ordered_index(&pass, &rows, &columns, &[SortKey::asc("ghost")], 0);
    assert_eq!(order, None);
}

#[test]
fn test_pass_is_never_mutated() {
    let columns = vec![Column::new("k")];
    let rows = vec![Row::new().cell("k", "b"), Row::new().cell("k", "a")];
    let pass = pass_for(&columns, &rows);
    let snapshot = pass.clone();
    build_ordered_index(&pass, &rows, &columns, &[SortKey::asc("k")], 0).unwrap();
    assert_eq!(pass, snapshot);
}

// ============================================================================
// Grouping
// ============================================================================

fn grouped_rows() -> (Vec<Column>, Vec<Row>) {
    let columns = vec![Column::new("team"), Column::new("score").numeric()];
    let rows = vec![
        Row::new().cell("team", "red").cell("score", 7),
        Row::new().cell("team", "blue").cell("score", 9),
        Row::new().cell("team", "red").cell("score", 2),
        Row::new().cell("team", "blue").cell("score", 4),
        Row::new().cell("team", "red").cell("score", 9),
    ];
    (columns, rows)
}

#[test]
fn test_grouping_keeps_groups_contiguous() {
    let (columns, rows) = grouped_rows();
    let pass = pass_for(&columns, &rows);
    // Sorting by score would interleave the teams without grouping.
    let keys = [SortKey::desc("score")];
    let order = build_ordered_index(&pass, &rows, &columns, &keys, 1).unwrap();

    let teams: Vec<String> = order
        .iter()
        .map(|&i| rows[i].get("team").as_text().into_owned())
        .collect();
    let mut boundaries = 0;
    for pair in teams.windows(2) {
        if pair[0] != pair[1] {
            boundaries += 1;
        }
    }
    assert_eq!(boundaries, 1, "each team must form one contiguous run");
}

#[test]
fn test_grouping_orders_groups_and_rows_by_sort_spec() {
    let (columns, rows) = grouped_rows();
    let pass = pass_for(&columns, &rows);
    let keys = [SortKey::desc("score")];
    let order = build_ordered_index(&pass, &rows, &columns, &keys, 1).unwrap();

    // Inter-group order compares each group's first row under the sort
    // spec: blue's head scores 9, red's head 7, so blue leads. Rows inside
    // each group follow the spec independently.
    assert_eq!(order, vec![1, 3, 4, 0, 2]);
}

#[test]
fn test_grouping_without_sort_spec_sorts_by_group_columns() {
    let (columns, rows) = grouped_rows();
    let pass = pass_for(&columns, &rows);
    let order = build_ordered_index(&pass, &rows, &columns, &[], 1).unwrap();
    // Ascending schema-order grouping, stable within each group.
    assert_eq!(order, vec![1, 3, 0, 2, 4]);
}

#[test]
fn test_grouping_count_clamps_to_schema_width() {
    let (columns, rows) = grouped_rows();
    let pass = pass_for(&columns, &rows);
    let order = build_ordered_index(&pass, &rows, &columns, &[], 10).unwrap();
    assert_eq!(order.len(), rows.len());
}
