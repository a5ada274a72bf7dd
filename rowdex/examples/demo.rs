use simplelog::{Config, LevelFilter, SimpleLogger};

use rowdex::{CellValue, Column, Row, RowIndexer, SortPreferences, SortUpdate};

fn main() {
    SimpleLogger::init(LevelFilter::Warn, Config::default()).expect("Failed to initialize logger");

    let columns = vec![
        Column::new("element"),
        Column::new("group"),
        Column::new("mass").numeric(),
    ];
    let rows = vec![
        row("Helium", "noble gas", 4.0026),
        row("Neon", "noble gas", 20.180),
        row("Lithium", "alkali metal", 6.94),
        row("Sodium", "alkali metal", 22.990),
        row("Argon", "noble gas", 39.948),
        row("Potassium", "alkali metal", 39.098),
    ];

    let mut indexer = RowIndexer::new(SortPreferences {
        three_state: true,
        single_column_by_default: true,
    });

    println!("== unsorted ==");
    print_view(&indexer, &columns, &rows);

    // Click the mass header: ascending numeric sort.
    indexer.update_sorting("mass", SortUpdate::Simple);
    println!("\n== sorted by mass ==");
    print_view(&indexer, &columns, &rows);

    // Restrict the group column to noble gases.
    indexer
        .set_filter_user_params("group", Some(vec![CellValue::from("noble gas")]))
        .expect("column key is present");
    println!("\n== noble gases only ==");
    print_view(&indexer, &columns, &rows);

    // Show the filter editor's view of the group column.
    indexer
        .set_filter_user_params("group", None)
        .expect("column key is present");
    let pass = indexer
        .pre_filter(&columns, &rows, None)
        .expect("non-empty dataset");
    let stats = pass.stats.get("group").expect("group collects stats");
    println!("\n== group values ==");
    for value in stats.distinct_seen() {
        println!(
            "{:<14} {} of {} rows kept",
            value.as_text(),
            stats.kept_count(value),
            stats.seen_count(value)
        );
    }
}

fn row(element: &str, group: &str, mass: f64) -> Row {
    Row::new()
        .cell("element", element)
        .cell("group", group)
        .cell("mass", mass)
}

fn print_view(indexer: &RowIndexer, columns: &[Column], rows: &[Row]) {
    let view = indexer.view(columns, rows, None, None);
    for i in 0..view.len() {
        let row = view.row(i);
        println!(
            "{:<12} {:<14} {:>8}",
            row.get("element").as_text(),
            row.get("group").as_text(),
            row.get("mass").as_text()
        );
    }
}
