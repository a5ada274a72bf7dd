pub mod column;
pub mod error;
pub mod filter;
pub mod indexer;
pub mod order;
pub mod row;
pub mod sort;
pub mod stats;
pub mod value;
pub mod view;

pub use column::{column_index, Column};
pub use error::{IndexError, SortDelegateError};
pub use filter::{filter_options, pre_filter, ColumnFilter, FilterPass};
pub use indexer::{FilterIntensity, RowIndexer, SortDelegate};
pub use order::{build_ordered_index, compare_cells, compare_cells_missing};
pub use row::{Row, RowPredicate};
pub use sort::{
    decode_coded_column, SortDirection, SortKey, SortPreferences, SortState, SortUpdate,
};
pub use stats::{ColumnStats, StatKind};
pub use value::CellValue;
pub use view::RowView;
