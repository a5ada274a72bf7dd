//! The stateful keyed-columns row indexer.

use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::column::Column;
use crate::error::{IndexError, SortDelegateError};
use crate::filter::{pre_filter, ColumnFilter, FilterPass};
use crate::order::build_ordered_index;
use crate::row::{Row, RowPredicate};
use crate::sort::{SortKey, SortPreferences, SortState, SortUpdate};
use crate::value::CellValue;
use crate::view::RowView;

/// Host-supplied ordering escape hatch. Called with the primary sort column
/// key (or `None` when no sort is active), whether it is descending, and
/// whether it is numeric; an `Ok` result is used verbatim as the ordered
/// index when a sort is active.
pub type SortDelegate<'a> =
    &'a dyn Fn(Option<&str>, bool, bool) -> Result<Vec<usize>, SortDelegateError>;

/// How strongly a column is currently filtered, for header icon painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterIntensity {
    /// No filter entry, or an entry with no effect on acceptance.
    None,
    /// Only caller-seeded option values; acceptance is not restricted.
    Outer,
    /// An end-user allow-list is actively restricting rows.
    User,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FilterField {
    User,
    Outer,
}

struct CachedPass {
    filter_version: u64,
    rows_addr: usize,
    rows_len: usize,
    columns_fingerprint: u64,
    pass: Option<Rc<FilterPass>>,
}

fn columns_fingerprint(columns: &[Column]) -> u64 {
    let mut hasher = DefaultHasher::new();
    columns.hash(&mut hasher);
    hasher.finish()
}

/// Stateful owner of the sort specification, the column filter registry, the
/// stored row predicate and the grouping configuration for one table
/// instance.
///
/// Every mutation entry point returns whether anything changed and bumps the
/// `version` counter exactly once on success; filter-affecting mutations also
/// advance `filter_version`, which keys the memoized filter pass so that
/// sort-only changes never invalidate it. Two calls observing the same
/// version are cache-equivalent.
///
/// One logical owner at a time; the instance is synchronous, does no I/O,
/// and is deliberately not `Sync` (the pass cache uses interior mutability).
///
/// # Example
///
/// ```
/// use rowdex::{Column, Row, RowIndexer, SortUpdate};
///
/// let columns = vec![Column::new("k"), Column::new("v").numeric()];
/// let rows = vec![
///     Row::new().cell("k", "b").cell("v", 1),
///     Row::new().cell("k", "a").cell("v", 2),
/// ];
///
/// let mut indexer = RowIndexer::default();
/// indexer.update_sorting("k", SortUpdate::Simple);
/// let view = indexer.view(&columns, &rows, None, None);
/// assert_eq!(view.row(0).get("k").as_text(), "a");
/// ```
pub struct RowIndexer {
    sort: SortState,
    filters: HashMap<String, ColumnFilter>,
    row_filter: Option<RowPredicate>,
    grouping_columns: usize,
    version: u64,
    filter_version: u64,
    cache: RefCell<Option<CachedPass>>,
}

impl Default for RowIndexer {
    fn default() -> Self {
        Self::new(SortPreferences::default())
    }
}

impl fmt::Debug for RowIndexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowIndexer")
            .field("sort", &self.sort)
            .field("filters", &self.filters)
            .field("has_row_filter", &self.row_filter.is_some())
            .field("grouping_columns", &self.grouping_columns)
            .field("version", &self.version)
            .field("filter_version", &self.filter_version)
            .finish()
    }
}

impl RowIndexer {
    pub fn new(preferences: SortPreferences) -> Self {
        Self {
            sort: SortState::new(preferences),
            filters: HashMap::new(),
            row_filter: None,
            grouping_columns: 0,
            version: 0,
            filter_version: 0,
            cache: RefCell::new(None),
        }
    }

    // ------------------------------------------------------------------
    // Versioning
    // ------------------------------------------------------------------

    /// Monotonic counter bumped on every state mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Version at the last filter-affecting mutation; keys the memoized
    /// filter pass independently of sort-only changes.
    pub fn filter_version(&self) -> u64 {
        self.filter_version
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    fn bump_filter(&mut self) {
        self.version += 1;
        self.filter_version = self.version;
    }

    // ------------------------------------------------------------------
    // Mutation entry points
    // ------------------------------------------------------------------

    /// Apply one sort interaction. Returns true iff the sort spec changed.
    pub fn update_sorting(&mut self, column: &str, mode: SortUpdate) -> bool {
        let changed = self.sort.update(column, mode);
        if changed {
            self.bump();
        }
        changed
    }

    /// Replace the end-user allow-list of a column; `None` clears it.
    ///
    /// An empty column key with non-null parameters is a programming error
    /// and fails loudly rather than registering an empty-key entry.
    pub fn set_filter_user_params(
        &mut self,
        column: &str,
        params: Option<Vec<CellValue>>,
    ) -> Result<bool, IndexError> {
        self.set_filter_field(column, params, FilterField::User)
    }

    /// Replace the caller-seeded option values of a column; `None` clears
    /// them. Outer parameters never gate acceptance on their own.
    pub fn set_filter_outer_params(
        &mut self,
        column: &str,
        params: Option<Vec<CellValue>>,
    ) -> Result<bool, IndexError> {
        self.set_filter_field(column, params, FilterField::Outer)
    }

    fn set_filter_field(
        &mut self,
        column: &str,
        params: Option<Vec<CellValue>>,
        field: FilterField,
    ) -> Result<bool, IndexError> {
        if column.is_empty() {
            if params.is_some() {
                return Err(IndexError::MissingColumnKey);
            }
            return Ok(false);
        }
        let entry = self.filters.entry(column.to_string()).or_default();
        let slot = match field {
            FilterField::User => &mut entry.user_params,
            FilterField::Outer => &mut entry.outer_params,
        };
        if *slot == params {
            // The lookup may have inserted a default entry; never retain
            // empty entries in the registry.
            if entry.is_empty() {
                self.filters.remove(column);
            }
            return Ok(false);
        }
        *slot = params;
        if entry.is_empty() {
            self.filters.remove(column);
        }
        self.bump_filter();
        Ok(true)
    }

    /// Replace the stored free-form row predicate; `None` clears it.
    /// Setting a predicate always counts as a change (closures are opaque),
    /// clearing an absent one does not.
    pub fn update_row_filtering(&mut self, predicate: Option<RowPredicate>) -> bool {
        if predicate.is_none() && self.row_filter.is_none() {
            return false;
        }
        self.row_filter = predicate;
        self.bump_filter();
        true
    }

    /// Set how many leading schema columns group the view.
    pub fn update_grouping(&mut self, count: usize) -> bool {
        if self.grouping_columns == count {
            return false;
        }
        self.grouping_columns = count;
        self.bump();
        true
    }

    /// Replace the sort preference flags.
    pub fn update_preferences(&mut self, preferences: SortPreferences) -> bool {
        let changed = self.sort.set_preferences(preferences);
        if changed {
            self.bump();
        }
        changed
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    pub fn sorting(&self) -> &[SortKey] {
        self.sort.keys()
    }

    /// Signed priority rank of a column in the current sort spec.
    pub fn signed_rank(&self, column: &str) -> i32 {
        self.sort.signed_rank(column)
    }

    /// Coded rank of the primary sort column against the schema.
    pub fn highest_coded_column(&self, columns: &[Column]) -> i32 {
        self.sort.highest_coded_column(columns)
    }

    pub fn grouping_columns(&self) -> usize {
        self.grouping_columns
    }

    pub fn preferences(&self) -> SortPreferences {
        self.sort.preferences()
    }

    /// The filter entry of a column, if one is registered.
    pub fn filter(&self, column: &str) -> Option<&ColumnFilter> {
        self.filters.get(column)
    }

    /// Registered filter entries, for host-side persistence of UI state.
    pub fn filters(&self) -> &HashMap<String, ColumnFilter> {
        &self.filters
    }

    /// Filter strength of a column, for header icon painting.
    pub fn filter_intensity(&self, column: &str) -> FilterIntensity {
        match self.filters.get(column) {
            Some(f) if f.user_params.as_deref().is_some_and(|p| !p.is_empty()) => {
                FilterIntensity::User
            }
            Some(f) if f.outer_params.is_some() => FilterIntensity::Outer,
            _ => FilterIntensity::None,
        }
    }

    // ------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------

    /// Memoized filter/statistics pass.
    ///
    /// The cache is content-addressed on (columns fingerprint, rows
    /// identity, `filter_version`); sort-only mutations keep it valid.
    /// Callers that change the `external` predicate must signal it through
    /// [`RowIndexer::update_row_filtering`] (or any filter-affecting
    /// mutation), mirroring how hosts drive re-renders off the version
    /// counters.
    pub fn pre_filter(
        &self,
        columns: &[Column],
        rows: &[Row],
        external: Option<&dyn Fn(&Row) -> bool>,
    ) -> Option<Rc<FilterPass>> {
        let fingerprint = columns_fingerprint(columns);
        let rows_addr = rows.as_ptr() as usize;
        {
            let cache = self.cache.borrow();
            if let Some(cached) = cache.as_ref() {
                if cached.filter_version == self.filter_version
                    && cached.rows_addr == rows_addr
                    && cached.rows_len == rows.len()
                    && cached.columns_fingerprint == fingerprint
                {
                    return cached.pass.clone();
                }
            }
        }

        let pass = pre_filter(
            columns,
            rows,
            &self.filters,
            external,
            self.row_filter.as_deref(),
        )
        .map(Rc::new);

        *self.cache.borrow_mut() = Some(CachedPass {
            filter_version: self.filter_version,
            rows_addr,
            rows_len: rows.len(),
            columns_fingerprint: fingerprint,
            pass: pass.clone(),
        });
        pass
    }

    /// Filter then order: the full pipeline up to the ordered index.
    /// `None` means identity order (or nothing to display when the input
    /// was empty).
    pub fn ordered_index(
        &self,
        columns: &[Column],
        rows: &[Row],
        external: Option<&dyn Fn(&Row) -> bool>,
    ) -> Option<Vec<usize>> {
        let pass = self.pre_filter(columns, rows, external)?;
        build_ordered_index(
            &pass,
            rows,
            columns,
            self.sort.keys(),
            self.grouping_columns,
        )
    }

    /// Run the full pipeline and wrap the result into a view-index accessor.
    ///
    /// A `delegate`, when supplied and a sort is active, replaces the
    /// built-in comparator and grouping entirely: its `Ok` order is used
    /// verbatim. Delegates are probed even with no active sort; a delegate
    /// error is caught and logged, and the view degrades to unsorted
    /// identity order over the filtered rows.
    pub fn view<'a>(
        &self,
        columns: &[Column],
        rows: &'a [Row],
        external: Option<&dyn Fn(&Row) -> bool>,
        delegate: Option<SortDelegate<'_>>,
    ) -> RowView<'a> {
        let Some(pass) = self.pre_filter(columns, rows, external) else {
            // Empty rows or columns: nothing to display.
            return RowView::new(rows, Some(Vec::new()));
        };

        if let Some(delegate) = delegate {
            let primary = self.sort.primary();
            let result = match primary {
                Some(key) => {
                    let numeric = columns
                        .iter()
                        .find(|c| c.key == key.column)
                        .is_some_and(|c| c.numeric);
                    delegate(
                        Some(key.column.as_str()),
                        key.direction.is_descending(),
                        numeric,
                    )
                }
                None => delegate(None, false, false),
            };
            match result {
                Ok(order) if primary.is_some() => return RowView::new(rows, Some(order)),
                Ok(_) => {}
                Err(err) => {
                    log::warn!("external sort delegate failed, using identity order: {err}");
                    let order = if pass.is_complete() {
                        None
                    } else {
                        Some(pass.accepted.clone())
                    };
                    return RowView::new(rows, order);
                }
            }
        }

        let order = build_ordered_index(
            &pass,
            rows,
            columns,
            self.sort.keys(),
            self.grouping_columns,
        );
        RowView::new(rows, order)
    }
}
