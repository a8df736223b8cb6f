//! Grid facade: one table's state and its view derivation.

use log::debug;

use crate::column::Capability;
use crate::column::ColumnOrder;
use crate::column::ColumnRegistry;
use crate::config::GridConfig;
use crate::config::PaginationMode;
use crate::engine;
use crate::error::GridError;
use crate::error::Result;
use crate::model::GridRow;
use crate::model::Value;
use crate::state::ColumnFilter;
use crate::state::Direction;
use crate::state::FilterState;
use crate::state::GroupingState;
use crate::state::PaginationState;
use crate::state::SortState;
use crate::view::FetchRequest;
use crate::view::GridSnapshot;
use crate::view::GridView;
use crate::view::PageInfo;
use crate::view::SnapshotColumn;
use crate::view::SnapshotRow;

/// State and processing for one table.
///
/// `Grid<R>` owns:
/// - the column registry and the column order controller
/// - the rows (all of them in client mode, the current page in server mode)
/// - filter, sort and pagination state
///
/// Every state change goes through a method here; [`Grid::view`] re-runs
/// filter, sort, grouping and pagination from scratch on each call.
///
/// # Example
///
/// ```
/// use erpgrid_lib::state::Direction;
/// use erpgrid_lib::{ColumnDescriptor, ColumnRegistry, Grid, GridConfig, Row};
///
/// let registry = ColumnRegistry::new(vec![
///     ColumnDescriptor::new("id", "ID"),
///     ColumnDescriptor::new("name", "Name").sortable().filterable(),
/// ])?;
///
/// let mut grid = Grid::with_rows(registry, GridConfig::default(), vec![
///     Row::new("1").set("name", "Beta"),
///     Row::new("2").set("name", "Alpha"),
/// ])?;
///
/// grid.sort_by("name", Direction::Asc)?;
/// assert_eq!(grid.view()?.row_ids(), vec!["2", "1"]);
/// # Ok::<(), erpgrid_lib::GridError>(())
/// ```
#[derive(Debug)]
pub struct Grid<R> {
    config: GridConfig,
    columns: ColumnOrder,
    rows: Vec<R>,
    filters: FilterState,
    sort: SortState,
    pagination: PaginationState,
}

impl<R: GridRow> Grid<R> {
    /// Creates an empty grid.
    ///
    /// Fails with [`GridError::InvalidPageSize`] if the configured page size
    /// is zero.
    pub fn new(registry: ColumnRegistry, config: GridConfig) -> Result<Self> {
        let pagination = PaginationState::new(config.page_size)?;
        Ok(Self {
            columns: ColumnOrder::new(&registry),
            config,
            rows: Vec::new(),
            filters: FilterState::new(),
            sort: SortState::new(),
            pagination,
        })
    }

    /// Creates a client-paginated grid holding the given rows.
    pub fn with_rows(registry: ColumnRegistry, config: GridConfig, rows: Vec<R>) -> Result<Self> {
        let mut grid = Self::new(registry, config)?;
        grid.set_rows(rows)?;
        Ok(grid)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The grid configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The column registry.
    pub fn registry(&self) -> &ColumnRegistry {
        self.columns.registry()
    }

    /// The column order controller.
    pub fn column_order(&self) -> &ColumnOrder {
        &self.columns
    }

    /// The rows as supplied, unprocessed.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Current filter state.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Current sort state.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Current grouping state.
    pub fn grouping(&self) -> &GroupingState {
        self.columns.grouping()
    }

    /// Current pagination state.
    ///
    /// In client mode `total_count` is refreshed by the page navigation
    /// methods; [`Grid::view`] always reports a fresh count.
    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Replaces all rows of a client-paginated grid.
    ///
    /// The page index is kept; [`Grid::view`] reports
    /// [`GridError::PageOutOfRange`] if the page no longer exists.
    pub fn set_rows(&mut self, rows: Vec<R>) -> Result<()> {
        self.require_mode(PaginationMode::Client)?;
        debug!("Grid rows replaced ({} rows)", rows.len());
        self.rows = rows;
        Ok(())
    }

    /// Installs a page fetched by the host in a server-paginated grid.
    ///
    /// `rows` is the page itself and is never sliced further.
    pub fn supply_page(&mut self, rows: Vec<R>, total_count: usize) -> Result<()> {
        self.require_mode(PaginationMode::Server)?;
        debug!(
            "Page {} supplied ({} rows, {} total)",
            self.pagination.page_index(),
            rows.len(),
            total_count
        );
        self.rows = rows;
        self.pagination.set_total_count(total_count);
        Ok(())
    }

    /// What the host should fetch for the current page of a
    /// server-paginated grid.
    pub fn fetch_request(&self) -> Result<FetchRequest> {
        self.require_mode(PaginationMode::Server)?;
        Ok(FetchRequest {
            offset: self.pagination.offset(),
            limit: self.pagination.limit(),
            filters: self.filters.clone(),
            sort: self.sort.clone(),
        })
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Sets the global filter text. Empty text clears it.
    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.filters.set_global(text);
        debug!("Global filter set to {:?}", self.filters.global());
        self.state_changed();
    }

    /// Sets the filter of one column.
    ///
    /// The column must be filterable; custom filters need a predicate.
    pub fn set_column_filter(&mut self, key: &str, filter: ColumnFilter) -> Result<()> {
        engine::validate_column_filter(self.registry(), key, &filter)?;
        debug!("Column filter on '{}' set to {:?}", key, filter);
        self.filters.set_column(key, filter);
        self.state_changed();
        Ok(())
    }

    /// Removes the filter of one column. Returns `true` if there was one.
    pub fn clear_column_filter(&mut self, key: &str) -> Result<bool> {
        self.registry().get(key)?;
        let removed = self.filters.remove_column(key).is_some();
        if removed {
            self.state_changed();
        }
        Ok(removed)
    }

    /// Clears the global filter and all column filters.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.state_changed();
    }

    /// Distinct values of a column across all rows, in first-appearance
    /// order. Feeds set-membership filter choices.
    pub fn distinct_values(&self, key: &str) -> Result<Vec<Value>> {
        self.registry().get(key)?;
        Ok(engine::distinct_values(&self.rows, key))
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Replaces the sort state. Every key must be a sortable column.
    pub fn set_sort(&mut self, sort: SortState) -> Result<()> {
        for (key, _) in sort.keys() {
            self.registry().require(key, Capability::Sort)?;
        }
        self.sort = sort;
        debug!("Sort set to {:?}", self.sort.keys());
        self.state_changed();
        Ok(())
    }

    /// Sorts by one column only.
    pub fn sort_by(&mut self, key: &str, direction: Direction) -> Result<()> {
        self.registry().require(key, Capability::Sort)?;
        self.sort.set_only(key, direction);
        debug!("Sort set to {:?}", self.sort.keys());
        self.state_changed();
        Ok(())
    }

    /// Adds a column to the sort, or updates its direction in place.
    pub fn add_sort(&mut self, key: &str, direction: Direction) -> Result<()> {
        self.registry().require(key, Capability::Sort)?;
        self.sort.set(key, direction);
        debug!("Sort set to {:?}", self.sort.keys());
        self.state_changed();
        Ok(())
    }

    /// Header-click toggle: ascending, descending, unsorted.
    ///
    /// Keeps other sorted columns when `multi_sort` is configured.
    /// Returns the column's new direction.
    pub fn toggle_sort(&mut self, key: &str) -> Result<Option<Direction>> {
        self.registry().require(key, Capability::Sort)?;
        let direction = self.sort.toggle(key, self.config.multi_sort);
        debug!("Sort set to {:?}", self.sort.keys());
        self.state_changed();
        Ok(direction)
    }

    /// Removes all sort keys.
    pub fn clear_sort(&mut self) {
        self.sort.clear();
        self.state_changed();
    }

    // =========================================================================
    // Columns and grouping
    // =========================================================================

    /// Replaces the column order. See [`ColumnOrder::reorder`].
    pub fn reorder_columns<S: AsRef<str>>(&mut self, order: &[S]) -> Result<()> {
        self.columns.reorder(order)
    }

    /// Moves one column among the displayed columns. See
    /// [`ColumnOrder::move_column`].
    pub fn move_column(&mut self, key: &str, position: usize) -> Result<()> {
        let was_grouped = self.columns.is_grouped(key);
        self.columns.move_column(key, position)?;
        if was_grouped {
            self.state_changed();
        }
        Ok(())
    }

    /// Moves a column into the grouping zone. Returns `false` if it was
    /// already grouped.
    pub fn group_by(&mut self, key: &str) -> Result<bool> {
        let added = self.columns.move_to_grouping_zone(key)?;
        if added {
            self.state_changed();
        }
        Ok(added)
    }

    /// Takes a column out of the grouping zone. Returns `false` if it was
    /// not grouped.
    pub fn ungroup(&mut self, key: &str) -> Result<bool> {
        let removed = self.columns.remove_from_grouping_zone(key)?;
        if removed {
            self.state_changed();
        }
        Ok(removed)
    }

    /// Restores declaration order and clears grouping.
    pub fn reset_columns(&mut self) {
        let had_grouping = !self.columns.grouping().is_empty();
        self.columns.reset();
        if had_grouping {
            self.state_changed();
        }
    }

    /// Switches to a new column registry.
    ///
    /// The column order is reconciled (see [`ColumnOrder::reconcile`]).
    /// Column filters that no longer validate against the new registry are
    /// dropped, as are sort keys on columns that are gone or no longer
    /// sortable.
    pub fn set_columns(&mut self, registry: ColumnRegistry) {
        self.columns.reconcile(&registry);
        self.filters.retain_columns(|key, filter| {
            engine::validate_column_filter(&registry, key, filter).is_ok()
        });
        self.sort
            .retain(|key| registry.get(key).is_ok_and(|c| c.has(Capability::Sort)));
        debug!("Grid columns replaced ({} columns)", registry.len());
        self.state_changed();
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Moves to a page.
    ///
    /// Fails with [`GridError::PageOutOfRange`] past the last page of the
    /// current filtered rows (client) or the supplied total (server).
    pub fn set_page_index(&mut self, page_index: usize) -> Result<()> {
        self.refresh_total()?;
        self.pagination.set_page_index(page_index)
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.pagination.set_page_size(page_size)
    }

    /// Moves to the next page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> Result<bool> {
        self.refresh_total()?;
        Ok(self.pagination.next_page())
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn previous_page(&mut self) -> Result<bool> {
        Ok(self.pagination.previous_page())
    }

    // =========================================================================
    // Processing
    // =========================================================================

    /// Rows after filtering and sorting.
    ///
    /// In server mode these are the supplied page rows as-is; the remote
    /// source has already filtered and sorted them.
    pub fn processed_rows(&self) -> Result<Vec<&R>> {
        match self.config.pagination {
            PaginationMode::Client => {
                let filtered = engine::apply_filters(&self.rows, &self.filters, self.registry())?;
                Ok(engine::apply_sort(filtered, &self.sort))
            }
            PaginationMode::Server => Ok(self.rows.iter().collect()),
        }
    }

    /// Derives the view model for the current page.
    pub fn view(&self) -> Result<GridView<'_, R>> {
        let processed = self.processed_rows()?;
        let page_size = self.pagination.page_size();
        let page_index = self.pagination.page_index();

        let (total_count, range) = match self.config.pagination {
            PaginationMode::Client => {
                let total = processed.len();
                (total, engine::page_range(total, page_index, page_size)?)
            }
            PaginationMode::Server => {
                self.pagination.validate()?;
                (self.pagination.total_count(), 0..processed.len())
            }
        };

        let grouped = engine::apply_grouping(processed, self.columns.grouping());
        let nodes = grouped.window(range).collect();

        let columns = self
            .columns
            .visible_keys()
            .map(|key| self.registry().get(key))
            .collect::<Result<Vec<_>>>()?;

        Ok(GridView {
            columns,
            nodes,
            grouping: self.columns.grouping().keys().to_vec(),
            page: PageInfo {
                page_index,
                page_size,
                page_count: crate::state::page_count(total_count, page_size),
                total_count,
            },
        })
    }

    /// Owned copy of every processed row for the displayed columns.
    pub fn snapshot(&self) -> Result<GridSnapshot> {
        let columns: Vec<SnapshotColumn> = self
            .columns
            .visible_keys()
            .map(|key| {
                self.registry().get(key).map(|c| SnapshotColumn {
                    key: c.key.clone(),
                    label: c.label.clone(),
                })
            })
            .collect::<Result<_>>()?;

        let rows = self
            .processed_rows()?
            .into_iter()
            .map(|row| SnapshotRow {
                id: row.id().to_string(),
                values: columns.iter().map(|c| row.value(&c.key).clone()).collect(),
            })
            .collect();

        Ok(GridSnapshot { columns, rows })
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn require_mode(&self, expected: PaginationMode) -> Result<()> {
        if self.config.pagination != expected {
            return Err(GridError::PaginationMode { expected });
        }
        Ok(())
    }

    fn refresh_total(&mut self) -> Result<()> {
        if self.config.pagination == PaginationMode::Client {
            let total = engine::apply_filters(&self.rows, &self.filters, self.registry())?.len();
            self.pagination.set_total_count(total);
        }
        Ok(())
    }

    fn state_changed(&mut self) {
        if self.config.reset_page_on_change {
            self.pagination.first_page();
        }
    }
}
