//! Filter engine.

use log::trace;

use crate::column::Capability;
use crate::column::ColumnDescriptor;
use crate::column::ColumnRegistry;
use crate::column::FilterKind;
use crate::error::GridError;
use crate::error::Result;
use crate::model::GridRow;
use crate::model::Value;
use crate::state::ColumnFilter;
use crate::state::FilterState;

/// Checks that a column filter can be evaluated against the registry.
///
/// The column must exist and be filterable, the filter variant must match
/// the column's [`FilterKind`], and custom filters need a predicate on the
/// column.
pub fn validate_column_filter(
    registry: &ColumnRegistry,
    key: &str,
    filter: &ColumnFilter,
) -> Result<()> {
    let column = registry.require(key, Capability::Filter)?;
    let matches_kind = matches!(
        (filter, column.filter_kind),
        (ColumnFilter::Text(_), FilterKind::TextSubstring)
            | (ColumnFilter::Values(_), FilterKind::SetMembership)
            | (ColumnFilter::Custom(_), FilterKind::Custom)
    );
    if !matches_kind {
        return Err(GridError::FilterKindMismatch {
            column: key.to_string(),
            kind: column.filter_kind,
        });
    }
    if matches!(filter, ColumnFilter::Custom(_)) && column.predicate.is_none() {
        return Err(GridError::MissingPredicate(key.to_string()));
    }
    Ok(())
}

/// Keeps the rows that pass the global filter and every column filter.
///
/// - Global: non-empty text must appear, case-insensitively, in the text of
///   at least one filterable column.
/// - Column: every active column filter must accept the row's value.
///
/// Input order is preserved. Fails before looking at any row if a column
/// filter is invalid for the registry (see [`validate_column_filter`]).
/// Panics from custom predicates propagate to the caller.
///
/// # Example
///
/// ```
/// use erpgrid_lib::engine::apply_filters;
/// use erpgrid_lib::state::FilterState;
/// use erpgrid_lib::{ColumnDescriptor, ColumnRegistry, Row};
///
/// let registry = ColumnRegistry::new(vec![
///     ColumnDescriptor::new("client", "Client").filterable(),
/// ]).unwrap();
/// let rows = vec![
///     Row::new("1").set("client", "JAIPUR SYNTEX LIMITED"),
///     Row::new("2").set("client", "C.M. TEXTILES PVT. LTD."),
/// ];
///
/// let filters = FilterState::new().with_global("syn");
/// let kept = apply_filters(&rows, &filters, &registry).unwrap();
/// assert_eq!(kept.len(), 1);
/// ```
pub fn apply_filters<'a, R, I>(
    rows: I,
    filters: &FilterState,
    registry: &ColumnRegistry,
) -> Result<Vec<&'a R>>
where
    R: GridRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let active = active_column_filters(filters, registry)?;
    let global = filters.global().to_lowercase();
    let searchable: Vec<&str> = registry
        .iter()
        .filter(|c| c.filterable)
        .map(|c| c.key.as_str())
        .collect();

    let kept: Vec<&'a R> = rows
        .into_iter()
        .filter(|row| {
            passes_global(*row, &global, &searchable)
                && active
                    .iter()
                    .all(|(column, filter)| passes_column(column, filter, row.value(&column.key)))
        })
        .collect();

    trace!(
        "Filtered to {} rows (global: {:?}, {} column filters)",
        kept.len(),
        filters.global(),
        active.len()
    );
    Ok(kept)
}

/// Returns the distinct values of a column in first-appearance order.
///
/// Used to offer choices for set-membership filters.
pub fn distinct_values<'a, R, I>(rows: I, key: &str) -> Vec<Value>
where
    R: GridRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut values: Vec<Value> = Vec::new();
    for row in rows {
        let value = row.value(key);
        if !values.iter().any(|v| v.matches(value)) {
            values.push(value.clone());
        }
    }
    values
}

fn active_column_filters<'r>(
    filters: &'r FilterState,
    registry: &'r ColumnRegistry,
) -> Result<Vec<(&'r ColumnDescriptor, &'r ColumnFilter)>> {
    let mut active = Vec::new();
    for (key, filter) in filters.columns() {
        validate_column_filter(registry, key, filter)?;
        if !filter.is_unrestricted() {
            active.push((registry.get(key)?, filter));
        }
    }
    Ok(active)
}

fn passes_global<R: GridRow>(row: &R, global: &str, searchable: &[&str]) -> bool {
    global.is_empty()
        || searchable
            .iter()
            .any(|key| row.value(key).contains_lowercase(global))
}

fn passes_column(column: &ColumnDescriptor, filter: &ColumnFilter, value: &Value) -> bool {
    match filter {
        ColumnFilter::Text(text) => value.contains_lowercase(&text.to_lowercase()),
        ColumnFilter::Values(accepted) => {
            accepted.is_empty() || accepted.iter().any(|a| a.matches(value))
        }
        ColumnFilter::Custom(argument) => column
            .predicate
            .as_ref()
            .is_some_and(|predicate| predicate.test(value, argument)),
    }
}
