//! JSON fixtures: a table's columns, its rows and an optional grid config.
//!
//! ```json
//! {
//!   "config": { "pageSize": 5 },
//!   "columns": [{ "key": "clientName", "label": "Client", "filterable": true }],
//!   "rows": [{ "id": "SO-1", "clientName": "JAIPUR SYNTEX LIMITED" }]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use erpgrid_lib::ColumnDescriptor;
use erpgrid_lib::ColumnRegistry;
use erpgrid_lib::FilterKind;
use erpgrid_lib::GridConfig;
use erpgrid_lib::Row;
use erpgrid_lib::Value;
use log::debug;
use serde::Deserialize;

use crate::error::CliError;
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub config: GridConfig,
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub rows: Vec<FixtureRow>,
}

/// A row object: `id` plus one entry per column key.
#[derive(Debug, Deserialize)]
pub struct FixtureRow {
    pub id: String,
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let fixture: Fixture = serde_json::from_str(&text).map_err(|source| CliError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Loaded fixture {} ({} columns, {} rows)",
            path.display(),
            fixture.columns.len(),
            fixture.rows.len()
        );
        Ok(fixture)
    }

    /// Splits the fixture into what a grid is built from.
    ///
    /// Columns declared with the custom filter kind get the "at least"
    /// predicate: a row passes when its value is not null and sorts at or
    /// after the filter value.
    pub fn into_parts(self) -> Result<(ColumnRegistry, GridConfig, Vec<Row>)> {
        let columns = self
            .columns
            .into_iter()
            .map(|column| match column.filter_kind {
                FilterKind::Custom => column.custom_filter(at_least),
                _ => column,
            })
            .collect();
        let registry = ColumnRegistry::new(columns)?;
        let rows = self
            .rows
            .into_iter()
            .map(|row| Row::with_fields(row.id, row.fields))
            .collect();
        Ok((registry, self.config, rows))
    }
}

fn at_least(value: &Value, threshold: &Value) -> bool {
    !value.is_null() && value.compare(threshold).is_ge()
}

#[cfg(test)]
mod tests {
    use erpgrid_lib::GridRow;
    use erpgrid_lib::PaginationMode;

    use super::*;

    const FIXTURE: &str = r#"{
        "config": { "pagination": "server", "pageSize": 2 },
        "columns": [
            { "key": "orderNo", "label": "Order #", "sortable": true },
            { "key": "amount", "label": "Amount", "filterable": true, "filterKind": "custom" }
        ],
        "rows": [
            { "id": "1", "orderNo": "SO-1", "amount": 500 },
            { "id": "2", "orderNo": "SO-2" }
        ]
    }"#;

    #[test]
    fn test_fixture_into_parts() {
        let fixture: Fixture = serde_json::from_str(FIXTURE).unwrap();
        let (registry, config, rows) = fixture.into_parts().unwrap();

        assert_eq!(config.pagination, PaginationMode::Server);
        assert_eq!(config.page_size, 2);
        assert!(config.reset_page_on_change);

        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["orderNo", "amount"]);
        assert!(registry.get("amount").unwrap().predicate.is_some());

        assert_eq!(rows[0].value("amount"), &Value::Long(500));
        assert!(rows[1].value("amount").is_null());
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let fixture: Fixture = serde_json::from_str(
            r#"{ "columns": [{ "key": "a", "label": "A" }, { "key": "a", "label": "B" }] }"#,
        )
        .unwrap();
        assert!(matches!(fixture.into_parts(), Err(CliError::Grid(_))));
    }

    #[test]
    fn test_at_least() {
        assert!(at_least(&Value::Long(500), &Value::Long(500)));
        assert!(at_least(&Value::Float(500.5), &Value::Long(500)));
        assert!(!at_least(&Value::Long(50), &Value::Long(500)));
        assert!(!at_least(&Value::Null, &Value::Long(0)));
    }
}
