// assay-core/src/application/queries.rs

// The core's own queries live in an annotated template file like any other,
// parsed once and served by name. A suite's template directory may redefine
// any of them under the same name.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::domain::error::DomainError;
use crate::domain::template::{Params, parse_template, substitute_params};
use crate::infrastructure::templates::TemplateStore;

const BUILTIN_SQL: &str = include_str!("../../sql/builtin.sql");
const BUILTIN_FILE: &str = "builtin.sql";

fn builtin() -> &'static BTreeMap<String, String> {
    static QUERIES: OnceLock<BTreeMap<String, String>> = OnceLock::new();
    QUERIES.get_or_init(|| parse_template(BUILTIN_SQL))
}

/// Named built-in query with its placeholders filled.
pub fn builtin_query(name: &str, params: &Params) -> Result<String, DomainError> {
    let queries = builtin();
    let body = queries.get(name).ok_or_else(|| DomainError::QueryNotFound {
        name: name.to_string(),
        file: BUILTIN_FILE.to_string(),
        available: queries.keys().cloned().collect(),
    })?;
    Ok(substitute_params(body, params))
}

static BUILTIN_ONLY: QueryCatalog = QueryCatalog::new();

/// Built-in queries plus same-named overrides from template files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCatalog {
    overrides: BTreeMap<String, String>,
}

impl QueryCatalog {
    pub const fn new() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Shared catalog with no override, what every evaluator uses by default.
    pub fn builtin_only() -> &'static QueryCatalog {
        &BUILTIN_ONLY
    }

    /// Overrides every built-in that a cached template file redefines.
    ///
    /// Files are visited in name order, so when two files define the same
    /// query the last one wins. Queries with no built-in counterpart are
    /// ignored here (they stay reachable through the store).
    pub fn from_store(store: &TemplateStore) -> Self {
        let mut catalog = Self::new();
        for file in store.files() {
            for spec in file.query_specs() {
                if !builtin().contains_key(spec.name) {
                    continue;
                }
                if let Some(previous) = catalog.overrides.get(spec.name) {
                    if previous != spec.body {
                        warn!(query = spec.name, file = %file.name, "Query overridden twice, last file wins");
                    }
                }
                debug!(query = spec.name, file = %file.name, "Built-in query overridden");
                catalog.overrides.insert(spec.name.to_string(), spec.body.to_string());
            }
        }
        catalog
    }

    pub fn with_override(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), body.into());
        self
    }

    /// Names currently served from a template file instead of the built-ins.
    pub fn overridden(&self) -> Vec<&str> {
        self.overrides.keys().map(String::as_str).collect()
    }

    /// Named query with its placeholders filled, override first.
    pub fn query(&self, name: &str, params: &Params) -> Result<String, DomainError> {
        match self.overrides.get(name) {
            Some(body) => Ok(substitute_params(body, params)),
            None => builtin_query(name, params),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;

    #[test]
    fn test_every_builtin_is_registered() {
        let expected = [
            "table_exists",
            "table_columns",
            "row_count",
            "conditional_count",
            "column_common_stats",
            "string_length_stats",
            "pattern_matches",
            "dominant_values",
            "date_bounds",
            "date_window",
            "create_lineage_table",
            "insert_lineage_row",
        ];
        for name in expected {
            assert!(builtin().contains_key(name), "missing builtin query {}", name);
        }
        assert_eq!(builtin().len(), expected.len());
    }

    #[test]
    fn test_builtin_substitution() {
        let params = Params::new().with("table", "\"t\"");
        let sql = builtin_query("row_count", &params).unwrap();
        assert_eq!(sql, "SELECT COUNT(*) FROM \"t\"");
    }

    #[test]
    fn test_unknown_builtin() {
        let err = builtin_query("nope", &Params::new()).unwrap_err();
        assert!(matches!(err, DomainError::QueryNotFound { .. }));
    }

    #[test]
    fn test_catalog_prefers_overrides() {
        let catalog = QueryCatalog::new().with_override("row_count", "SELECT COUNT(1) FROM {table} WHERE NOT deleted");
        let params = Params::new().with("table", "\"t\"");

        assert_eq!(
            catalog.query("row_count", &params).unwrap(),
            "SELECT COUNT(1) FROM \"t\" WHERE NOT deleted"
        );
        // Untouched names still come from the built-ins
        assert!(catalog.query("table_exists", &params).unwrap().contains("information_schema"));
        assert_eq!(QueryCatalog::builtin_only().query("row_count", &params).unwrap(), "SELECT COUNT(*) FROM \"t\"");
    }

    #[test]
    fn test_catalog_from_template_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("a.sql"),
            "-- @name: row_count\nSELECT 1\n-- @name: active_users\nSELECT 2\n",
        )?;
        fs::write(dir.path().join("b.sql"), "-- @name: row_count\nSELECT COUNT(*) FROM {table} WHERE live\n")?;

        let mut store = TemplateStore::new(dir.path());
        store.preload()?;
        let catalog = QueryCatalog::from_store(&store);

        assert_eq!(catalog.overridden(), vec!["row_count"]);
        let params = Params::new().with("table", "users");
        assert_eq!(catalog.query("row_count", &params)?, "SELECT COUNT(*) FROM users WHERE live");
        Ok(())
    }
}
