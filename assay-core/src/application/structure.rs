// assay-core/src/application/structure.rs

use tracing::{info, instrument, warn};

// Imports Hexagonaux
use crate::application::engine::{fetch_all, fetch_one};
use crate::application::queries::QueryCatalog;
use crate::application::records::{ColumnRecord, CountRecord};
use crate::domain::sql::Quoter;
use crate::domain::structure::{TableSpec, ValidationResult};
use crate::domain::template::Params;
use crate::error::AssayError;
use crate::ports::connector::Connector;

/// Checks warehouse tables against their `TableSpec`.
///
/// Never fails: metadata errors come back as invalid results carrying the error.
pub struct StructureValidator<'a> {
    connector: &'a dyn Connector,
    queries: &'a QueryCatalog,
}

impl<'a> StructureValidator<'a> {
    pub fn new(connector: &'a dyn Connector) -> Self {
        Self {
            connector,
            queries: QueryCatalog::builtin_only(),
        }
    }

    /// Serves SQL from `queries` instead of the built-ins alone.
    pub fn with_queries(mut self, queries: &'a QueryCatalog) -> Self {
        self.queries = queries;
        self
    }

    #[instrument(skip(self, spec), fields(table = %spec.table_id, schema = %spec.schema_id))]
    pub async fn validate(&self, spec: &TableSpec) -> ValidationResult {
        match self.inspect(spec).await {
            Ok(result) => {
                if result.valid {
                    info!(columns = result.column_count, "✅ Structure conforms");
                } else {
                    warn!(
                        columns = result.column_count,
                        missing_critical = ?result.missing_critical_columns,
                        missing_patterns = ?result.missing_patterns,
                        "⚠️ Structure does not conform"
                    );
                }
                result
            }
            Err(e) => {
                warn!("Metadata query failed: {}", e);
                ValidationResult::failed(spec, format!("Metadata query failed: {}", e))
            }
        }
    }

    pub async fn validate_all(&self, specs: &[TableSpec]) -> Vec<ValidationResult> {
        let mut results = Vec::with_capacity(specs.len());
        for spec in specs {
            results.push(self.validate(spec).await);
        }
        results
    }

    async fn inspect(&self, spec: &TableSpec) -> Result<ValidationResult, AssayError> {
        let params = Params::new()
            .with("schema_literal", Quoter::literal(&spec.schema_id))
            .with("table_literal", Quoter::literal(&spec.table_id));

        // 1. Existence
        let exists = self.queries.query("table_exists", &params)?;
        let CountRecord(found) = fetch_one(self.connector, &exists).await?;
        if found == 0 {
            return Ok(ValidationResult::table_missing(spec));
        }

        // 2. Ordered columns, then count / critical / pattern checks
        let columns_sql = self.queries.query("table_columns", &params)?;
        let columns: Vec<(String, String)> = fetch_all::<ColumnRecord>(self.connector, &columns_sql)
            .await?
            .into_iter()
            .map(|c| (c.name, c.data_type))
            .collect();

        Ok(ValidationResult::evaluate(spec, &columns))
    }
}
