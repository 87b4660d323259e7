// assay-core/src/application/lineage.rs
//
// Runs an ordered chain of transformations and records, for each step, how
// many records went in and how many came out.

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::application::engine::{execute_query, fetch_one};
use crate::application::queries::QueryCatalog;
use crate::application::records::CountRecord;
use crate::domain::error::DomainError;
use crate::domain::lineage::{LineageStep, LineageStepResult};
use crate::domain::sql::Quoter;
use crate::domain::template::Params;
use crate::error::AssayError;
use crate::ports::connector::Connector;
use crate::ports::transformation::TransformationRunner;

pub const DEFAULT_LINEAGE_TABLE: &str = "etl_lineage";

pub struct LineageTracker<'a> {
    connector: &'a dyn Connector,
    runner: &'a dyn TransformationRunner,
    queries: &'a QueryCatalog,
    lineage_table: String,
}

impl<'a> LineageTracker<'a> {
    pub fn new(
        connector: &'a dyn Connector,
        runner: &'a dyn TransformationRunner,
        lineage_table: impl Into<String>,
    ) -> Self {
        Self {
            connector,
            runner,
            queries: QueryCatalog::builtin_only(),
            lineage_table: lineage_table.into(),
        }
    }

    /// Serves SQL from `queries` instead of the built-ins alone.
    pub fn with_queries(mut self, queries: &'a QueryCatalog) -> Self {
        self.queries = queries;
        self
    }

    /// Executes the steps in ascending order and persists one lineage row each.
    ///
    /// A failing transformation or count read does not stop the chain: the step
    /// keeps whatever counts were observable and carries the error. Only failures
    /// to create or write the lineage table are returned.
    #[instrument(skip(self, steps), fields(transformation = %transformation_id, steps = steps.len()))]
    pub async fn track(
        &self,
        transformation_id: &str,
        steps: &[LineageStep],
    ) -> Result<Vec<LineageStepResult>, AssayError> {
        self.ensure_table().await?;

        let mut ordered: Vec<&LineageStep> = steps.iter().collect();
        ordered.sort_by_key(|s| s.order);

        let mut results = Vec::with_capacity(ordered.len());
        for step in ordered {
            let result = self.run_step(step).await;
            self.persist(transformation_id, step, &result).await?;
            results.push(result);
        }

        let failed = results.iter().filter(|r| r.error.is_some()).count();
        if failed > 0 {
            warn!("⚠️ Lineage '{}' finished with {} failed step(s)", transformation_id, failed);
        } else {
            info!("🔗 Lineage '{}' recorded ({} steps)", transformation_id, results.len());
        }
        Ok(results)
    }

    async fn run_step(&self, step: &LineageStep) -> LineageStepResult {
        let mut errors = Vec::new();

        let before = self.count_or_zero(&step.source_table, &mut errors).await;

        if let Err(e) = self.runner.run(step).await {
            error!("❌ Step {} ({} -> {}) failed: {}", step.order, step.source_table, step.target_table, e);
            errors.push(format!("transformation failed: {}", e));
        }

        let after = self.count_or_zero(&step.target_table, &mut errors).await;

        let error = (!errors.is_empty()).then(|| errors.join("; "));
        let result = LineageStepResult::new(step, before, after, error);
        info!(
            step = step.order,
            before = result.before_count,
            after = result.after_count,
            retention = result.retention_rate,
            "{} -> {}",
            step.source_table,
            step.target_table
        );
        result
    }

    async fn count_or_zero(&self, table: &str, errors: &mut Vec<String>) -> u64 {
        match self.count(table).await {
            Ok(n) => n,
            Err(e) => {
                warn!("Could not count {}: {}", table, e);
                errors.push(format!("count of {} failed: {}", table, e));
                0
            }
        }
    }

    async fn count(&self, table: &str) -> Result<u64, AssayError> {
        let params = Params::new().with("table", Quoter::table(table));
        let CountRecord(n) = fetch_one(self.connector, &self.queries.query("row_count", &params)?).await?;
        Ok(n)
    }

    async fn ensure_table(&self) -> Result<(), AssayError> {
        let params = Params::new().with("lineage_table", Quoter::table(&self.lineage_table));
        execute_query(self.connector, &self.queries.query("create_lineage_table", &params)?).await?;
        Ok(())
    }

    async fn persist(
        &self,
        transformation_id: &str,
        step: &LineageStep,
        result: &LineageStepResult,
    ) -> Result<(), AssayError> {
        let params = Params::new()
            .with("lineage_table", Quoter::table(&self.lineage_table))
            .with("transformation_id", Quoter::literal(transformation_id))
            .with("step_order", result.step_order)
            .with("source_table", Quoter::literal(&result.source_table))
            .with("target_table", Quoter::literal(&result.target_table))
            .with("transformation_type", Quoter::literal(&step.transformation_type))
            .with("before_count", result.before_count)
            .with("after_count", result.after_count)
            .with("retention_rate", result.retention_rate)
            .with(
                "error",
                result
                    .error
                    .as_deref()
                    .map(Quoter::literal)
                    .unwrap_or_else(|| "NULL".to_string()),
            )
            .with(
                "recorded_at",
                Quoter::literal(&result.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            );

        execute_query(self.connector, &self.queries.query("insert_lineage_row", &params)?).await?;
        Ok(())
    }
}

/// Runs a step's transformation text as a statement on the same connector.
pub struct SqlTransformation<'a> {
    connector: &'a dyn Connector,
}

impl<'a> SqlTransformation<'a> {
    pub fn new(connector: &'a dyn Connector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl<'a> TransformationRunner for SqlTransformation<'a> {
    async fn run(&self, step: &LineageStep) -> Result<(), AssayError> {
        let logic = step.transformation_logic.trim();
        if logic.is_empty() {
            return Err(DomainError::InvalidSpec(format!(
                "step {} ({} -> {}) has no transformation logic",
                step.order, step.source_table, step.target_table
            ))
            .into());
        }
        execute_query(self.connector, logic).await?;
        Ok(())
    }
}
