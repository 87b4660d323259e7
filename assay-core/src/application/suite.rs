// assay-core/src/application/suite.rs

use tracing::{info, instrument};

use crate::application::lineage::LineageTracker;
use crate::application::profiler::ColumnProfiler;
use crate::application::quality::QualityRuleEvaluator;
use crate::application::queries::QueryCatalog;
use crate::application::report::SuiteReport;
use crate::application::structure::StructureValidator;
use crate::error::AssayError;
use crate::infrastructure::config::SuiteConfig;
use crate::ports::connector::Connector;
use crate::ports::transformation::TransformationRunner;

/// Runs a whole suite: structure, then rules, then profiles, then lineage.
///
/// Every query goes through `queries`, so a suite's template directory can
/// redefine any built-in. Only lineage persistence failures are returned; every
/// other failure ends up inside the report.
#[instrument(skip_all, fields(suite = %config.name, engine = connector.engine_name()))]
pub async fn run_suite(
    config: &SuiteConfig,
    connector: &dyn Connector,
    runner: &dyn TransformationRunner,
    queries: &QueryCatalog,
) -> Result<SuiteReport, AssayError> {
    info!("🚀 Running suite '{}'", config.name);
    if !queries.overridden().is_empty() {
        info!(queries = ?queries.overridden(), "Using template overrides");
    }

    // 1. Structure
    let validations = StructureValidator::new(connector)
        .with_queries(queries)
        .validate_all(&config.tables)
        .await;

    // 2. Quality rules
    let rule_results = QualityRuleEvaluator::new(connector)
        .with_queries(queries)
        .evaluate_all(&config.quality_rules)
        .await;

    // 3. Profiling
    let profiles = ColumnProfiler::new(connector)
        .with_queries(queries)
        .profile_all(&config.profiling)
        .await;

    // 4. Lineage
    let lineage = match &config.lineage {
        Some(plan) => {
            LineageTracker::new(connector, runner, config.lineage_table.as_str())
                .with_queries(queries)
                .track(&plan.transformation_id, &plan.steps)
                .await?
        }
        None => Vec::new(),
    };

    let mut report = SuiteReport::new(&config.name).with_quality(&config.quality_rules, rule_results);
    report.validations = validations;
    report.profiles = profiles;
    report.lineage = lineage;

    info!(
        tables = report.validations.len(),
        rules = report.quality.len(),
        profiles = report.profiles.len(),
        steps = report.lineage.len(),
        success = report.is_success(),
        "🏁 Suite '{}' finished",
        config.name
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::testing::{RecordingRunner, ScriptedConnector, int, text};
    use crate::infrastructure::config::parse_suite;

    #[tokio::test]
    async fn test_suite_runs_every_section() {
        let config = parse_suite(
            r#"
name: nightly
tables:
  - table_id: stg_users
    critical_columns: [id]
quality-rules:
  - name: id_present
    table: stg_users
    column: id
    condition: IS NOT NULL
    threshold: 90
profiling:
  - table: stg_users
    column: id
    data_type: INTEGER
lineage:
  transformation-id: run_1
  steps:
    - order: 1
      source_table: raw_users
      target_table: stg_users
"#,
        )
        .unwrap();

        let connector = ScriptedConnector::new()
            .on("information_schema.tables", vec![vec![int(1)]])
            .on("information_schema.columns", vec![vec![text("id"), text("INTEGER")]])
            .on("COUNT(DISTINCT", vec![vec![int(10), int(10), int(10)]])
            .on("WHERE \"id\" IS NOT NULL", vec![vec![int(10)]])
            .on("CREATE TABLE IF NOT EXISTS", vec![vec![int(0)]])
            .on("INSERT INTO", vec![vec![int(1)]])
            .on("FROM \"raw_users\"", vec![vec![int(12)]])
            .on("FROM \"stg_users\"", vec![vec![int(10)]]);
        let runner = RecordingRunner::new(vec![]);

        let report = run_suite(&config, &connector, &runner, QueryCatalog::builtin_only()).await.unwrap();

        assert_eq!(report.name, "nightly");
        assert!(report.validations[0].valid);
        assert!(report.quality[0].result.threshold_met);
        assert_eq!(report.scorecard.passed, 1);
        assert_eq!(report.profiles[0].total_count, 10);
        assert_eq!(report.lineage.len(), 1);
        assert_eq!(runner.ran(), vec![1]);
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_empty_suite() {
        let config = parse_suite("name: empty\n").unwrap();
        let connector = ScriptedConnector::new();
        let runner = RecordingRunner::new(vec![]);

        let report = run_suite(&config, &connector, &runner, QueryCatalog::builtin_only()).await.unwrap();
        assert!(report.validations.is_empty());
        assert!(connector.executed().is_empty());
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_template_override_reaches_every_rule() {
        let config = parse_suite(
            r#"
name: soft_deletes
quality-rules:
  - name: id_present
    table: stg_users
    column: id
    condition: IS NOT NULL
    threshold: 90
"#,
        )
        .unwrap();

        let queries = QueryCatalog::new()
            .with_override("row_count", "SELECT COUNT(*) FROM {table} WHERE NOT is_deleted")
            .with_override(
                "conditional_count",
                "SELECT COUNT(*) FROM {table} WHERE NOT is_deleted AND {predicate}",
            );
        let connector = ScriptedConnector::new()
            .on("WHERE NOT is_deleted AND", vec![vec![int(8)]])
            .on("WHERE NOT is_deleted", vec![vec![int(8)]]);
        let runner = RecordingRunner::new(vec![]);

        let report = run_suite(&config, &connector, &runner, &queries).await.unwrap();

        assert_eq!(report.quality[0].result.total_count, 8);
        assert_eq!(report.quality[0].result.score, 100.0);
        assert_eq!(
            connector.executed(),
            vec![
                "SELECT COUNT(*) FROM \"stg_users\" WHERE NOT is_deleted",
                "SELECT COUNT(*) FROM \"stg_users\" WHERE NOT is_deleted AND \"id\" IS NOT NULL",
            ]
        );
    }
}
