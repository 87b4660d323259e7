// End-to-end checks of every use case against an in-memory DuckDB.

use anyhow::Result;
use assay_core::application::{
    ColumnProfiler, DEFAULT_LINEAGE_TABLE, LineageTracker, QualityRuleEvaluator, SqlTransformation,
    StructureValidator,
};
use assay_core::domain::lineage::LineageStep;
use assay_core::domain::profiling::ProfilingTarget;
use assay_core::domain::quality::QualityRule;
use assay_core::domain::structure::TableSpec;
use assay_core::infrastructure::adapters::duckdb::DuckDBConnector;
use assay_core::ports::Connector;
use chrono::{TimeZone, Utc};

async fn warehouse() -> Result<DuckDBConnector> {
    let db = DuckDBConnector::in_memory()?;
    for statement in [
        "CREATE TABLE stg_users AS
         SELECT i AS id,
                CASE WHEN i <= 4 THEN NULL ELSE 'user' || i || '@example.com' END AS contact_email,
                CASE WHEN i % 10 = 0 THEN 'inactive' ELSE 'active' END AS status
         FROM range(1, 1001) t(i)",
        "CREATE TABLE wide (ID INTEGER, AMOUNT DOUBLE, LIV0EU_1X VARCHAR, LIV0EU_2X VARCHAR, NOTE VARCHAR)",
        "CREATE TABLE events (id INTEGER, happened_on DATE)",
        "INSERT INTO events VALUES (1, DATE '2020-01-01'), (2, DATE '2030-01-01'), (3, DATE '2000-01-01'), (4, NULL)",
        "CREATE TABLE raw_orders AS SELECT i AS id FROM range(0, 200) t(i)",
        "CREATE TABLE shifts (starts_at TIME)",
        "CREATE TABLE contacts (email VARCHAR)",
        "INSERT INTO contacts VALUES (' ana@example.io '), ('nope'), ('bo@example.org'), (NULL)",
        "INSERT INTO shifts VALUES (TIME '08:00:00'), (TIME '14:00:00'), (NULL)",
    ] {
        db.execute_query(statement).await?;
    }
    Ok(db)
}

#[tokio::test]
async fn test_structure_against_information_schema() -> Result<()> {
    let db = warehouse().await?;
    let validator = StructureValidator::new(&db);

    let conforming = TableSpec::new("wide", "main")
        .with_column_range(4, Some(6))
        .with_critical_columns(["ID", "AMOUNT"])
        .with_patterns(["LIV0EU_*"]);
    let result = validator.validate(&conforming).await;
    assert!(result.valid, "{:?}", result);
    assert_eq!(result.column_count, 5);
    assert_eq!(result.details.columns, vec!["ID", "AMOUNT", "LIV0EU_1X", "LIV0EU_2X", "NOTE"]);
    assert_eq!(result.details.pattern_matches["LIV0EU_*"], vec!["LIV0EU_1X", "LIV0EU_2X"]);
    assert_eq!(result.details.column_types["AMOUNT"], "DOUBLE");

    // Case-sensitive names, too many columns required
    let strict = TableSpec::new("wide", "main")
        .with_column_range(10, None)
        .with_critical_columns(["id", "AMOUNT"])
        .with_patterns(["XX_*"]);
    let result = validator.validate(&strict).await;
    assert!(!result.valid);
    assert!(!result.details.column_count_ok);
    assert_eq!(result.missing_critical_columns, vec!["id"]);
    assert_eq!(result.missing_patterns, vec!["XX_*"]);

    let missing = TableSpec::new("nowhere", "main").with_critical_columns(["A", "B"]);
    let result = validator.validate(&missing).await;
    assert!(!result.valid);
    assert_eq!(result.missing_critical_columns, vec!["A", "B"]);
    assert!(result.error.is_some());
    Ok(())
}

#[tokio::test]
async fn test_quality_rules() -> Result<()> {
    let db = warehouse().await?;
    let evaluator = QualityRuleEvaluator::new(&db);

    let email = QualityRule::new("email_present", "stg_users", "IS NOT NULL", 99.5).on_column("contact_email");
    let result = evaluator.evaluate(&email).await;
    assert_eq!(result.total_count, 1000);
    assert_eq!(result.valid_count, 996);
    assert!((result.score - 99.6).abs() < 1e-9);
    assert!(result.threshold_met);

    // Same rule twice, same score
    assert_eq!(evaluator.evaluate(&email).await.score, result.score);

    db.execute_query("CREATE TABLE empty_t (x INTEGER)").await?;
    let empty = QualityRule::new("any", "empty_t", "x > 0", 0.0);
    let result = evaluator.evaluate(&empty).await;
    assert_eq!(result.score, 0.0);
    assert!(!result.threshold_met);

    let broken = QualityRule::new("broken", "no_such_table", "x > 0", 50.0);
    let result = evaluator.evaluate(&broken).await;
    assert!(result.measurement().is_degraded());
    Ok(())
}

#[tokio::test]
async fn test_profiles_by_family() -> Result<()> {
    let db = warehouse().await?;
    let reference = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().ok_or_else(|| anyhow::anyhow!("bad date"))?;
    let profiler = ColumnProfiler::new(&db).with_reference_time(reference);

    let email = profiler
        .profile(&ProfilingTarget::new("stg_users", "contact_email", "VARCHAR"))
        .await;
    assert!(email.error.is_none(), "{:?}", email.error);
    assert_eq!(email.total_count, 1000);
    assert_eq!(email.null_count, 4);
    assert_eq!(email.distinct_count, 996);
    assert_eq!(email.pattern_compliance, 100.0);
    assert_eq!(email.anomaly_count, 0);

    let status = profiler
        .profile(&ProfilingTarget::new("stg_users", "status", "VARCHAR(10)"))
        .await;
    assert_eq!(status.min_value.as_deref(), Some("6"));
    assert_eq!(status.max_value.as_deref(), Some("8"));
    // 'active' holds 90% of the rows
    assert_eq!(status.anomaly_count, 1);

    let dates = profiler
        .profile(&ProfilingTarget::new("events", "happened_on", "DATE"))
        .await;
    assert!(dates.error.is_none(), "{:?}", dates.error);
    assert_eq!(dates.null_count, 1);
    assert_eq!(dates.min_value.as_deref(), Some("2000-01-01"));
    assert_eq!(dates.max_value.as_deref(), Some("2030-01-01"));
    assert_eq!(dates.anomaly_count, 2);
    assert!((dates.pattern_compliance - 100.0 / 3.0).abs() < 1e-9);

    // Trimmed values are matched in the database
    let contacts = profiler
        .profile(&ProfilingTarget::new("contacts", "email", "VARCHAR"))
        .await;
    assert!(contacts.error.is_none(), "{:?}", contacts.error);
    assert!((contacts.pattern_compliance - 200.0 / 3.0).abs() < 1e-9);

    let times = profiler
        .profile(&ProfilingTarget::new("shifts", "starts_at", "TIME"))
        .await;
    assert!(times.error.is_none(), "{:?}", times.error);
    assert_eq!(times.total_count, 3);
    assert_eq!(times.null_count, 1);
    assert_eq!(times.distinct_count, 2);
    assert_eq!(times.min_value.as_deref(), Some("08:00:00"));
    assert_eq!(times.max_value.as_deref(), Some("14:00:00"));
    assert_eq!(times.anomaly_count, 0);
    assert_eq!(times.pattern_compliance, 100.0);

    let numeric = profiler.profile(&ProfilingTarget::new("stg_users", "id", "BIGINT")).await;
    assert_eq!(numeric.distinct_count, 1000);
    assert_eq!(numeric.pattern_compliance, 100.0);

    let missing = profiler.profile(&ProfilingTarget::new("ghost", "c", "VARCHAR")).await;
    assert!(missing.measurement().is_degraded());
    Ok(())
}

#[tokio::test]
async fn test_lineage_is_persisted() -> Result<()> {
    let db = warehouse().await?;
    let runner = SqlTransformation::new(&db);
    let tracker = LineageTracker::new(&db, &runner, DEFAULT_LINEAGE_TABLE);

    let steps = vec![
        LineageStep::new(2, "stg_orders", "int_orders")
            .with_logic("copy", "CREATE TABLE int_orders AS SELECT * FROM stg_orders"),
        LineageStep::new(1, "raw_orders", "stg_orders")
            .with_logic("filter", "CREATE TABLE stg_orders AS SELECT * FROM raw_orders WHERE id % 4 <> 0"),
        LineageStep::new(3, "int_orders", "never_built"),
    ];

    let results = tracker.track("nightly_run", &steps).await?;
    assert_eq!(results.len(), 3);
    assert_eq!((results[0].before_count, results[0].after_count), (200, 150));
    assert_eq!(results[0].retention_rate, 75.0);
    assert_eq!(results[1].retention_rate, 100.0);
    // No logic: the step fails, its target cannot be counted, the run still completes
    assert!(results[2].error.is_some());
    assert_eq!(results[2].after_count, 0);

    let rows = db
        .execute_query(
            "SELECT step_order, before_count, after_count, retention_rate, error IS NULL
             FROM etl_lineage WHERE transformation_id = 'nightly_run' ORDER BY step_order",
        )
        .await?;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].count(1)?, 200);
    assert_eq!(rows[0].count(2)?, 150);
    assert_eq!(rows[0].float(3)?, Some(75.0));
    assert_eq!(rows[2].text(4)?.as_deref(), Some("false"));
    Ok(())
}
