// assay/src/commands/check.rs
//
// USE CASE: Run a verification suite against its DuckDB database.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use assay_core::application::{QueryCatalog, ReportGenerator, SqlTransformation, run_suite};
use assay_core::infrastructure::adapters::duckdb::DuckDBConnector;
use assay_core::infrastructure::config::load_suite_config;
use assay_core::infrastructure::fs::atomic_write;
use assay_core::infrastructure::templates::TemplateStore;
use tracing::debug;

/// Returns whether the suite passed.
pub async fn execute(config_path: &Path, output: Option<&Path>, json: bool) -> anyhow::Result<bool> {
    let start = Instant::now();

    // A. Load the suite (Infra)
    debug!(path = ?config_path, "Resolving suite file");
    let config = load_suite_config(config_path)?;
    eprintln!("⚙️  Suite: {} (database: {})", config.name, config.database);

    // Same-named queries in the template dir replace the built-ins
    let mut templates = TemplateStore::new(&config.template_dir);
    let loaded = templates.preload()?;
    let queries = QueryCatalog::from_store(&templates);
    debug!(dir = %config.template_dir, files = loaded, overrides = ?queries.overridden(), "Templates preloaded");

    // B. Adapter + transformation collaborator
    let connector = DuckDBConnector::new(&config.database)
        .with_context(|| format!("Cannot open database '{}'", config.database))?;
    let runner = SqlTransformation::new(&connector);

    // C. Run (Application Layer)
    let report = run_suite(&config, &connector, &runner, &queries).await?;

    let rendered = if json {
        report.to_json()?
    } else {
        ReportGenerator::render(&report)?
    };

    match output {
        Some(path) => {
            atomic_write(path, &rendered)?;
            eprintln!("📝 Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    let success = report.is_success();
    if success {
        eprintln!("\n✨ SUCCESS! Suite finished in {:.2?}", start.elapsed());
    } else {
        eprintln!("\n❌ FAILURE. {} table(s) failed.", report.failed_tables());
    }
    Ok(success)
}
