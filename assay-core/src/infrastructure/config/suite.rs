// assay-core/src/infrastructure/config/suite.rs

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::lineage::LineagePlan;
use crate::domain::profiling::ProfilingTarget;
use crate::domain::quality::QualityRule;
use crate::domain::structure::TableSpec;
use crate::infrastructure::error::InfrastructureError;

/// One verification suite: everything `assay check` runs in a single pass.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct SuiteConfig {
    #[validate(length(min = 1, message = "suite name cannot be empty"))]
    pub name: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    #[serde(default = "default_lineage_table")]
    pub lineage_table: String,

    #[validate(nested)]
    #[serde(default)]
    pub tables: Vec<TableSpec>,

    #[validate(nested)]
    #[serde(default)]
    pub quality_rules: Vec<QualityRule>,

    #[validate(nested)]
    #[serde(default)]
    pub profiling: Vec<ProfilingTarget>,

    #[validate(nested)]
    #[serde(default)]
    pub lineage: Option<LineagePlan>,
}

fn default_database() -> String {
    "assay.duckdb".to_string()
}
fn default_template_dir() -> String {
    "sql".to_string()
}
fn default_lineage_table() -> String {
    "etl_lineage".to_string()
}

// --- LOADER ---

/// Loads a suite from a file, or from `assay.yaml`/`assay.yml` when given a directory.
#[instrument]
pub fn load_suite_config(path: &Path) -> Result<SuiteConfig, InfrastructureError> {
    let config_path = find_suite_file(path)?;
    info!(path = ?config_path, "Loading suite configuration");

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read suite config at {:?}", config_path))?;
    let mut config = parse_suite(&content)?;

    // Override via Variables d'Environnement (Pattern 'Layering')
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Parses and validates suite YAML.
pub fn parse_suite(content: &str) -> Result<SuiteConfig, InfrastructureError> {
    let config: SuiteConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

fn find_suite_file(path: &Path) -> Result<PathBuf, InfrastructureError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    let candidates = ["assay.yaml", "assay.yml"];
    for filename in candidates {
        let p = path.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No suite file found at {:?}. Checked: {:?}",
        path, candidates
    )))
}

fn apply_env_overrides(config: &mut SuiteConfig) {
    if let Ok(val) = std::env::var("ASSAY_DATABASE") {
        info!(old = ?config.database, new = ?val, "Overriding database via ENV");
        config.database = val;
    }
    if let Ok(val) = std::env::var("ASSAY_LINEAGE_TABLE") {
        info!(old = ?config.lineage_table, new = ?val, "Overriding lineage table via ENV");
        config.lineage_table = val;
    }
}
