// assay-core/src/application/report.rs

use chrono::{DateTime, Utc};
use comfy_table::{Table, presets::ASCII_FULL};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::lineage::LineageStepResult;
use crate::domain::profiling::ProfileResult;
use crate::domain::quality::{QualityRule, QualityRuleResult, QualityScorecard};
use crate::domain::structure::ValidationResult;
use crate::error::AssayError;

// --- DTOs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: QualityRule,
    pub result: QualityRuleResult,
}

/// Everything one suite run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub validations: Vec<ValidationResult>,
    pub quality: Vec<RuleOutcome>,
    pub scorecard: QualityScorecard,
    pub profiles: Vec<ProfileResult>,
    pub lineage: Vec<LineageStepResult>,
}

impl SuiteReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generated_at: Utc::now(),
            validations: Vec::new(),
            quality: Vec::new(),
            scorecard: QualityScorecard::default(),
            profiles: Vec::new(),
            lineage: Vec::new(),
        }
    }

    pub fn with_quality(mut self, rules: &[QualityRule], results: Vec<QualityRuleResult>) -> Self {
        self.quality = rules
            .iter()
            .cloned()
            .zip(results)
            .map(|(rule, result)| RuleOutcome { rule, result })
            .collect();
        self.scorecard = QualityScorecard::compute(self.quality.iter().map(|o| (&o.rule, &o.result)));
        self
    }

    pub fn passed_tables(&self) -> usize {
        self.validations.iter().filter(|v| v.valid).count()
    }

    pub fn failed_tables(&self) -> usize {
        self.validations.len() - self.passed_tables()
    }

    /// True when every table conforms, every rule met its threshold and no
    /// lineage step failed.
    pub fn is_success(&self) -> bool {
        self.failed_tables() == 0
            && self.quality.iter().all(|o| o.result.threshold_met)
            && self.lineage.iter().all(|s| s.error.is_none())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// --- GENERATOR ---

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn write<W: Write>(report: &SuiteReport, out: &mut W) -> Result<(), AssayError> {
        let total = report.validations.len();
        let passed = report.passed_tables();
        let percent = if total > 0 {
            passed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        writeln!(out, "==========================================")?;
        writeln!(out, "ETL VERIFICATION REPORT: {}", report.name)?;
        writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(out, "==========================================")?;
        writeln!(out, "Tables checked: {}", total)?;
        writeln!(out, "Passed: {}", passed)?;
        writeln!(out, "Failed: {}", report.failed_tables())?;
        writeln!(out, "Pass rate: {:.1}%", percent)?;

        for v in &report.validations {
            writeln!(out)?;
            let status = if v.valid { "PASS" } else { "FAIL" };
            writeln!(out, "[{}] {}.{}", status, v.schema_id, v.table_id)?;
            writeln!(
                out,
                "  Columns: {} (expected {})",
                v.column_count,
                expected_range(v.expected_min, v.expected_max)
            )?;
            if !v.missing_critical_columns.is_empty() {
                writeln!(out, "  Missing critical columns: {}", v.missing_critical_columns.join(", "))?;
            }
            if !v.missing_patterns.is_empty() {
                writeln!(out, "  Missing pattern groups: {}", v.missing_patterns.join(", "))?;
            }
            if let Some(error) = &v.error {
                writeln!(out, "  Error: {}", error)?;
            }
        }

        if !report.quality.is_empty() {
            writeln!(out)?;
            writeln!(out, "QUALITY RULES")?;
            writeln!(out, "{}", quality_table(report))?;
            let card = &report.scorecard;
            let weighted = card
                .weighted_score
                .map(|s| format!("{:.2}%", s))
                .unwrap_or_else(|| "n/a".to_string());
            writeln!(
                out,
                "Scorecard: {} passed, {} failed, {} errored, weighted score {}",
                card.passed, card.failed, card.degraded, weighted
            )?;
        }

        if !report.profiles.is_empty() {
            writeln!(out)?;
            writeln!(out, "COLUMN PROFILES")?;
            writeln!(out, "{}", profile_table(&report.profiles))?;
        }

        if !report.lineage.is_empty() {
            writeln!(out)?;
            writeln!(out, "LINEAGE")?;
            writeln!(out, "{}", lineage_table(&report.lineage))?;
        }

        Ok(())
    }

    pub fn render(report: &SuiteReport) -> Result<String, AssayError> {
        let mut buf = Vec::new();
        Self::write(report, &mut buf)?;
        String::from_utf8(buf).map_err(|e| AssayError::InternalError(e.to_string()))
    }
}

fn expected_range(min: usize, max: Option<usize>) -> String {
    match max {
        Some(max) => format!("{}-{}", min, max),
        None => format!(">= {}", min),
    }
}

fn quality_table(report: &SuiteReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(vec!["Rule", "Table", "Severity", "Score", "Threshold", "Status"]);

    for RuleOutcome { rule, result } in &report.quality {
        let status = match (&result.error, result.threshold_met) {
            (Some(e), _) => format!("ERROR: {}", e),
            (None, true) => "PASS".to_string(),
            (None, false) => "FAIL".to_string(),
        };
        table.add_row(vec![
            rule.name.clone(),
            rule.table.clone(),
            rule.severity.to_string(),
            format!("{:.2}%", result.score),
            format!("{:.2}%", rule.threshold),
            status,
        ]);
    }
    table
}

fn profile_table(profiles: &[ProfileResult]) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(vec![
        "Column", "Family", "Total", "Nulls", "Distinct", "Min", "Max", "Compliance", "Anomalies",
    ]);

    for p in profiles {
        table.add_row(vec![
            format!("{}.{}", p.table, p.column),
            p.family.to_string(),
            p.total_count.to_string(),
            p.null_count.to_string(),
            p.distinct_count.to_string(),
            p.min_value.clone().unwrap_or_default(),
            p.max_value.clone().unwrap_or_default(),
            format!("{:.1}%", p.pattern_compliance),
            p.anomaly_count.to_string(),
        ]);
    }
    table
}

fn lineage_table(steps: &[LineageStepResult]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(vec!["Step", "Source", "Target", "Before", "After", "Retention", "Error"]);

    for s in steps {
        table.add_row(vec![
            s.step_order.to_string(),
            s.source_table.clone(),
            s.target_table.clone(),
            s.before_count.to_string(),
            s.after_count.to_string(),
            format!("{:.1}%", s.retention_rate),
            s.error.clone().unwrap_or_default(),
        ]);
    }
    table
}
