// assay-core/src/domain/quality/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::measurement::Measurement;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityRuleResult {
    pub rule_name: String,
    pub total_count: u64,
    pub valid_count: u64,
    pub invalid_count: u64,
    /// Percent of records satisfying the rule, in [0, 100].
    pub score: f64,
    pub threshold_met: bool,
    pub evaluated_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl QualityRuleResult {
    /// Empty tables score 0 and never meet their threshold.
    pub fn from_counts(rule_name: &str, total: u64, valid: u64, threshold: f64) -> Self {
        let valid = valid.min(total);
        let score = if total > 0 {
            (valid as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            rule_name: rule_name.to_string(),
            total_count: total,
            valid_count: valid,
            invalid_count: total - valid,
            score,
            threshold_met: total > 0 && score >= threshold,
            evaluated_at: Utc::now(),
            error: None,
        }
    }

    /// Zeroed result for a rule that could not be evaluated.
    pub fn degraded(rule_name: &str, error: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.to_string(),
            total_count: 0,
            valid_count: 0,
            invalid_count: 0,
            score: 0.0,
            threshold_met: false,
            evaluated_at: Utc::now(),
            error: Some(error.into()),
        }
    }

    pub fn measurement(&self) -> Measurement<f64> {
        Measurement::from_error(self.score, self.error.as_deref())
    }
}
