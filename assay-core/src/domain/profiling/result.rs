// assay-core/src/domain/profiling/result.rs

use serde::{Deserialize, Serialize};

use crate::domain::measurement::Measurement;
use crate::domain::profiling::target::{ProfilingTarget, TypeFamily};

/// Placeholder shown instead of min/max when profiling failed.
pub const ERROR_MARKER: &str = "error";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileResult {
    pub table: String,
    pub column: String,
    pub family: TypeFamily,
    pub total_count: u64,
    pub null_count: u64,
    pub distinct_count: u64,
    /// String family: shortest/longest length. Date family: earliest/latest value.
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub avg_length: Option<f64>,
    pub pattern_compliance: f64,
    pub anomaly_count: u64,
    pub error: Option<String>,
}

impl ProfileResult {
    /// Common statistics only; compliance 100%, no anomalies.
    pub fn base(target: &ProfilingTarget, total: u64, non_null: u64, distinct: u64) -> Self {
        Self {
            table: target.table.clone(),
            column: target.column.clone(),
            family: target.family(),
            total_count: total,
            null_count: total.saturating_sub(non_null),
            distinct_count: distinct,
            min_value: None,
            max_value: None,
            avg_length: None,
            pattern_compliance: 100.0,
            anomaly_count: 0,
            error: None,
        }
    }

    pub fn non_null_count(&self) -> u64 {
        self.total_count - self.null_count
    }

    pub fn degraded(target: &ProfilingTarget, error: impl Into<String>) -> Self {
        Self {
            min_value: Some(ERROR_MARKER.to_string()),
            max_value: Some(ERROR_MARKER.to_string()),
            pattern_compliance: 0.0,
            error: Some(error.into()),
            ..Self::base(target, 0, 0, 0)
        }
    }

    pub fn measurement(&self) -> Measurement<f64> {
        Measurement::from_error(self.pattern_compliance, self.error.as_deref())
    }
}

/// `part / whole` as a percentage; an empty whole has nothing to violate.
pub fn compliance_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 100.0;
    }
    (part.min(whole) as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_count_derivation() {
        let target = ProfilingTarget::new("t", "c", "INTEGER");
        let result = ProfileResult::base(&target, 10, 7, 3);
        assert_eq!(result.null_count, 3);
        assert_eq!(result.non_null_count(), 7);
        assert_eq!(result.pattern_compliance, 100.0);
    }

    #[test]
    fn test_degraded_profile() {
        let target = ProfilingTarget::new("t", "c", "DATE");
        let result = ProfileResult::degraded(&target, "no such table");
        assert_eq!(result.total_count, 0);
        assert_eq!(result.min_value.as_deref(), Some(ERROR_MARKER));
        assert_eq!(result.max_value.as_deref(), Some(ERROR_MARKER));
        assert!(result.measurement().is_degraded());
    }

    #[test]
    fn test_compliance_percent() {
        assert_eq!(compliance_percent(0, 0), 100.0);
        assert_eq!(compliance_percent(3, 4), 75.0);
        assert_eq!(compliance_percent(9, 4), 100.0);
    }
}
