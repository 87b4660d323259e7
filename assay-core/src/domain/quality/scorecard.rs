// assay-core/src/domain/quality/scorecard.rs

use serde::{Deserialize, Serialize};

use crate::domain::quality::result::QualityRuleResult;
use crate::domain::quality::rule::QualityRule;

/// Severity-weighted roll-up of rule results. Errored rules are counted but
/// never enter the weighted average.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QualityScorecard {
    pub evaluated: usize,
    pub passed: usize,
    pub failed: usize,
    pub degraded: usize,
    pub weighted_score: Option<f64>,
}

impl QualityScorecard {
    pub fn compute<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = (&'a QualityRule, &'a QualityRuleResult)>,
    {
        let mut card = Self::default();
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for (rule, result) in results {
            card.evaluated += 1;
            match result.measurement().value() {
                None => card.degraded += 1,
                Some(score) => {
                    if result.threshold_met {
                        card.passed += 1;
                    } else {
                        card.failed += 1;
                    }
                    let weight = rule.severity.weight();
                    weighted_sum += weight * score;
                    weight_total += weight;
                }
            }
        }

        if weight_total > 0.0 {
            card.weighted_score = Some(weighted_sum / weight_total);
        }
        card
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::rule::Severity;

    #[test]
    fn test_weighted_average_excludes_errors() {
        let critical = QualityRule::new("a", "t", "x > 0", 90.0).with_severity(Severity::Critical);
        let low = QualityRule::new("b", "t", "y > 0", 90.0).with_severity(Severity::Low);
        let broken = QualityRule::new("c", "t", "z > 0", 90.0).with_severity(Severity::Critical);

        let ra = QualityRuleResult::from_counts("a", 100, 100, 90.0);
        let rb = QualityRuleResult::from_counts("b", 100, 50, 90.0);
        let rc = QualityRuleResult::degraded("c", "boom");

        let card = QualityScorecard::compute([(&critical, &ra), (&low, &rb), (&broken, &rc)]);
        assert_eq!(card.evaluated, 3);
        assert_eq!(card.passed, 1);
        assert_eq!(card.failed, 1);
        assert_eq!(card.degraded, 1);
        // (4 * 100 + 1 * 50) / 5
        assert!((card.weighted_score.unwrap() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_degraded_has_no_score() {
        let rule = QualityRule::new("a", "t", "x > 0", 90.0);
        let result = QualityRuleResult::degraded("a", "boom");
        let card = QualityScorecard::compute([(&rule, &result)]);
        assert_eq!(card.weighted_score, None);
    }
}
