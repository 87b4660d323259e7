// assay-core/src/domain/quality/rule.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::domain::sql::Quoter;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Weight in the aggregate scorecard.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 3.0,
            Self::Critical => 4.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct QualityRule {
    #[validate(length(min = 1, message = "rule name cannot be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "target table cannot be empty"))]
    pub table: String,

    /// When set, `condition` is applied to this column (`"col" IS NOT NULL`).
    #[serde(default)]
    pub column: Option<String>,

    /// SQL predicate text, opaque to the core.
    #[validate(length(min = 1, message = "condition cannot be empty"))]
    pub condition: String,

    /// Minimum score (percent) for the rule to pass.
    #[validate(range(min = 0.0, max = 100.0))]
    pub threshold: f64,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub description: Option<String>,
}

impl QualityRule {
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        condition: impl Into<String>,
        threshold: f64,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            column: None,
            condition: condition.into(),
            threshold,
            severity: Severity::default(),
            description: None,
        }
    }

    pub fn on_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The WHERE clause selecting the records that satisfy the rule.
    pub fn predicate(&self) -> String {
        match &self.column {
            Some(column) => format!("{} {}", Quoter::identifier(column), self.condition.trim()),
            None => self.condition.trim().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Critical);
        assert!(Severity::High.weight() > Severity::Medium.weight());
    }

    #[test]
    fn test_predicate_scoping() {
        let scoped = QualityRule::new("nn", "t", "IS NOT NULL", 99.5).on_column("email");
        assert_eq!(scoped.predicate(), "\"email\" IS NOT NULL");

        let bare = QualityRule::new("pos", "t", " amount > 0 ", 90.0);
        assert_eq!(bare.predicate(), "amount > 0");
    }

    #[test]
    fn test_rule_from_yaml() -> Result<()> {
        let yaml = "name: email_present\ntable: stg_users\ncolumn: email\ncondition: IS NOT NULL\nthreshold: 99.5\nseverity: critical\n";
        let rule: QualityRule = serde_yaml::from_str(yaml)?;
        assert_eq!(rule.severity, Severity::Critical);
        assert_eq!(rule.column.as_deref(), Some("email"));
        assert!(rule.validate().is_ok());

        let out_of_range = QualityRule::new("r", "t", "x > 0", 150.0);
        assert!(out_of_range.validate().is_err());
        Ok(())
    }
}
