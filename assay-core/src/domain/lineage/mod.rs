// assay-core/src/domain/lineage/mod.rs
//
// Multi-step lineage: how many records each transformation step keeps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct LineageStep {
    pub order: u32,

    #[validate(length(min = 1, message = "source table cannot be empty"))]
    pub source_table: String,

    #[validate(length(min = 1, message = "target table cannot be empty"))]
    pub target_table: String,

    #[serde(default)]
    pub transformation_type: String,

    /// Opaque transformation text handed to the runner.
    #[serde(default)]
    pub transformation_logic: String,
}

impl LineageStep {
    pub fn new(order: u32, source_table: impl Into<String>, target_table: impl Into<String>) -> Self {
        Self {
            order,
            source_table: source_table.into(),
            target_table: target_table.into(),
            transformation_type: String::new(),
            transformation_logic: String::new(),
        }
    }

    pub fn with_logic(mut self, transformation_type: impl Into<String>, logic: impl Into<String>) -> Self {
        self.transformation_type = transformation_type.into();
        self.transformation_logic = logic.into();
        self
    }
}

/// A named lineage run (the id keys every persisted row).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct LineagePlan {
    #[validate(length(min = 1, message = "transformation id cannot be empty"))]
    pub transformation_id: String,

    #[validate(nested)]
    #[serde(default)]
    pub steps: Vec<LineageStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineageStepResult {
    pub step_order: u32,
    pub source_table: String,
    pub target_table: String,
    pub before_count: u64,
    pub after_count: u64,
    pub retention_rate: f64,
    pub recorded_at: DateTime<Utc>,
    /// Transformation or count failure; the counts above are whatever was observable.
    pub error: Option<String>,
}

impl LineageStepResult {
    pub fn new(step: &LineageStep, before_count: u64, after_count: u64, error: Option<String>) -> Self {
        Self {
            step_order: step.order,
            source_table: step.source_table.clone(),
            target_table: step.target_table.clone(),
            before_count,
            after_count,
            retention_rate: retention_rate(before_count, after_count),
            recorded_at: Utc::now(),
            error,
        }
    }
}

/// `after / before * 100`, clamped to [0, 100]; 0 when nothing went in.
pub fn retention_rate(before: u64, after: u64) -> f64 {
    if before == 0 {
        return 0.0;
    }
    (after as f64 / before as f64 * 100.0).clamp(0.0, 100.0)
}
