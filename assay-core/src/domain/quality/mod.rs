// assay-core/src/domain/quality/mod.rs

pub mod result;
pub mod rule;
pub mod scorecard;

pub use result::QualityRuleResult;
pub use rule::{QualityRule, Severity};
pub use scorecard::QualityScorecard;
