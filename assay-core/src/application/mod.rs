// assay-core/src/application/mod.rs

pub mod engine;
pub mod lineage;
pub mod profiler;
pub mod quality;
pub mod queries;
pub mod records;
pub mod report;
pub mod structure;
pub mod suite;

#[cfg(test)]
pub(crate) mod testing;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI peut faire :
// `use assay_core::application::{run_suite, ReportGenerator};`
// sans connaître la structure interne des fichiers.

pub use engine::execute_query;
pub use lineage::{DEFAULT_LINEAGE_TABLE, LineageTracker, SqlTransformation};
pub use profiler::ColumnProfiler;
pub use quality::QualityRuleEvaluator;
pub use queries::QueryCatalog;
pub use report::{ReportGenerator, RuleOutcome, SuiteReport};
pub use structure::StructureValidator;
pub use suite::run_suite;
