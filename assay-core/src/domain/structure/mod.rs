// assay-core/src/domain/structure/mod.rs

pub mod pattern;
pub mod result;
pub mod spec;

pub use pattern::{match_pattern, pattern_prefix};
pub use result::{ValidationDetails, ValidationResult};
pub use spec::TableSpec;
