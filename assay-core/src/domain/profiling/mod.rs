// assay-core/src/domain/profiling/mod.rs

pub mod result;
pub mod semantic;
pub mod target;

pub use result::{ERROR_MARKER, ProfileResult, compliance_percent};
pub use semantic::SemanticMarker;
pub use target::{ProfilingTarget, TypeFamily};
