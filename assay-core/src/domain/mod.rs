pub mod error;
pub mod lineage;
pub mod measurement;
pub mod profiling;
pub mod quality;
pub mod sql;
pub mod structure;
pub mod template;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use measurement::Measurement;
