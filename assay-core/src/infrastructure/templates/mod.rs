// assay-core/src/infrastructure/templates/mod.rs

pub mod store;

pub use store::{QuerySpec, TemplateFile, TemplateStore};
