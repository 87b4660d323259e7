// assay-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Query '{name}' not found in '{file}'. Available: [{}]", .available.join(", "))]
    #[diagnostic(
        code(assay::domain::query_not_found),
        help("Check the '@name:' annotations of the template file.")
    )]
    QueryNotFound {
        name: String,
        file: String,
        available: Vec<String>,
    },

    #[error("No template file loaded and none specified")]
    #[diagnostic(
        code(assay::domain::no_template),
        help("Load a template file first or pass the file name explicitly.")
    )]
    NoTemplateLoaded,

    #[error("Unexpected result shape: {0}")]
    #[diagnostic(
        code(assay::domain::row_shape),
        help("The query's column order does not match the record it is read into.")
    )]
    RowShape(String),

    #[error("Invalid specification: {0}")]
    #[diagnostic(code(assay::domain::spec))]
    InvalidSpec(String),
}
