// assay-core/src/ports/mod.rs

pub mod connector;
pub mod transformation;

pub use connector::{Connector, FromRow, Row, SqlValue};
pub use transformation::TransformationRunner;
