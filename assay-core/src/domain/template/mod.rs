// assay-core/src/domain/template/mod.rs

pub mod params;
pub mod parser;

pub use params::{Params, substitute_params};
pub use parser::parse_template;
