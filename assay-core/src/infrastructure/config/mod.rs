pub mod suite;

pub use suite::{SuiteConfig, load_suite_config, parse_suite};
