// assay-core/src/domain/structure/result.rs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::structure::pattern::match_pattern;
use crate::domain::structure::spec::TableSpec;

/// Everything kept around for debugging a structural check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationDetails {
    /// Actual columns, in ordinal order.
    pub columns: Vec<String>,
    pub column_types: BTreeMap<String, String>,
    /// Pattern -> columns it matched.
    pub pattern_matches: BTreeMap<String, Vec<String>>,
    pub column_count_ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub table_id: String,
    pub schema_id: String,
    pub valid: bool,
    pub column_count: usize,
    pub expected_min: usize,
    pub expected_max: Option<usize>,
    pub missing_critical_columns: Vec<String>,
    pub missing_patterns: Vec<String>,
    pub details: ValidationDetails,
    pub error: Option<String>,
}

impl ValidationResult {
    fn empty(spec: &TableSpec) -> Self {
        Self {
            table_id: spec.table_id.clone(),
            schema_id: spec.schema_id.clone(),
            valid: false,
            column_count: 0,
            expected_min: spec.min_columns,
            expected_max: spec.max_columns,
            missing_critical_columns: Vec::new(),
            missing_patterns: Vec::new(),
            details: ValidationDetails::default(),
            error: None,
        }
    }

    /// The table does not exist: every critical column and pattern is missing.
    pub fn table_missing(spec: &TableSpec) -> Self {
        Self {
            missing_critical_columns: spec.critical_columns.clone(),
            missing_patterns: spec.column_patterns.clone(),
            error: Some(format!(
                "Table {}.{} does not exist",
                spec.schema_id, spec.table_id
            )),
            ..Self::empty(spec)
        }
    }

    /// The metadata could not be read at all.
    pub fn failed(spec: &TableSpec, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::empty(spec)
        }
    }

    /// Checks ordered `(name, type)` pairs against the `TableSpec`.
    pub fn evaluate(spec: &TableSpec, columns: &[(String, String)]) -> Self {
        let names: Vec<String> = columns.iter().map(|(name, _)| name.clone()).collect();
        let column_types: BTreeMap<String, String> = columns.iter().cloned().collect();
        let present: HashSet<&str> = names.iter().map(String::as_str).collect();

        let column_count_ok = spec.column_count_in_range(names.len());

        let missing_critical_columns: Vec<String> = spec
            .critical_columns
            .iter()
            .filter(|c| !present.contains(c.as_str()))
            .cloned()
            .collect();

        let mut pattern_matches = BTreeMap::new();
        let mut missing_patterns = Vec::new();
        for pattern in &spec.column_patterns {
            let matches = match_pattern(pattern, &names);
            if matches.is_empty() {
                missing_patterns.push(pattern.clone());
            }
            pattern_matches.insert(pattern.clone(), matches);
        }

        let valid = column_count_ok && missing_critical_columns.is_empty() && missing_patterns.is_empty();

        Self {
            valid,
            column_count: names.len(),
            missing_critical_columns,
            missing_patterns,
            details: ValidationDetails {
                columns: names,
                column_types,
                pattern_matches,
                column_count_ok,
            },
            ..Self::empty(spec)
        }
    }
}
