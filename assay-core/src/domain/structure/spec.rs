// assay-core/src/domain/structure/spec.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Declarative description of what a warehouse table must look like.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_column_bounds"))]
pub struct TableSpec {
    #[validate(length(min = 1, message = "table id cannot be empty"))]
    pub table_id: String,

    #[serde(default = "default_schema")]
    #[validate(length(min = 1, message = "schema id cannot be empty"))]
    pub schema_id: String,

    #[serde(default)]
    pub min_columns: usize,

    #[serde(default)]
    pub max_columns: Option<usize>,

    /// Columns whose absence alone invalidates the table.
    #[serde(default)]
    pub critical_columns: Vec<String>,

    /// Wildcard-terminated prefixes (`"LIV0EU_*"`), satisfied by any one match.
    #[serde(default)]
    pub column_patterns: Vec<String>,

    #[serde(default)]
    pub description: String,
}

fn default_schema() -> String {
    "main".to_string()
}

fn validate_column_bounds(spec: &TableSpec) -> Result<(), ValidationError> {
    match spec.max_columns {
        Some(max) if max < spec.min_columns => {
            let mut err = ValidationError::new("column_bounds");
            err.message = Some(
                format!(
                    "max_columns ({}) is lower than min_columns ({}) for '{}'",
                    max, spec.min_columns, spec.table_id
                )
                .into(),
            );
            Err(err)
        }
        _ => Ok(()),
    }
}

impl TableSpec {
    pub fn new(table_id: impl Into<String>, schema_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            schema_id: schema_id.into(),
            min_columns: 0,
            max_columns: None,
            critical_columns: Vec::new(),
            column_patterns: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_column_range(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_columns = min;
        self.max_columns = max;
        self
    }

    pub fn with_critical_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.critical_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn column_count_in_range(&self, count: usize) -> bool {
        count >= self.min_columns && self.max_columns.is_none_or(|max| count <= max)
    }
}
