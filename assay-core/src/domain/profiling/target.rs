// assay-core/src/domain/profiling/target.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::domain::profiling::semantic::SemanticMarker;

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProfilingTarget {
    #[validate(length(min = 1, message = "table cannot be empty"))]
    pub table: String,

    #[validate(length(min = 1, message = "column cannot be empty"))]
    pub column: String,

    /// Declared warehouse type (`VARCHAR2(50)`, `DATE`, `NUMBER(10,2)`...).
    pub data_type: String,

    /// Free-form business tags. A tag naming a semantic marker (`email`)
    /// forces that marker.
    #[serde(default)]
    pub business_rules: Vec<String>,
}

impl ProfilingTarget {
    pub fn new(table: impl Into<String>, column: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            data_type: data_type.into(),
            business_rules: Vec::new(),
        }
    }

    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.business_rules = rules.into_iter().map(Into::into).collect();
        self
    }

    pub fn family(&self) -> TypeFamily {
        TypeFamily::from_declared(&self.data_type)
    }

    /// `TIME`, `TIMETZ`, `TIME WITH[OUT] TIME ZONE`: a time of day with no
    /// calendar date, so it has no place on the future/horizon window.
    pub fn is_time_of_day(&self) -> bool {
        let upper = self.data_type.trim().to_uppercase();
        let base = upper.split('(').next().unwrap_or_default().trim();
        base == "TIME" || base == "TIMETZ" || base.starts_with("TIME WITH")
    }

    pub fn semantic_marker(&self) -> Option<SemanticMarker> {
        self.business_rules
            .iter()
            .find_map(|tag| SemanticMarker::from_tag(tag))
            .or_else(|| SemanticMarker::detect(&self.column))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFamily {
    String,
    DateTime,
    Numeric,
}

impl TypeFamily {
    pub fn from_declared(data_type: &str) -> Self {
        let upper = data_type.to_uppercase();
        let base = upper.split('(').next().unwrap_or_default().trim();

        const STRING_MARKERS: [&str; 4] = ["CHAR", "TEXT", "STRING", "CLOB"];
        if STRING_MARKERS.iter().any(|m| base.contains(m)) || base == "VARCHAR2" {
            return Self::String;
        }
        if base.contains("DATE") || base.contains("TIME") {
            return Self::DateTime;
        }
        Self::Numeric
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::Numeric => "numeric",
        }
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_families() {
        assert_eq!(TypeFamily::from_declared("VARCHAR2(50)"), TypeFamily::String);
        assert_eq!(TypeFamily::from_declared("nvarchar"), TypeFamily::String);
        assert_eq!(TypeFamily::from_declared("TEXT"), TypeFamily::String);
        assert_eq!(TypeFamily::from_declared("DATE"), TypeFamily::DateTime);
        assert_eq!(TypeFamily::from_declared("TIMESTAMP WITH TIME ZONE"), TypeFamily::DateTime);
        assert_eq!(TypeFamily::from_declared("NUMBER(10,2)"), TypeFamily::Numeric);
        assert_eq!(TypeFamily::from_declared("BIGINT"), TypeFamily::Numeric);
    }

    #[test]
    fn test_time_of_day_types() {
        for declared in ["TIME", "time(3)", "TIMETZ", "TIME WITH TIME ZONE", "TIME WITHOUT TIME ZONE"] {
            let target = ProfilingTarget::new("t", "c", declared);
            assert_eq!(target.family(), TypeFamily::DateTime, "{}", declared);
            assert!(target.is_time_of_day(), "{}", declared);
        }
        for declared in ["TIMESTAMP", "TIMESTAMPTZ", "DATE", "DATETIME"] {
            assert!(!ProfilingTarget::new("t", "c", declared).is_time_of_day(), "{}", declared);
        }
    }

    #[test]
    fn test_marker_from_tag_wins() {
        let by_name = ProfilingTarget::new("t", "contact_email", "VARCHAR");
        assert_eq!(by_name.semantic_marker(), Some(SemanticMarker::Email));

        let by_tag = ProfilingTarget::new("t", "c42", "VARCHAR").with_rules(["phone"]);
        assert_eq!(by_tag.semantic_marker(), Some(SemanticMarker::Phone));

        let none = ProfilingTarget::new("t", "label", "VARCHAR");
        assert_eq!(none.semantic_marker(), None);
    }
}
