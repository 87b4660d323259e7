// assay-core/src/ports/connector.rs

// This file defines what the core needs from the warehouse, without knowing how it's done.
// The caller owns the connection; the core only sends text and reads rows back.

use crate::domain::error::DomainError;
use crate::error::AssayError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell, independent of the engine that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int(i) => Some(*i),
            SqlValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            SqlValue::Bool(b) => Some(i64::from(*b)),
            SqlValue::Text(s) => s.trim().parse().ok(),
            SqlValue::Null | SqlValue::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Int(i) => Some(*i as f64),
            SqlValue::Float(f) => Some(*f),
            SqlValue::Text(s) => s.trim().parse().ok(),
            SqlValue::Null | SqlValue::Bool(_) => None,
        }
    }

    /// String form, `None` for NULL.
    pub fn as_text(&self) -> Option<String> {
        match self {
            SqlValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Int(i) => write!(f, "{}", i),
            SqlValue::Float(x) => write!(f, "{}", x),
            SqlValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One result row. Values keep the column order chosen by the query author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<SqlValue>,
}

impl Row {
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&SqlValue> {
        self.values.get(idx)
    }

    fn cell(&self, idx: usize) -> Result<&SqlValue, DomainError> {
        self.values.get(idx).ok_or_else(|| {
            DomainError::RowShape(format!(
                "column #{} requested but the row only has {}",
                idx,
                self.values.len()
            ))
        })
    }

    /// Integer cell. NULL reads as 0 (aggregates over empty sets).
    pub fn count(&self, idx: usize) -> Result<u64, DomainError> {
        let cell = self.cell(idx)?;
        if cell.is_null() {
            return Ok(0);
        }
        cell.as_i64()
            .map(|v| v.max(0) as u64)
            .ok_or_else(|| DomainError::RowShape(format!("column #{} is not a count: {}", idx, cell)))
    }

    pub fn float(&self, idx: usize) -> Result<Option<f64>, DomainError> {
        let cell = self.cell(idx)?;
        if cell.is_null() {
            return Ok(None);
        }
        cell.as_f64()
            .map(Some)
            .ok_or_else(|| DomainError::RowShape(format!("column #{} is not numeric: {}", idx, cell)))
    }

    pub fn text(&self, idx: usize) -> Result<Option<String>, DomainError> {
        Ok(self.cell(idx)?.as_text())
    }
}

/// A fixed-order record read from one result row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, DomainError>;
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Runs one statement. SELECT-shaped statements return their rows; anything
    /// else returns a single row holding the affected-row count.
    async fn execute_query(&self, query: &str) -> Result<Vec<Row>, AssayError>;

    fn engine_name(&self) -> &str;
}

/// Statements answered with a result set rather than an affected-row count.
pub fn is_select_shaped(query: &str) -> bool {
    const SELECT_KEYWORDS: [&str; 10] = [
        "SELECT", "WITH", "PRAGMA", "DESCRIBE", "SHOW", "VALUES", "FROM", "EXPLAIN", "SUMMARIZE",
        "TABLE",
    ];

    let first = query
        .trim_start_matches(|c: char| c.is_whitespace() || c == '(')
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
        .to_uppercase();

    SELECT_KEYWORDS.contains(&first.as_str())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_select_shape_detection() {
        assert!(is_select_shaped("SELECT 1"));
        assert!(is_select_shaped("  with t as (select 1) select * from t"));
        assert!(is_select_shaped("(SELECT 1)"));
        assert!(!is_select_shaped("INSERT INTO t VALUES (1)"));
        assert!(!is_select_shaped("CREATE TABLE t (id INTEGER)"));
        assert!(!is_select_shaped(""));
    }

    #[test]
    fn test_row_count_reads_null_as_zero() {
        let row = Row::new(vec![SqlValue::Null, SqlValue::Int(12), SqlValue::Text("7".into())]);
        assert_eq!(row.count(0).unwrap(), 0);
        assert_eq!(row.count(1).unwrap(), 12);
        assert_eq!(row.count(2).unwrap(), 7);
    }

    #[test]
    fn test_row_shape_errors() {
        let row = Row::new(vec![SqlValue::Text("abc".into())]);
        assert!(matches!(row.count(0), Err(DomainError::RowShape(_))));
        assert!(matches!(row.count(3), Err(DomainError::RowShape(_))));
        assert_eq!(row.text(0).unwrap(), Some("abc".to_string()));
    }
}
