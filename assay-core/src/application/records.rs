// assay-core/src/application/records.rs
//
// One fixed-order record per query shape. Positional row access stays here.

use crate::domain::error::DomainError;
use crate::ports::connector::{FromRow, Row};

/// `SELECT COUNT(*) ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRecord(pub u64);

impl FromRow for CountRecord {
    fn from_row(row: &Row) -> Result<Self, DomainError> {
        Ok(Self(row.count(0)?))
    }
}

/// `SELECT column_name, data_type ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRecord {
    pub name: String,
    pub data_type: String,
}

impl FromRow for ColumnRecord {
    fn from_row(row: &Row) -> Result<Self, DomainError> {
        let name = row
            .text(0)?
            .ok_or_else(|| DomainError::RowShape("column name is NULL".into()))?;
        Ok(Self {
            name,
            data_type: row.text(1)?.unwrap_or_default(),
        })
    }
}

/// `SELECT COUNT(*), COUNT(col), COUNT(DISTINCT col) ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonStatsRecord {
    pub total: u64,
    pub non_null: u64,
    pub distinct: u64,
}

impl FromRow for CommonStatsRecord {
    fn from_row(row: &Row) -> Result<Self, DomainError> {
        Ok(Self {
            total: row.count(0)?,
            non_null: row.count(1)?,
            distinct: row.count(2)?,
        })
    }
}

/// `SELECT MIN(len), MAX(len), AVG(len) ...` (all NULL on an empty set)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthStatsRecord {
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub avg: Option<f64>,
}

impl FromRow for LengthStatsRecord {
    fn from_row(row: &Row) -> Result<Self, DomainError> {
        Ok(Self {
            min: row.float(0)?.map(|v| v.max(0.0) as u64),
            max: row.float(1)?.map(|v| v.max(0.0) as u64),
            avg: row.float(2)?,
        })
    }
}

/// `SELECT CAST(MIN(col) AS VARCHAR), CAST(MAX(col) AS VARCHAR) ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsRecord {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl FromRow for BoundsRecord {
    fn from_row(row: &Row) -> Result<Self, DomainError> {
        Ok(Self {
            min: row.text(0)?,
            max: row.text(1)?,
        })
    }
}

/// `SELECT COUNT(future), COUNT(too_old) ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindowRecord {
    pub future: u64,
    pub too_old: u64,
}

impl FromRow for DateWindowRecord {
    fn from_row(row: &Row) -> Result<Self, DomainError> {
        Ok(Self {
            future: row.count(0)?,
            too_old: row.count(1)?,
        })
    }
}
