// assay-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::ValueRef;
use duckdb::{Config, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// Imports Hexagonaux
use crate::error::AssayError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{Connector, Row, SqlValue, is_select_shaped};

pub struct DuckDBConnector {
    conn: Arc<Mutex<Connection>>,
}

/// Path understood as "no file, keep everything in memory".
pub const IN_MEMORY: &str = ":memory:";

impl DuckDBConnector {
    /// Opens (or creates) the database file, or an in-memory one for `":memory:"`.
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        if db_path == IN_MEMORY {
            return Self::in_memory();
        }
        let conn = Connection::open_with_flags(db_path, Config::default())?;
        Ok(Self::wrap(conn))
    }

    pub fn in_memory() -> Result<Self, InfrastructureError> {
        Ok(Self::wrap(Connection::open_in_memory()?))
    }

    fn wrap(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, AssayError> {
        self.conn
            .lock()
            .map_err(|_| AssayError::Infrastructure(DatabaseError::Poisoned.into()))
    }

    fn fetch_rows(conn: &Connection, query: &str) -> Result<Vec<Row>, duckdb::Error> {
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;
        let column_count = rows.as_ref().map(|s| s.column_count()).unwrap_or(0);

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                values.push(to_sql_value(row.get_ref(idx)?));
            }
            out.push(Row::new(values));
        }
        Ok(out)
    }
}

fn to_sql_value(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Boolean(b) => SqlValue::Bool(b),
        ValueRef::TinyInt(i) => SqlValue::Int(i64::from(i)),
        ValueRef::SmallInt(i) => SqlValue::Int(i64::from(i)),
        ValueRef::Int(i) => SqlValue::Int(i64::from(i)),
        ValueRef::BigInt(i) => SqlValue::Int(i),
        ValueRef::HugeInt(i) => i64::try_from(i)
            .map(SqlValue::Int)
            .unwrap_or(SqlValue::Float(i as f64)),
        ValueRef::UTinyInt(i) => SqlValue::Int(i64::from(i)),
        ValueRef::USmallInt(i) => SqlValue::Int(i64::from(i)),
        ValueRef::UInt(i) => SqlValue::Int(i64::from(i)),
        ValueRef::UBigInt(i) => i64::try_from(i)
            .map(SqlValue::Int)
            .unwrap_or(SqlValue::Float(i as f64)),
        ValueRef::Float(f) => SqlValue::Float(f64::from(f)),
        ValueRef::Double(f) => SqlValue::Float(f),
        ValueRef::Decimal(d) => d
            .to_string()
            .parse::<f64>()
            .map(SqlValue::Float)
            .unwrap_or_else(|_| SqlValue::Text(d.to_string())),
        ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        // Dates, intervals, nested types: queries cast what they need to VARCHAR.
        other => SqlValue::Text(format!("{:?}", other)),
    }
}

#[async_trait]
impl Connector for DuckDBConnector {
    async fn execute_query(&self, query: &str) -> Result<Vec<Row>, AssayError> {
        let conn = self.lock()?;

        if is_select_shaped(query) {
            return Self::fetch_rows(&conn, query).map_err(AssayError::from);
        }

        let affected = conn.execute(query, [])?;
        Ok(vec![Row::new(vec![SqlValue::Int(affected as i64)])])
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
