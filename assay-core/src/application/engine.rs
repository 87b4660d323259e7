// assay-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

// Imports Hexagonaux
use crate::domain::error::DomainError;
use crate::error::AssayError;
use crate::ports::connector::{Connector, FromRow, Row};

/// Runs one round trip with instrumentation (logs + timing).
/// Every query the core sends goes through here.
#[instrument(skip(connector, query), fields(engine = connector.engine_name(), query.len = query.len()))]
pub async fn execute_query(connector: &dyn Connector, query: &str) -> Result<Vec<Row>, AssayError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = connector.execute_query(query).await;
    let duration = start.elapsed();

    match result {
        Ok(rows) => {
            debug!(rows = rows.len(), "✅ Query finished in {:.2?}", duration);
            Ok(rows)
        }
        Err(e) => {
            // Logged here for the timing context, the caller decides whether to absorb it
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}

/// All rows, each read into `T`.
pub async fn fetch_all<T: FromRow>(connector: &dyn Connector, query: &str) -> Result<Vec<T>, AssayError> {
    let rows = execute_query(connector, query).await?;
    rows.iter()
        .map(|row| T::from_row(row).map_err(AssayError::from))
        .collect()
}

/// First row read into `T`; an empty result is a shape error.
pub async fn fetch_one<T: FromRow>(connector: &dyn Connector, query: &str) -> Result<T, AssayError> {
    let rows = execute_query(connector, query).await?;
    let row = rows
        .first()
        .ok_or_else(|| DomainError::RowShape("query returned no rows".into()))?;
    Ok(T::from_row(row)?)
}
