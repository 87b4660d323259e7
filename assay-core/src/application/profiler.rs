// assay-core/src/application/profiler.rs

use chrono::{DateTime, Months, Utc};
use tracing::{debug, info, instrument, warn};

use crate::application::engine::fetch_one;
use crate::application::queries::QueryCatalog;
use crate::application::records::{
    BoundsRecord, CommonStatsRecord, CountRecord, DateWindowRecord, LengthStatsRecord,
};
use crate::domain::profiling::{ProfileResult, ProfilingTarget, TypeFamily, compliance_percent};
use crate::domain::sql::Quoter;
use crate::domain::template::Params;
use crate::error::AssayError;
use crate::ports::connector::Connector;

/// Values older than this many months are out of the plausible window.
const DATE_HORIZON_MONTHS: u32 = 120;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Per-column statistics, with type-family specific checks on top of the
/// common counts.
pub struct ColumnProfiler<'a> {
    connector: &'a dyn Connector,
    queries: &'a QueryCatalog,
    reference_time: Option<DateTime<Utc>>,
}

impl<'a> ColumnProfiler<'a> {
    pub fn new(connector: &'a dyn Connector) -> Self {
        Self {
            connector,
            queries: QueryCatalog::builtin_only(),
            reference_time: None,
        }
    }

    /// Serves SQL from `queries` instead of the built-ins alone.
    pub fn with_queries(mut self, queries: &'a QueryCatalog) -> Self {
        self.queries = queries;
        self
    }

    /// Fixes "now" for the date window (defaults to the wall clock).
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    #[instrument(skip(self, target), fields(table = %target.table, column = %target.column))]
    pub async fn profile(&self, target: &ProfilingTarget) -> ProfileResult {
        match self.run(target).await {
            Ok(result) => {
                info!(
                    family = %result.family,
                    total = result.total_count,
                    nulls = result.null_count,
                    compliance = result.pattern_compliance,
                    anomalies = result.anomaly_count,
                    "📊 Profiled {}.{}",
                    target.table,
                    target.column
                );
                result
            }
            Err(e) => {
                warn!("Profiling {}.{} failed: {}", target.table, target.column, e);
                ProfileResult::degraded(target, e.to_string())
            }
        }
    }

    pub async fn profile_all(&self, targets: &[ProfilingTarget]) -> Vec<ProfileResult> {
        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            results.push(self.profile(target).await);
        }
        results
    }

    async fn run(&self, target: &ProfilingTarget) -> Result<ProfileResult, AssayError> {
        let params = Params::new()
            .with("table", Quoter::table(&target.table))
            .with("column", Quoter::identifier(&target.column));

        let stats: CommonStatsRecord =
            fetch_one(self.connector, &self.queries.query("column_common_stats", &params)?).await?;
        let mut result = ProfileResult::base(target, stats.total, stats.non_null, stats.distinct);

        match result.family {
            TypeFamily::String => self.profile_string(target, &params, &mut result).await?,
            TypeFamily::DateTime => self.profile_dates(target, &params, &mut result).await?,
            // Common counts only
            TypeFamily::Numeric => {}
        }
        Ok(result)
    }

    async fn profile_string(
        &self,
        target: &ProfilingTarget,
        params: &Params,
        result: &mut ProfileResult,
    ) -> Result<(), AssayError> {
        let lengths: LengthStatsRecord =
            fetch_one(self.connector, &self.queries.query("string_length_stats", params)?).await?;
        result.min_value = lengths.min.map(|v| v.to_string());
        result.max_value = lengths.max.map(|v| v.to_string());
        result.avg_length = lengths.avg;

        let non_null = result.non_null_count();
        if non_null == 0 {
            return Ok(());
        }

        // Matched in the warehouse: one count, whatever the cardinality
        if let Some(marker) = target.semantic_marker() {
            let pattern_params = params
                .clone()
                .with("pattern", Quoter::literal(marker.pattern().as_str()));
            let CountRecord(matching) =
                fetch_one(self.connector, &self.queries.query("pattern_matches", &pattern_params)?).await?;
            result.pattern_compliance = compliance_percent(matching, non_null);
            debug!(marker = marker.as_str(), compliance = result.pattern_compliance, "Pattern check");
        }

        let dominant_params = params.clone().with("total", result.total_count.to_string());
        let CountRecord(dominant) =
            fetch_one(self.connector, &self.queries.query("dominant_values", &dominant_params)?).await?;
        result.anomaly_count = dominant;
        Ok(())
    }

    async fn profile_dates(
        &self,
        target: &ProfilingTarget,
        params: &Params,
        result: &mut ProfileResult,
    ) -> Result<(), AssayError> {
        let bounds: BoundsRecord = fetch_one(self.connector, &self.queries.query("date_bounds", params)?).await?;
        result.min_value = bounds.min;
        result.max_value = bounds.max;

        // No calendar date to compare: bounds only
        if target.is_time_of_day() {
            debug!(data_type = %target.data_type, "Time of day, date window skipped");
            return Ok(());
        }

        let now = self.reference_time.unwrap_or_else(Utc::now);
        let horizon = now
            .checked_sub_months(Months::new(DATE_HORIZON_MONTHS))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let window_params = params
            .clone()
            .with("now", Quoter::literal(&now.format(TIMESTAMP_FORMAT).to_string()))
            .with("horizon", Quoter::literal(&horizon.format(TIMESTAMP_FORMAT).to_string()));
        let window: DateWindowRecord =
            fetch_one(self.connector, &self.queries.query("date_window", &window_params)?).await?;

        let non_null = result.non_null_count();
        let out_of_window = window.future + window.too_old;
        result.anomaly_count = out_of_window;
        result.pattern_compliance = compliance_percent(non_null.saturating_sub(out_of_window), non_null);
        Ok(())
    }
}
