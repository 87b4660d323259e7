// assay-core/src/application/quality.rs

use tracing::{info, instrument, warn};

use crate::application::engine::fetch_one;
use crate::application::queries::QueryCatalog;
use crate::application::records::CountRecord;
use crate::domain::quality::{QualityRule, QualityRuleResult};
use crate::domain::sql::Quoter;
use crate::domain::template::Params;
use crate::error::AssayError;
use crate::ports::connector::Connector;

pub struct QualityRuleEvaluator<'a> {
    connector: &'a dyn Connector,
    queries: &'a QueryCatalog,
}

impl<'a> QualityRuleEvaluator<'a> {
    pub fn new(connector: &'a dyn Connector) -> Self {
        Self {
            connector,
            queries: QueryCatalog::builtin_only(),
        }
    }

    /// Serves SQL from `queries` instead of the built-ins alone.
    pub fn with_queries(mut self, queries: &'a QueryCatalog) -> Self {
        self.queries = queries;
        self
    }

    /// Scores one rule. Execution errors give a zeroed result carrying the error.
    #[instrument(skip(self, rule), fields(rule = %rule.name, table = %rule.table))]
    pub async fn evaluate(&self, rule: &QualityRule) -> QualityRuleResult {
        match self.count(rule).await {
            Ok((total, valid)) => {
                let result = QualityRuleResult::from_counts(&rule.name, total, valid, rule.threshold);
                if result.threshold_met {
                    info!(score = result.score, "✅ PASS: {}", rule.name);
                } else {
                    warn!(
                        score = result.score,
                        threshold = rule.threshold,
                        severity = %rule.severity,
                        "❌ FAIL: {}",
                        rule.name
                    );
                }
                result
            }
            Err(e) => {
                warn!("Rule '{}' could not be evaluated: {}", rule.name, e);
                QualityRuleResult::degraded(&rule.name, e.to_string())
            }
        }
    }

    pub async fn evaluate_all(&self, rules: &[QualityRule]) -> Vec<QualityRuleResult> {
        let mut results = Vec::with_capacity(rules.len());
        for rule in rules {
            results.push(self.evaluate(rule).await);
        }
        results
    }

    async fn count(&self, rule: &QualityRule) -> Result<(u64, u64), AssayError> {
        let params = Params::new()
            .with("table", Quoter::table(&rule.table))
            .with("predicate", rule.predicate());

        let CountRecord(total) = fetch_one(self.connector, &self.queries.query("row_count", &params)?).await?;
        if total == 0 {
            return Ok((0, 0));
        }

        let CountRecord(valid) =
            fetch_one(self.connector, &self.queries.query("conditional_count", &params)?).await?;
        Ok((total, valid))
    }
}
