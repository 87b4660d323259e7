// assay-core/src/application/testing.rs
//
// Compile-time-checked fakes for the ports, shared by the use-case tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::lineage::LineageStep;
use crate::error::AssayError;
use crate::ports::connector::{Connector, Row, SqlValue};
use crate::ports::transformation::TransformationRunner;

type Answer = Result<Vec<Vec<SqlValue>>, String>;

/// Answers queries by substring match, first registered pattern wins.
/// Unscripted queries fail like an unknown table would.
pub(crate) struct ScriptedConnector {
    answers: Vec<(String, Answer)>,
    pub executed: Mutex<Vec<String>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self {
            answers: Vec::new(),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, pattern: &str, rows: Vec<Vec<SqlValue>>) -> Self {
        self.answers.push((pattern.to_string(), Ok(rows)));
        self
    }

    pub fn fail_on(mut self, pattern: &str, message: &str) -> Self {
        self.answers.push((pattern.to_string(), Err(message.to_string())));
        self
    }

    #[allow(clippy::unwrap_used)]
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn execute_query(&self, query: &str) -> Result<Vec<Row>, AssayError> {
        if let Ok(mut log) = self.executed.lock() {
            log.push(query.to_string());
        }

        let answer = self
            .answers
            .iter()
            .find(|(pattern, _)| query.contains(pattern.as_str()))
            .map(|(_, answer)| answer.clone())
            .unwrap_or_else(|| Err(format!("Catalog Error: no scripted answer for '{}'", query)));

        answer
            .map(|rows| rows.into_iter().map(Row::new).collect())
            .map_err(AssayError::InternalError)
    }

    fn engine_name(&self) -> &str {
        "scripted"
    }
}

pub(crate) fn int(v: i64) -> SqlValue {
    SqlValue::Int(v)
}

pub(crate) fn text(v: &str) -> SqlValue {
    SqlValue::Text(v.to_string())
}

/// Records which steps ran; fails the steps listed in `failing`.
pub(crate) struct RecordingRunner {
    pub failing: Vec<u32>,
    pub ran: Mutex<Vec<u32>>,
}

impl RecordingRunner {
    pub fn new(failing: Vec<u32>) -> Self {
        Self {
            failing,
            ran: Mutex::new(Vec::new()),
        }
    }

    #[allow(clippy::unwrap_used)]
    pub fn ran(&self) -> Vec<u32> {
        self.ran.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransformationRunner for RecordingRunner {
    async fn run(&self, step: &LineageStep) -> Result<(), AssayError> {
        if let Ok(mut ran) = self.ran.lock() {
            ran.push(step.order);
        }
        if self.failing.contains(&step.order) {
            return Err(AssayError::InternalError(format!(
                "transformation for step {} blew up",
                step.order
            )));
        }
        Ok(())
    }
}
