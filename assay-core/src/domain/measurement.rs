// assay-core/src/domain/measurement.rs

use serde::{Deserialize, Serialize};

/// Outcome of a data-health measurement.
///
/// `Degraded` means the check itself failed (query error, missing table...),
/// which is different from a measured value of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Measurement<T> {
    Measured(T),
    Degraded(String),
}

impl<T> Measurement<T> {
    pub fn from_error(value: T, error: Option<&str>) -> Self {
        match error {
            Some(reason) => Measurement::Degraded(reason.to_string()),
            None => Measurement::Measured(value),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Measurement::Degraded(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Measurement::Measured(v) => Some(v),
            Measurement::Degraded(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Measurement::Measured(_) => None,
            Measurement::Degraded(r) => Some(r),
        }
    }
}
