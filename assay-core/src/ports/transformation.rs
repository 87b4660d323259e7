// assay-core/src/ports/transformation.rs

// The lineage tracker only measures around a step; actually transforming
// data belongs to whoever implements this trait.

use crate::domain::lineage::LineageStep;
use crate::error::AssayError;
use async_trait::async_trait;

#[async_trait]
pub trait TransformationRunner: Send + Sync {
    /// Runs the step so that its target table is populated.
    async fn run(&self, step: &LineageStep) -> Result<(), AssayError>;
}
