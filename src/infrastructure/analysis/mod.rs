//! Analysis collaborator
//!
//! Downstream stand-in for the model that comments on an accepted
//! upload. The pipeline never depends on a concrete implementation;
//! hosts inject whatever client they run. The simulated client is
//! deterministic and derives its commentary from the preview alone,
//! with no inference and no network.

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::upload::AcceptedUpload;

#[async_trait]
pub trait AnalysisClient {
    /// Produce conversational commentary for an accepted upload
    async fn commentary(&self, upload: &AcceptedUpload) -> Result<String>;
}

/// Canned commentary generator standing in for a real model
pub struct SimulatedAnalysisClient;

#[async_trait]
impl AnalysisClient for SimulatedAnalysisClient {
    async fn commentary(&self, upload: &AcceptedUpload) -> Result<String> {
        let columns = upload
            .preview
            .header()
            .map(|h| h.join(", "))
            .unwrap_or_default();
        let column_count = upload.preview.header().map(|h| h.len()).unwrap_or(0);
        let data_rows = upload.total_rows.saturating_sub(1);

        Ok(format!(
            "I've taken a look at '{}': {} column(s) ({}) across {} data row(s). \
             The preview looks clean. Ask me anything about this data!",
            upload.file.name, column_count, columns, data_rows
        ))
    }
}
