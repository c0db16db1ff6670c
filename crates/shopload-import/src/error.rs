use shopload_admin::AdminError;
use thiserror::Error;

/// Failures that end an import run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read workbook: {0}")]
    Workbook(String),

    /// Listing or deleting existing products failed before any row was
    /// processed.
    #[error("catalog purge failed: {0}")]
    Purge(#[source] AdminError),
}

/// Why one remote step of a row did not complete.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Remote(#[from] AdminError),

    #[error("product {product_id} was created without a default variant")]
    MissingDefaultVariant { product_id: u64 },

    #[error("variant {variant_id} has no inventory item")]
    MissingInventoryItem { variant_id: u64 },
}

impl StepError {
    /// The store's structured error body, if the step was rejected remotely.
    #[must_use]
    pub fn response_body(&self) -> Option<&serde_json::Value> {
        match self {
            StepError::Remote(err) => err.response_body(),
            StepError::MissingDefaultVariant { .. } | StepError::MissingInventoryItem { .. } => {
                None
            }
        }
    }
}
