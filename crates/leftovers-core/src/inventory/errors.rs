use crate::errors::LeftoversError;
use crate::orchestrator::DeletionError;

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Listing {resource_type}: {message}")]
    ListFailed {
        resource_type: String,
        message: String,
    },
}

impl LeftoversError for ListError {
    fn error_code(&self) -> &'static str {
        match self {
            ListError::ListFailed { .. } => "LIST_FAILED",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Unknown resource type '{resource_type}'. Known types: {known}")]
    UnknownResourceType {
        resource_type: String,
        known: String,
    },

    #[error(transparent)]
    Deletion(#[from] DeletionError),
}

impl LeftoversError for InventoryError {
    fn error_code(&self) -> &'static str {
        match self {
            InventoryError::UnknownResourceType { .. } => "UNKNOWN_RESOURCE_TYPE",
            InventoryError::Deletion(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, InventoryError::UnknownResourceType { .. })
    }
}
