use std::time::Duration;

use crate::errors::LeftoversError;

/// Classified failure of one delete call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteError {
    #[error("Resource not found")]
    NotFound,

    #[error("Resource is still in use: {message}")]
    InUse { message: String },

    #[error("Dependency exists: {message}")]
    DependencyViolation { message: String },

    #[error("Provider error: {message}")]
    Provider { message: String },

    #[error("Delete call timed out after {after:?}")]
    TimedOut { after: Duration },

    #[error("Delete call panicked: {message}")]
    Panicked { message: String },
}

impl DeleteError {
    /// The resource is already gone, which is what the caller wanted.
    pub fn is_already_deleted(&self) -> bool {
        matches!(self, DeleteError::NotFound)
    }
}

impl LeftoversError for DeleteError {
    fn error_code(&self) -> &'static str {
        match self {
            DeleteError::NotFound => "DELETE_NOT_FOUND",
            DeleteError::InUse { .. } => "DELETE_IN_USE",
            DeleteError::DependencyViolation { .. } => "DELETE_DEPENDENCY_VIOLATION",
            DeleteError::Provider { .. } => "DELETE_PROVIDER_ERROR",
            DeleteError::TimedOut { .. } => "DELETE_TIMED_OUT",
            DeleteError::Panicked { .. } => "DELETE_PANICKED",
        }
    }
}
