use crate::errors::LeftoversError;

use super::types::{AbandonedResource, Termination};

#[derive(Debug, thiserror::Error)]
pub enum DeletionError {
    #[error("{}", describe_abandoned(.abandoned, .succeeded, .termination))]
    ResourcesAbandoned {
        abandoned: Vec<AbandonedResource>,
        succeeded: usize,
        termination: Termination,
    },
}

impl DeletionError {
    pub fn abandoned(&self) -> &[AbandonedResource] {
        match self {
            DeletionError::ResourcesAbandoned { abandoned, .. } => abandoned,
        }
    }
}

fn describe_abandoned(
    abandoned: &[AbandonedResource],
    succeeded: &usize,
    termination: &Termination,
) -> String {
    let mut message = format!(
        "Failed to delete {} resource(s) ({} deleted, {}):",
        abandoned.len(),
        succeeded,
        termination
    );
    for resource in abandoned {
        message.push_str("\n  - ");
        message.push_str(&resource.to_string());
    }
    message
}

impl LeftoversError for DeletionError {
    fn error_code(&self) -> &'static str {
        match self {
            DeletionError::ResourcesAbandoned { .. } => "DELETION_INCOMPLETE",
        }
    }
}
