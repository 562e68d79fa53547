//! Supplier and prompter trait definitions.

use std::sync::Arc;

use async_trait::async_trait;

use crate::deletable::Deletable;
use crate::filter::NameFilter;

use super::errors::ListError;

/// Lists the resources of one type in one account.
///
/// Each provider resource kind implements this. Only resources whose names
/// pass `filter` are returned.
#[async_trait]
pub trait ResourceSupplier: Send + Sync {
    /// The type tag shared by every resource this supplier returns.
    fn resource_type(&self) -> &str;

    async fn list(&self, filter: &NameFilter) -> Result<Vec<Arc<dyn Deletable>>, ListError>;
}

/// Asks the operator whether a listed resource should be deleted.
pub trait Prompter: Send + Sync {
    fn confirm(&self, resource_type: &str, name: &str) -> bool;
}

/// Confirms everything without asking (`--no-confirm`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm(&self, _resource_type: &str, _name: &str) -> bool {
        true
    }
}
