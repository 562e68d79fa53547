//! Deletable trait definition.

use async_trait::async_trait;

use super::errors::DeleteError;
use super::types::ResourceId;

/// One concrete cloud resource already selected for deletion.
///
/// Each provider resource kind (network interface, instance, volume, ...)
/// implements this trait. The orchestrator owns all concurrency control, so
/// implementations only need to perform the provider call.
#[async_trait]
pub trait Deletable: Send + Sync {
    /// Stable resource category, e.g. `ec2-network-interface`.
    ///
    /// Used for grouping and reporting only, never for ordering.
    fn resource_type(&self) -> &str;

    /// Identifier shown in prompts, logs and error messages.
    fn name(&self) -> &str;

    /// Perform the provider-side deletion.
    ///
    /// May be called again in a later round after a failure, so it must be
    /// safe to repeat. Provider errors (including "not found", "still in use"
    /// and "dependency exists") are returned as a [`DeleteError`], never a panic.
    async fn delete(&self) -> Result<(), DeleteError>;

    fn id(&self) -> ResourceId {
        ResourceId::new(self.resource_type(), self.name())
    }
}
