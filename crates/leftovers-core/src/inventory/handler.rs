use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::deletable::{Deletable, ResourceId};
use crate::filter::NameFilter;
use crate::notify::{Notifier, NotifyLevel};
use crate::orchestrator::{DeletionOrchestrator, OrchestratorSettings, RunReport};

use super::errors::InventoryError;
use super::traits::{Prompter, ResourceSupplier};

/// Lists, selects and deletes leftover resources across a provider's suppliers.
pub struct Leftovers {
    suppliers: Vec<Box<dyn ResourceSupplier>>,
    prompter: Arc<dyn Prompter>,
    notifier: Arc<dyn Notifier>,
    orchestrator: DeletionOrchestrator,
}

impl Leftovers {
    pub fn new(
        suppliers: Vec<Box<dyn ResourceSupplier>>,
        prompter: Arc<dyn Prompter>,
        notifier: Arc<dyn Notifier>,
        settings: OrchestratorSettings,
    ) -> Self {
        let orchestrator = DeletionOrchestrator::new(Arc::clone(&notifier), settings);
        Self {
            suppliers,
            prompter,
            notifier,
            orchestrator,
        }
    }

    /// Every resource type this provider can delete.
    pub fn types(&self) -> Vec<String> {
        self.suppliers
            .iter()
            .map(|s| s.resource_type().to_string())
            .collect()
    }

    /// Resources whose names pass `filter`, across all types. No prompting.
    pub async fn list(&self, filter: &NameFilter) -> Vec<ResourceId> {
        let groups = self.collect(self.suppliers.iter(), filter, false).await;
        flatten_ids(&groups)
    }

    pub async fn list_by_type(
        &self,
        filter: &NameFilter,
        resource_type: &str,
    ) -> Result<Vec<ResourceId>, InventoryError> {
        let suppliers = self.suppliers_of_type(resource_type)?;
        let groups = self.collect(suppliers.into_iter(), filter, false).await;
        Ok(flatten_ids(&groups))
    }

    /// List, confirm and delete every matching resource.
    pub async fn delete(&self, filter: &NameFilter) -> Result<RunReport, InventoryError> {
        info!(event = "core.leftovers.delete_started", filter = filter.pattern());
        let groups = self.collect(self.suppliers.iter(), filter, true).await;
        Ok(self.orchestrator.run(groups).await?)
    }

    /// Same as [`delete`](Self::delete), restricted to one resource type.
    pub async fn delete_by_type(
        &self,
        filter: &NameFilter,
        resource_type: &str,
    ) -> Result<RunReport, InventoryError> {
        info!(
            event = "core.leftovers.delete_by_type_started",
            filter = filter.pattern(),
            resource_type = resource_type
        );
        let suppliers = self.suppliers_of_type(resource_type)?;
        let groups = self.collect(suppliers.into_iter(), filter, true).await;
        Ok(self.orchestrator.run(groups).await?)
    }

    fn suppliers_of_type(
        &self,
        resource_type: &str,
    ) -> Result<Vec<&Box<dyn ResourceSupplier>>, InventoryError> {
        let matching: Vec<_> = self
            .suppliers
            .iter()
            .filter(|s| s.resource_type() == resource_type)
            .collect();

        if matching.is_empty() {
            return Err(InventoryError::UnknownResourceType {
                resource_type: resource_type.to_string(),
                known: self.types().join(", "),
            });
        }
        Ok(matching)
    }

    /// One group per supplier. Listing failures are reported and skipped.
    async fn collect<'a, I>(
        &self,
        suppliers: I,
        filter: &NameFilter,
        confirm: bool,
    ) -> Vec<Vec<Arc<dyn Deletable>>>
    where
        I: Iterator<Item = &'a Box<dyn ResourceSupplier>>,
    {
        let mut groups = Vec::new();

        for supplier in suppliers {
            let listed = match supplier.list(filter).await {
                Ok(listed) => listed,
                Err(e) => {
                    warn!(
                        event = "core.leftovers.list_failed",
                        resource_type = supplier.resource_type(),
                        error = %e
                    );
                    self.notifier.notify(NotifyLevel::Warning, &e.to_string());
                    continue;
                }
            };

            let selected: Vec<Arc<dyn Deletable>> = if confirm {
                listed
                    .into_iter()
                    .filter(|d| {
                        let accepted = self.prompter.confirm(d.resource_type(), d.name());
                        if !accepted {
                            debug!(
                                event = "core.leftovers.resource_declined",
                                resource_type = d.resource_type(),
                                name = d.name()
                            );
                        }
                        accepted
                    })
                    .collect()
            } else {
                listed
            };

            debug!(
                event = "core.leftovers.supplier_listed",
                resource_type = supplier.resource_type(),
                count = selected.len()
            );
            groups.push(selected);
        }

        groups
    }
}

fn flatten_ids(groups: &[Vec<Arc<dyn Deletable>>]) -> Vec<ResourceId> {
    groups.iter().flatten().map(|d| d.id()).collect()
}
