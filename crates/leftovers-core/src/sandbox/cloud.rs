use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::deletable::{DeleteError, Deletable, ResourceId};
use crate::filter::NameFilter;
use crate::inventory::{ListError, ResourceSupplier};

use super::errors::SandboxError;
use super::types::SandboxManifest;

#[derive(Debug)]
struct Entry {
    id: ResourceId,
    blocked_by: Vec<String>,
    fail: Option<String>,
    live: bool,
}

#[derive(Debug, Default)]
struct SandboxState {
    entries: Vec<Entry>,
}

type SharedState = Arc<Mutex<SandboxState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, SandboxState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A fake account holding the resources declared in a manifest.
///
/// Suppliers and resources handed out by the cloud share its state, so a
/// delete through any of them is visible to all.
#[derive(Debug, Clone)]
pub struct SandboxCloud {
    state: SharedState,
    types: Vec<String>,
}

impl SandboxCloud {
    pub fn from_manifest_file(path: &Path) -> Result<Self, SandboxError> {
        let content = std::fs::read_to_string(path).map_err(|source| SandboxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cloud = Self::from_toml_str(&content)?;

        info!(
            event = "core.sandbox.loaded",
            path = %path.display(),
            resources = cloud.remaining().len(),
            types = cloud.types.len()
        );
        Ok(cloud)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SandboxError> {
        let manifest: SandboxManifest =
            toml::from_str(content).map_err(|e| SandboxError::Parse {
                message: e.to_string(),
            })?;
        Self::from_manifest(manifest)
    }

    pub fn from_manifest(manifest: SandboxManifest) -> Result<Self, SandboxError> {
        let mut names = HashSet::new();
        for spec in &manifest.resources {
            if !names.insert(spec.name.as_str()) {
                return Err(SandboxError::DuplicateResource {
                    name: spec.name.clone(),
                });
            }
        }

        for spec in &manifest.resources {
            for blocker in &spec.blocked_by {
                if *blocker == spec.name {
                    return Err(SandboxError::SelfBlocking {
                        name: spec.name.clone(),
                    });
                }
                if !names.contains(blocker.as_str()) {
                    return Err(SandboxError::UnknownBlocker {
                        name: spec.name.clone(),
                        blocker: blocker.clone(),
                    });
                }
            }
        }

        let mut types: Vec<String> = Vec::new();
        let mut entries = Vec::with_capacity(manifest.resources.len());
        for spec in manifest.resources {
            if !types.contains(&spec.resource_type) {
                types.push(spec.resource_type.clone());
            }
            entries.push(Entry {
                id: ResourceId::new(spec.resource_type, spec.name),
                blocked_by: spec.blocked_by,
                fail: spec.fail,
                live: true,
            });
        }

        Ok(Self {
            state: Arc::new(Mutex::new(SandboxState { entries })),
            types,
        })
    }

    /// Resource types in order of first appearance in the manifest.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// One supplier per resource type.
    pub fn suppliers(&self) -> Vec<Box<dyn ResourceSupplier>> {
        self.types
            .iter()
            .map(|t| {
                Box::new(SandboxSupplier {
                    resource_type: t.clone(),
                    state: Arc::clone(&self.state),
                }) as Box<dyn ResourceSupplier>
            })
            .collect()
    }

    /// Ids of every resource not yet deleted.
    pub fn remaining(&self) -> Vec<ResourceId> {
        lock(&self.state)
            .entries
            .iter()
            .filter(|e| e.live)
            .map(|e| e.id.clone())
            .collect()
    }
}

/// Lists the live sandbox resources of one type.
pub struct SandboxSupplier {
    resource_type: String,
    state: SharedState,
}

#[async_trait]
impl ResourceSupplier for SandboxSupplier {
    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    async fn list(&self, filter: &NameFilter) -> Result<Vec<Arc<dyn Deletable>>, ListError> {
        let state = lock(&self.state);
        let listed = state
            .entries
            .iter()
            .filter(|e| e.live && e.id.resource_type == self.resource_type)
            .filter(|e| filter.matches(&e.id.name))
            .map(|e| {
                Arc::new(SandboxResource {
                    id: e.id.clone(),
                    state: Arc::clone(&self.state),
                }) as Arc<dyn Deletable>
            })
            .collect();
        Ok(listed)
    }
}

pub struct SandboxResource {
    id: ResourceId,
    state: SharedState,
}

#[async_trait]
impl Deletable for SandboxResource {
    fn resource_type(&self) -> &str {
        &self.id.resource_type
    }

    fn name(&self) -> &str {
        &self.id.name
    }

    async fn delete(&self) -> Result<(), DeleteError> {
        let mut state = lock(&self.state);

        let Some(index) = state
            .entries
            .iter()
            .position(|e| e.live && e.id == self.id)
        else {
            return Err(DeleteError::NotFound);
        };

        if let Some(message) = &state.entries[index].fail {
            return Err(DeleteError::Provider {
                message: message.clone(),
            });
        }

        let blockers: Vec<&str> = state.entries[index]
            .blocked_by
            .iter()
            .filter(|b| state.entries.iter().any(|e| e.live && e.id.name == **b))
            .map(String::as_str)
            .collect();
        if !blockers.is_empty() {
            return Err(DeleteError::DependencyViolation {
                message: format!("{} is still used by {}", self.id.name, blockers.join(", ")),
            });
        }

        state.entries[index].live = false;
        debug!(
            event = "core.sandbox.resource_deleted",
            resource_type = %self.id.resource_type,
            name = %self.id.name
        );
        Ok(())
    }
}
