//! Scripted deletables for orchestrator tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::deletable::{DeleteError, Deletable};

pub(crate) enum Script {
    Succeed,
    Fail(DeleteError),
    /// Fails with a dependency error until every flag is set.
    BlockedBy(Vec<Arc<AtomicBool>>),
    /// Fails until the given 1-based call, then succeeds.
    SucceedOnAttempt(u32),
    Hang,
    Panic,
}

pub(crate) struct ScriptedDeletable {
    resource_type: String,
    name: String,
    script: Script,
    calls: AtomicU32,
    deleted: Arc<AtomicBool>,
    dispatched: Option<Arc<AtomicUsize>>,
}

impl ScriptedDeletable {
    fn new(resource_type: &str, name: &str, script: Script) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            script,
            calls: AtomicU32::new(0),
            deleted: Arc::new(AtomicBool::new(false)),
            dispatched: None,
        }
    }

    pub(crate) fn succeeding(resource_type: &str, name: &str) -> Self {
        Self::new(resource_type, name, Script::Succeed)
    }

    pub(crate) fn failing(resource_type: &str, name: &str, error: DeleteError) -> Self {
        Self::new(resource_type, name, Script::Fail(error))
    }

    pub(crate) fn blocked_by(resource_type: &str, name: &str, flags: Vec<Arc<AtomicBool>>) -> Self {
        Self::new(resource_type, name, Script::BlockedBy(flags))
    }

    pub(crate) fn succeeding_on_attempt(resource_type: &str, name: &str, attempt: u32) -> Self {
        Self::new(resource_type, name, Script::SucceedOnAttempt(attempt))
    }

    pub(crate) fn hanging(resource_type: &str, name: &str) -> Self {
        Self::new(resource_type, name, Script::Hang)
    }

    pub(crate) fn panicking(resource_type: &str, name: &str) -> Self {
        Self::new(resource_type, name, Script::Panic)
    }

    /// Count every dispatched call on a counter shared with sibling resources.
    pub(crate) fn with_dispatch_counter(mut self, counter: Arc<AtomicUsize>) -> Self {
        self.dispatched = Some(counter);
        self
    }

    pub(crate) fn deleted_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.deleted)
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn into_dyn(self) -> Arc<dyn Deletable> {
        Arc::new(self)
    }
}

#[async_trait]
impl Deletable for ScriptedDeletable {
    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn delete(&self) -> Result<(), DeleteError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(counter) = &self.dispatched {
            counter.fetch_add(1, Ordering::SeqCst);
        }

        let outcome = match &self.script {
            Script::Succeed => Ok(()),
            Script::Fail(error) => Err(error.clone()),
            Script::BlockedBy(flags) => {
                if flags.iter().all(|f| f.load(Ordering::SeqCst)) {
                    Ok(())
                } else {
                    Err(DeleteError::DependencyViolation {
                        message: format!("{} still has dependents", self.name),
                    })
                }
            }
            Script::SucceedOnAttempt(attempt) => {
                if call >= *attempt {
                    Ok(())
                } else {
                    Err(DeleteError::Provider {
                        message: format!("attempt {} refused", call),
                    })
                }
            }
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Ok(())
            }
            Script::Panic => panic!("scripted panic in {}", self.name),
        };

        if outcome.is_ok() {
            self.deleted.store(true, Ordering::SeqCst);
        }
        outcome
    }
}
