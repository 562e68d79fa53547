use std::sync::Arc;

use tracing::{info, warn};

use crate::deletable::Deletable;
use crate::notify::{Notifier, NotifyLevel};

use super::errors::DeletionError;
use super::round::RoundExecutor;
use super::tracker::AttemptTracker;
use super::types::{OrchestratorSettings, RunReport, Termination};

/// Drives a set of resources to deletion by repeated concurrent rounds.
///
/// There is no dependency graph between resource types. A resource that
/// cannot be deleted yet (a subnet with a live network interface, say) simply
/// fails and is tried again next round, once the blocker may be gone.
pub struct DeletionOrchestrator {
    notifier: Arc<dyn Notifier>,
    settings: OrchestratorSettings,
    executor: RoundExecutor,
}

impl DeletionOrchestrator {
    pub fn new(notifier: Arc<dyn Notifier>, settings: OrchestratorSettings) -> Self {
        let executor = RoundExecutor::new(Arc::clone(&notifier), settings.call_timeout);
        Self {
            notifier,
            settings,
            executor,
        }
    }

    /// Delete every resource in `groups`.
    ///
    /// Returns `Ok` when everything was deleted (or there was nothing to do),
    /// otherwise an error naming each abandoned resource and its last error.
    pub async fn run<G>(&self, groups: G) -> Result<RunReport, DeletionError>
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = Arc<dyn Deletable>>,
    {
        self.execute(groups).await.into_result()
    }

    /// Same as [`run`](Self::run) but always hands back the full report.
    pub async fn execute<G>(&self, groups: G) -> RunReport
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = Arc<dyn Deletable>>,
    {
        let mut tracker = AttemptTracker::from_groups(groups);
        let max_rounds = self.settings.max_rounds.max(1);

        info!(
            event = "core.orchestrator.run_started",
            resources = tracker.len(),
            max_rounds = max_rounds,
            call_timeout_secs = self.settings.call_timeout.as_secs()
        );

        if tracker.is_empty() {
            info!(event = "core.orchestrator.run_skipped", reason = "no resources");
            return RunReport::empty();
        }

        let mut rounds = Vec::new();
        let mut round = 0;
        let termination = loop {
            round += 1;
            let result = self.executor.execute(round, &mut tracker).await;
            let progressed = result.made_progress();
            rounds.push(result);

            if !tracker.has_pending() {
                break Termination::Completed { rounds: round };
            }
            if !progressed {
                break Termination::Stalled { round };
            }
            if round >= max_rounds {
                break Termination::RoundCapReached { max_rounds };
            }
        };

        let abandoned_count = tracker.abandon_pending();
        let report = RunReport {
            succeeded: tracker.succeeded(),
            abandoned: tracker.abandoned(),
            rounds,
            termination,
        };

        self.report_outcome(&report);

        if abandoned_count > 0 {
            warn!(
                event = "core.orchestrator.run_incomplete",
                succeeded = report.succeeded.len(),
                abandoned = abandoned_count,
                rounds = report.rounds_run(),
                termination = %report.termination
            );
        } else {
            info!(
                event = "core.orchestrator.run_completed",
                succeeded = report.succeeded.len(),
                rounds = report.rounds_run()
            );
        }

        report
    }

    /// One failure line per abandoned resource, then a summary.
    fn report_outcome(&self, report: &RunReport) {
        for resource in &report.abandoned {
            self.notifier.notify(
                NotifyLevel::Error,
                &format!(
                    "ERROR deleting {} {}: {}",
                    resource.id.resource_type, resource.id.name, resource.error
                ),
            );
        }

        let summary = format!(
            "Deleted {} of {} resource(s) in {} round(s)",
            report.succeeded.len(),
            report.total(),
            report.rounds_run()
        );
        let level = if report.is_success() {
            NotifyLevel::Info
        } else {
            NotifyLevel::Warning
        };
        self.notifier.notify(level, &summary);
    }
}
