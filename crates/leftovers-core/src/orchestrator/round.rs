use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::deletable::{DeleteError, Deletable};
use crate::notify::{Notifier, NotifyLevel};

use super::tracker::AttemptTracker;
use super::types::RoundResult;

/// Runs one concurrent sweep of delete calls over the pending records.
pub struct RoundExecutor {
    notifier: Arc<dyn Notifier>,
    call_timeout: Duration,
}

impl RoundExecutor {
    pub fn new(notifier: Arc<dyn Notifier>, call_timeout: Duration) -> Self {
        Self {
            notifier,
            call_timeout,
        }
    }

    /// Attempt every pending record once, concurrently, and wait for all.
    ///
    /// Each task reports `(index, outcome)` back to this function, which is
    /// the only writer to `tracker`. Success is announced as soon as the task
    /// finishes; failures are only recorded.
    pub async fn execute(&self, round: u32, tracker: &mut AttemptTracker) -> RoundResult {
        let pending = tracker.pending();
        let mut result = RoundResult::new(round, pending.len());
        let mut outstanding: Vec<usize> = pending.iter().map(|(i, _)| *i).collect();

        info!(
            event = "core.orchestrator.round_started",
            round = round,
            attempted = result.attempted
        );

        let mut tasks = JoinSet::new();
        for (index, deletable) in pending {
            tasks.spawn(attempt_delete(index, deletable, self.call_timeout));
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    outstanding.retain(|i| *i != index);
                    self.apply_outcome(round, index, outcome, tracker, &mut result);
                }
                Err(join_error) => {
                    error!(
                        event = "core.orchestrator.task_join_failed",
                        round = round,
                        error = %join_error
                    );
                }
            }
        }

        // Tasks that never reported back (cancelled by the runtime) count as failed.
        for index in outstanding {
            self.apply_outcome(
                round,
                index,
                Err(DeleteError::Panicked {
                    message: "delete task did not complete".to_string(),
                }),
                tracker,
                &mut result,
            );
        }

        info!(
            event = "core.orchestrator.round_completed",
            round = round,
            attempted = result.attempted,
            succeeded = result.succeeded,
            failed = result.failed
        );

        result
    }

    fn apply_outcome(
        &self,
        round: u32,
        index: usize,
        outcome: Result<(), DeleteError>,
        tracker: &mut AttemptTracker,
        result: &mut RoundResult,
    ) {
        let Some(id) = tracker.get(index).map(|r| r.id().clone()) else {
            return;
        };

        match outcome {
            Ok(()) => {
                tracker.record_success(index);
                result.succeeded += 1;
                self.notifier.notify(
                    NotifyLevel::Success,
                    &format!("SUCCESS deleting {} {}", id.resource_type, id.name),
                );
                info!(
                    event = "core.orchestrator.delete_succeeded",
                    round = round,
                    resource_type = %id.resource_type,
                    name = %id.name
                );
            }
            Err(e) if e.is_already_deleted() => {
                tracker.record_success(index);
                result.succeeded += 1;
                self.notifier.notify(
                    NotifyLevel::Success,
                    &format!("SUCCESS deleting {} {} (already gone)", id.resource_type, id.name),
                );
                info!(
                    event = "core.orchestrator.delete_already_gone",
                    round = round,
                    resource_type = %id.resource_type,
                    name = %id.name
                );
            }
            Err(e) => {
                debug!(
                    event = "core.orchestrator.delete_failed",
                    round = round,
                    resource_type = %id.resource_type,
                    name = %id.name,
                    error = %e
                );
                tracker.record_failure(index, e.clone());
                result.failed += 1;
                result.errors.push((id, e));
            }
        }
    }
}

/// One delete call, bounded by `timeout`, with panics turned into failures.
async fn attempt_delete(
    index: usize,
    deletable: Arc<dyn Deletable>,
    timeout: Duration,
) -> (usize, Result<(), DeleteError>) {
    let call = AssertUnwindSafe(deletable.delete()).catch_unwind();

    let outcome = match tokio::time::timeout(timeout, call).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(panic)) => Err(DeleteError::Panicked {
            message: panic_message(&*panic),
        }),
        Err(_) => Err(DeleteError::TimedOut { after: timeout }),
    };

    (index, outcome)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::notify::RecordingNotifier;
    use crate::orchestrator::test_support::ScriptedDeletable;
    use crate::orchestrator::types::AttemptState;

    fn executor(notifier: Arc<RecordingNotifier>) -> RoundExecutor {
        RoundExecutor::new(notifier, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_failure_does_not_prevent_siblings() {
        let dispatched = Arc::new(AtomicUsize::new(0));
        let group: Vec<Arc<dyn Deletable>> = vec![
            ScriptedDeletable::failing(
                "volume",
                "v-bad",
                DeleteError::InUse {
                    message: "attached".to_string(),
                },
            )
            .with_dispatch_counter(Arc::clone(&dispatched))
            .into_dyn(),
            ScriptedDeletable::succeeding("volume", "v-1")
                .with_dispatch_counter(Arc::clone(&dispatched))
                .into_dyn(),
            ScriptedDeletable::panicking("volume", "v-panic")
                .with_dispatch_counter(Arc::clone(&dispatched))
                .into_dyn(),
            ScriptedDeletable::succeeding("volume", "v-2")
                .with_dispatch_counter(Arc::clone(&dispatched))
                .into_dyn(),
        ];
        let mut tracker = AttemptTracker::from_groups(vec![group]);
        let notifier = Arc::new(RecordingNotifier::new());

        let result = executor(Arc::clone(&notifier)).execute(1, &mut tracker).await;

        assert_eq!(dispatched.load(Ordering::SeqCst), 4);
        assert_eq!(result.attempted, 4);
        assert_eq!(result.succeeded, 2);
        assert_eq!(result.failed, 2);
        assert_eq!(tracker.pending_count(), 2);
        assert_eq!(notifier.messages(NotifyLevel::Success).len(), 2);
        assert!(notifier.messages(NotifyLevel::Error).is_empty());
    }

    #[tokio::test]
    async fn test_panic_becomes_failure() {
        let group = vec![ScriptedDeletable::panicking("image", "img-1").into_dyn()];
        let mut tracker = AttemptTracker::from_groups(vec![group]);

        let result = executor(Arc::new(RecordingNotifier::new()))
            .execute(1, &mut tracker)
            .await;

        assert_eq!(result.failed, 1);
        let record = tracker.get(0).unwrap();
        assert_eq!(record.state(), AttemptState::Pending);
        match record.last_error() {
            Some(DeleteError::Panicked { message }) => {
                assert!(message.contains("scripted panic in img-1"));
            }
            other => panic!("expected panic error, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_call_times_out() {
        let group = vec![
            ScriptedDeletable::hanging("instance", "i-stuck").into_dyn(),
            ScriptedDeletable::succeeding("instance", "i-1").into_dyn(),
        ];
        let mut tracker = AttemptTracker::from_groups(vec![group]);
        let executor = RoundExecutor::new(
            Arc::new(RecordingNotifier::new()),
            Duration::from_secs(30),
        );

        let result = executor.execute(1, &mut tracker).await;

        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(
            tracker.get(0).unwrap().last_error(),
            Some(&DeleteError::TimedOut {
                after: Duration::from_secs(30)
            })
        );
    }

    /// Notes how long after `start` each success notification arrived.
    struct TimedNotifier {
        start: tokio::time::Instant,
        seen: std::sync::Mutex<Vec<Duration>>,
    }

    impl Notifier for TimedNotifier {
        fn notify(&self, level: NotifyLevel, _message: &str) {
            if level == NotifyLevel::Success {
                self.seen.lock().unwrap().push(self.start.elapsed());
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_is_announced_before_the_round_ends() {
        let notifier = Arc::new(TimedNotifier {
            start: tokio::time::Instant::now(),
            seen: std::sync::Mutex::new(Vec::new()),
        });
        let group = vec![
            ScriptedDeletable::hanging("instance", "i-stuck").into_dyn(),
            ScriptedDeletable::succeeding("instance", "i-1").into_dyn(),
        ];
        let mut tracker = AttemptTracker::from_groups(vec![group]);
        let executor = RoundExecutor::new(notifier.clone(), Duration::from_secs(30));

        executor.execute(1, &mut tracker).await;

        assert!(notifier.start.elapsed() >= Duration::from_secs(30));
        let seen = notifier.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert!(seen[0] < Duration::from_secs(1), "success announced at {:?}", seen[0]);
    }

    #[tokio::test]
    async fn test_not_found_counts_as_success() {
        let group =
            vec![ScriptedDeletable::failing("volume", "v-gone", DeleteError::NotFound).into_dyn()];
        let mut tracker = AttemptTracker::from_groups(vec![group]);
        let notifier = Arc::new(RecordingNotifier::new());

        let result = executor(Arc::clone(&notifier)).execute(1, &mut tracker).await;

        assert_eq!(result.succeeded, 1);
        assert!(result.errors.is_empty());
        assert_eq!(tracker.get(0).unwrap().state(), AttemptState::Succeeded);
        assert_eq!(
            notifier.messages(NotifyLevel::Success),
            vec!["SUCCESS deleting volume v-gone (already gone)".to_string()]
        );
    }

    #[tokio::test]
    async fn test_only_pending_records_are_attempted() {
        let done = ScriptedDeletable::succeeding("volume", "v-done").shared();
        let done_handle: Arc<dyn Deletable> = done.clone();
        let group = vec![
            done_handle,
            ScriptedDeletable::succeeding("volume", "v-next").into_dyn(),
        ];
        let mut tracker = AttemptTracker::from_groups(vec![group]);
        tracker.record_success(0);

        let result = executor(Arc::new(RecordingNotifier::new()))
            .execute(2, &mut tracker)
            .await;

        assert_eq!(result.round, 2);
        assert_eq!(result.attempted, 1);
        assert_eq!(done.calls(), 0);
    }
}
