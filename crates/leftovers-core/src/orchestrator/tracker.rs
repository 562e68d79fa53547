use std::sync::Arc;

use crate::deletable::{DeleteError, Deletable, ResourceId};

use super::types::{AbandonedResource, AttemptState};

/// Per-resource state across rounds.
pub struct AttemptRecord {
    deletable: Arc<dyn Deletable>,
    id: ResourceId,
    state: AttemptState,
    last_error: Option<DeleteError>,
    attempts_made: u32,
}

impl AttemptRecord {
    fn new(deletable: Arc<dyn Deletable>) -> Self {
        let id = deletable.id();
        Self {
            deletable,
            id,
            state: AttemptState::Pending,
            last_error: None,
            attempts_made: 0,
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn last_error(&self) -> Option<&DeleteError> {
        self.last_error.as_ref()
    }

    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    pub fn is_pending(&self) -> bool {
        self.state == AttemptState::Pending
    }
}

impl std::fmt::Debug for AttemptRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttemptRecord")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("last_error", &self.last_error)
            .field("attempts_made", &self.attempts_made)
            .finish()
    }
}

/// Owns every attempt record for one run.
///
/// Only the orchestrator mutates the tracker, and only from the task that
/// collects round results, so no locking is needed.
#[derive(Debug, Default)]
pub struct AttemptTracker {
    records: Vec<AttemptRecord>,
}

impl AttemptTracker {
    /// Flatten resource groups into one pending set. Group boundaries are
    /// discarded; they carry no scheduling meaning.
    pub fn from_groups<G>(groups: G) -> Self
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = Arc<dyn Deletable>>,
    {
        let records = groups
            .into_iter()
            .flatten()
            .map(AttemptRecord::new)
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AttemptRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&AttemptRecord> {
        self.records.get(index)
    }

    pub fn pending_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_pending()).count()
    }

    pub fn has_pending(&self) -> bool {
        self.records.iter().any(AttemptRecord::is_pending)
    }

    /// Indices and handles of every pending record, in input order.
    pub(crate) fn pending(&self) -> Vec<(usize, Arc<dyn Deletable>)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_pending())
            .map(|(i, r)| (i, Arc::clone(&r.deletable)))
            .collect()
    }

    pub(crate) fn record_success(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index)
            && record.is_pending()
        {
            record.attempts_made += 1;
            record.last_error = None;
            record.state = AttemptState::Succeeded;
        }
    }

    pub(crate) fn record_failure(&mut self, index: usize, error: DeleteError) {
        if let Some(record) = self.records.get_mut(index)
            && record.is_pending()
        {
            record.attempts_made += 1;
            record.last_error = Some(error);
        }
    }

    /// Move every pending record to `Abandoned`. Returns how many moved.
    pub(crate) fn abandon_pending(&mut self) -> usize {
        let mut count = 0;
        for record in self.records.iter_mut().filter(|r| r.is_pending()) {
            record.state = AttemptState::Abandoned;
            count += 1;
        }
        count
    }

    pub fn succeeded(&self) -> Vec<ResourceId> {
        self.records
            .iter()
            .filter(|r| r.state == AttemptState::Succeeded)
            .map(|r| r.id.clone())
            .collect()
    }

    pub fn abandoned(&self) -> Vec<AbandonedResource> {
        self.records
            .iter()
            .filter(|r| r.state == AttemptState::Abandoned)
            .map(|r| AbandonedResource {
                id: r.id.clone(),
                error: r.last_error.clone().unwrap_or_else(|| DeleteError::Provider {
                    message: "no delete attempt was made".to_string(),
                }),
                attempts: r.attempts_made,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::test_support::ScriptedDeletable;

    fn tracker_with(names: &[&str]) -> AttemptTracker {
        let group: Vec<Arc<dyn Deletable>> = names
            .iter()
            .map(|n| ScriptedDeletable::succeeding("volume", n).into_dyn())
            .collect();
        AttemptTracker::from_groups(vec![group])
    }

    #[test]
    fn test_from_groups_flattens_in_order() {
        let first: Vec<Arc<dyn Deletable>> =
            vec![ScriptedDeletable::succeeding("instance", "i-1").into_dyn()];
        let second: Vec<Arc<dyn Deletable>> = vec![
            ScriptedDeletable::succeeding("volume", "v-1").into_dyn(),
            ScriptedDeletable::succeeding("volume", "v-2").into_dyn(),
        ];
        let tracker = AttemptTracker::from_groups(vec![first, Vec::new(), second]);

        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.pending_count(), 3);
        let names: Vec<_> = tracker.records().iter().map(|r| r.id().name.clone()).collect();
        assert_eq!(names, vec!["i-1", "v-1", "v-2"]);
        assert!(
            tracker
                .records()
                .iter()
                .all(|r| r.state() == AttemptState::Pending && r.attempts_made() == 0)
        );
    }

    #[test]
    fn test_failure_keeps_pending_and_counts_attempts() {
        let mut tracker = tracker_with(&["v-1"]);
        let error = DeleteError::InUse {
            message: "attached".to_string(),
        };

        tracker.record_failure(0, error.clone());
        tracker.record_failure(0, error.clone());

        let record = tracker.get(0).unwrap();
        assert!(record.is_pending());
        assert_eq!(record.attempts_made(), 2);
        assert_eq!(record.last_error(), Some(&error));
    }

    #[test]
    fn test_success_is_terminal() {
        let mut tracker = tracker_with(&["v-1"]);
        tracker.record_failure(
            0,
            DeleteError::Provider {
                message: "throttled".to_string(),
            },
        );
        tracker.record_success(0);
        tracker.record_failure(0, DeleteError::NotFound);
        tracker.abandon_pending();

        let record = tracker.get(0).unwrap();
        assert_eq!(record.state(), AttemptState::Succeeded);
        assert_eq!(record.attempts_made(), 2);
        assert!(record.last_error().is_none());
        assert_eq!(tracker.succeeded(), vec![ResourceId::new("volume", "v-1")]);
    }

    #[test]
    fn test_abandon_pending_carries_last_error() {
        let mut tracker = tracker_with(&["v-1", "v-2"]);
        tracker.record_success(0);
        tracker.record_failure(
            1,
            DeleteError::DependencyViolation {
                message: "snapshot exists".to_string(),
            },
        );

        assert_eq!(tracker.abandon_pending(), 1);
        assert!(!tracker.has_pending());

        let abandoned = tracker.abandoned();
        assert_eq!(abandoned.len(), 1);
        assert_eq!(abandoned[0].id, ResourceId::new("volume", "v-2"));
        assert_eq!(abandoned[0].attempts, 1);
        assert!(matches!(
            abandoned[0].error,
            DeleteError::DependencyViolation { .. }
        ));
    }

    #[test]
    fn test_pending_skips_finished_records() {
        let mut tracker = tracker_with(&["v-1", "v-2", "v-3"]);
        tracker.record_success(1);
        let indices: Vec<usize> = tracker.pending().into_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2]);
    }
}
