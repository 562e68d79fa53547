use std::time::Duration;

use leftovers_config::{DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_MAX_ROUNDS, OrchestratorConfig};

use crate::deletable::{DeleteError, ResourceId};

use super::errors::DeletionError;

/// Bounds on one orchestrator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Hard cap on rounds. Values below 1 are treated as 1.
    pub max_rounds: u32,
    /// Limit on a single `delete()` call; expiry counts as a failed attempt.
    pub call_timeout: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
        }
    }
}

impl From<&OrchestratorConfig> for OrchestratorSettings {
    fn from(config: &OrchestratorConfig) -> Self {
        Self {
            max_rounds: config.max_rounds(),
            call_timeout: config.call_timeout(),
        }
    }
}

/// Lifecycle of one attempt record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Pending,
    Succeeded,
    Abandoned,
}

/// Summary of one concurrent sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub round: u32,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(ResourceId, DeleteError)>,
}

impl RoundResult {
    pub(crate) fn new(round: u32, attempted: usize) -> Self {
        Self {
            round,
            attempted,
            succeeded: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    /// At least one resource left the pending set this round.
    pub fn made_progress(&self) -> bool {
        self.succeeded > 0
    }
}

/// A resource the orchestrator gave up on, with the last error it returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbandonedResource {
    pub id: ResourceId,
    pub error: DeleteError,
    pub attempts: u32,
}

impl std::fmt::Display for AbandonedResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.id.resource_type, self.id.name, self.error
        )
    }
}

/// Why the convergence loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Nothing was handed to the orchestrator.
    Empty,
    /// Every resource was deleted.
    Completed { rounds: u32 },
    /// A round deleted nothing; retrying would repeat the same failures.
    Stalled { round: u32 },
    /// Rounds kept making progress but the cap was hit first.
    RoundCapReached { max_rounds: u32 },
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Empty => write!(f, "nothing to delete"),
            Termination::Completed { rounds } => {
                write!(f, "all resources deleted after {} round(s)", rounds)
            }
            Termination::Stalled { round } => {
                write!(f, "no progress in round {}", round)
            }
            Termination::RoundCapReached { max_rounds } => {
                write!(f, "round cap of {} reached", max_rounds)
            }
        }
    }
}

/// Final outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub succeeded: Vec<ResourceId>,
    pub abandoned: Vec<AbandonedResource>,
    pub rounds: Vec<RoundResult>,
    pub termination: Termination,
}

impl RunReport {
    pub fn empty() -> Self {
        Self {
            succeeded: Vec::new(),
            abandoned: Vec::new(),
            rounds: Vec::new(),
            termination: Termination::Empty,
        }
    }

    pub fn is_success(&self) -> bool {
        self.abandoned.is_empty()
    }

    pub fn rounds_run(&self) -> usize {
        self.rounds.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.abandoned.len()
    }

    /// `Ok` when nothing was abandoned, otherwise the aggregate error.
    pub fn into_result(self) -> Result<RunReport, DeletionError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(DeletionError::ResourcesAbandoned {
            succeeded: self.succeeded.len(),
            termination: self.termination,
            abandoned: self.abandoned,
        })
    }
}
