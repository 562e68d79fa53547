//! Convergent deletion of resources with undeclared dependencies between them.
//!
//! Resources are retried in rounds. Each round attempts every pending resource
//! concurrently and waits for all of them; a later round can succeed where an
//! earlier one failed once whatever blocked the resource is gone. The loop
//! stops when nothing is pending, when a round deletes nothing, or at the
//! round cap.

mod errors;
mod handler;
mod round;
mod tracker;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::DeletionError;
pub use handler::DeletionOrchestrator;
pub use round::RoundExecutor;
pub use tracker::{AttemptRecord, AttemptTracker};
pub use types::{
    AbandonedResource, AttemptState, OrchestratorSettings, RoundResult, RunReport, Termination,
};
