//! Notification sink the orchestrator reports progress through.
//!
//! The sink is handed to the orchestrator at construction; there is no
//! process-wide logger. Calls must return promptly since they are made from
//! the round's result consumer.

mod recording;
mod traits;
mod tracing_sink;

pub use recording::RecordingNotifier;
pub use traits::{Notifier, NotifyLevel};
pub use tracing_sink::TracingNotifier;
