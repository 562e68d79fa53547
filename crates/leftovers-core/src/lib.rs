pub mod deletable;
pub mod errors;
pub mod events;
pub mod filter;
pub mod inventory;
pub mod logging;
pub mod notify;
pub mod orchestrator;
pub mod sandbox;

pub use deletable::{DeleteError, Deletable, ResourceId};
pub use errors::{LeftoversError, LeftoversResult};
pub use filter::{FilterError, NameFilter};
pub use inventory::{AutoConfirm, InventoryError, Leftovers, ListError, Prompter, ResourceSupplier};
pub use logging::init_logging;
pub use notify::{Notifier, NotifyLevel, RecordingNotifier, TracingNotifier};
pub use orchestrator::{
    AbandonedResource, DeletionError, DeletionOrchestrator, OrchestratorSettings, RunReport,
    Termination,
};
pub use sandbox::{SandboxCloud, SandboxError};

// Re-export config types for convenience
pub use leftovers_config::{ConfigError, LeftoversConfig};
