//! The uniform handle every resource type hands to the orchestrator.

mod errors;
mod traits;
mod types;

pub use errors::DeleteError;
pub use traits::Deletable;
pub use types::ResourceId;
