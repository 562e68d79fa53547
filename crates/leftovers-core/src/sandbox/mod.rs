//! In-memory cloud whose resources can block each other's deletion.
//!
//! Loaded from a TOML manifest. Drives the CLI when no real provider is
//! wired in, and exercises the orchestrator end to end in tests.

mod cloud;
mod errors;
mod types;

pub use cloud::{SandboxCloud, SandboxResource, SandboxSupplier};
pub use errors::SandboxError;
pub use types::{ResourceSpec, SandboxManifest};
