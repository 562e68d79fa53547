//! Configuration for the leftovers CLI and deletion orchestrator.
//!
//! Values are layered: built-in defaults, then the user file
//! (`~/.leftovers/config.toml`), then the project file
//! (`./.leftovers/config.toml`), then CLI overrides applied by the caller.
//! `LEFTOVERS_CONFIG` replaces the user/project lookup with one explicit file.

mod errors;
mod loading;
mod types;
mod validation;

pub use errors::ConfigError;
pub use loading::{
    CONFIG_ENV_VAR, load_file, load_from_paths, load_hierarchy, project_config_path,
    user_config_path,
};
pub use types::{
    DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_MAX_ROUNDS, FilterConfig, LeftoversConfig,
    OrchestratorConfig,
};
pub use validation::validate_config;
