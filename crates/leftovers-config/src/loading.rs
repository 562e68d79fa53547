use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::types::LeftoversConfig;
use crate::validation::validate_config;

/// Environment variable naming one explicit config file.
pub const CONFIG_ENV_VAR: &str = "LEFTOVERS_CONFIG";

const CONFIG_DIR: &str = ".leftovers";
const CONFIG_FILE: &str = "config.toml";

/// `~/.leftovers/config.toml`, or `None` when the home directory is unknown.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// `<dir>/.leftovers/config.toml`.
pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load the layered configuration and validate the result.
///
/// When `LEFTOVERS_CONFIG` is set, that file must exist and is the only layer.
/// Otherwise the user file and then the project file (relative to the current
/// directory) are overlaid on the defaults; missing files are skipped.
pub fn load_hierarchy() -> Result<LeftoversConfig, ConfigError> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
        let path = PathBuf::from(explicit);
        let config = load_file(&path)?.ok_or_else(|| ConfigError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        validate_config(&config)?;
        info!(
            event = "config.load_completed",
            source = "env",
            path = %path.display()
        );
        return Ok(config);
    }

    let mut paths = Vec::new();
    if let Some(user) = user_config_path() {
        paths.push(user);
    }
    let cwd = std::env::current_dir()?;
    paths.push(project_config_path(&cwd));

    load_from_paths(&paths)
}

/// Overlay each existing file in `paths` on the defaults, in order.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<LeftoversConfig, ConfigError> {
    let mut config = LeftoversConfig::default();
    let mut layers = 0usize;

    for path in paths {
        if let Some(layer) = load_file(path)? {
            config = config.merge(layer);
            layers += 1;
        }
    }

    validate_config(&config)?;

    info!(event = "config.load_completed", source = "hierarchy", layers = layers);
    Ok(config)
}

/// Read one TOML file. Returns `Ok(None)` when the file does not exist.
pub fn load_file(path: &Path) -> Result<Option<LeftoversConfig>, ConfigError> {
    if !path.exists() {
        debug!(event = "config.file_skipped", path = %path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("{}: {}", path.display(), e),
    })?;

    debug!(event = "config.file_loaded", path = %path.display());
    Ok(Some(config))
}
