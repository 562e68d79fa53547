use crate::errors::ConfigError;
use crate::types::LeftoversConfig;

/// Reject values the orchestrator cannot run with.
pub fn validate_config(config: &LeftoversConfig) -> Result<(), ConfigError> {
    if config.orchestrator.max_rounds == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "orchestrator.max_rounds must be at least 1".to_string(),
        });
    }

    if config.orchestrator.call_timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "orchestrator.call_timeout_secs must be at least 1".to_string(),
        });
    }

    Ok(())
}
