use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Round cap used when no config layer sets one.
pub const DEFAULT_MAX_ROUNDS: u32 = 10;

/// Per-call deletion timeout used when no config layer sets one.
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 300;

/// Top-level `config.toml` contents.
///
/// Every leaf is optional so layers can be merged; accessors apply defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeftoversConfig {
    pub orchestrator: OrchestratorConfig,
    pub filter: FilterConfig,
}

/// `[orchestrator]` section: bounds on the deletion rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub max_rounds: Option<u32>,
    pub call_timeout_secs: Option<u64>,
}

/// `[filter]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Treat `--filter` values as regular expressions instead of substrings.
    pub regex: Option<bool>,
}

impl LeftoversConfig {
    /// Overlay `other` on top of `self`. Values set in `other` win.
    pub fn merge(self, other: LeftoversConfig) -> LeftoversConfig {
        LeftoversConfig {
            orchestrator: OrchestratorConfig {
                max_rounds: other
                    .orchestrator
                    .max_rounds
                    .or(self.orchestrator.max_rounds),
                call_timeout_secs: other
                    .orchestrator
                    .call_timeout_secs
                    .or(self.orchestrator.call_timeout_secs),
            },
            filter: FilterConfig {
                regex: other.filter.regex.or(self.filter.regex),
            },
        }
    }
}

impl OrchestratorConfig {
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs.unwrap_or(DEFAULT_CALL_TIMEOUT_SECS))
    }
}

impl FilterConfig {
    pub fn regex(&self) -> bool {
        self.regex.unwrap_or(false)
    }
}
