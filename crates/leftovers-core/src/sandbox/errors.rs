use std::path::PathBuf;

use crate::errors::LeftoversError;

#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("Failed to read inventory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse inventory: {message}")]
    Parse { message: String },

    #[error("Resource '{name}' is declared more than once")]
    DuplicateResource { name: String },

    #[error("Resource '{name}' is blocked by unknown resource '{blocker}'")]
    UnknownBlocker { name: String, blocker: String },

    #[error("Resource '{name}' cannot be blocked by itself")]
    SelfBlocking { name: String },
}

impl LeftoversError for SandboxError {
    fn error_code(&self) -> &'static str {
        match self {
            SandboxError::Io { .. } => "SANDBOX_IO_ERROR",
            SandboxError::Parse { .. } => "SANDBOX_PARSE_ERROR",
            SandboxError::DuplicateResource { .. } => "SANDBOX_DUPLICATE_RESOURCE",
            SandboxError::UnknownBlocker { .. } => "SANDBOX_UNKNOWN_BLOCKER",
            SandboxError::SelfBlocking { .. } => "SANDBOX_SELF_BLOCKING",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, SandboxError::Io { .. })
    }
}
