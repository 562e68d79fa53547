//! Application-level lifecycle events shared by every command.

use tracing::{error, info, warn};

use crate::errors::LeftoversError;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

/// Log an error with its code, at warn level for operator mistakes.
pub fn log_app_error<E: LeftoversError>(error: &E) {
    if error.is_user_error() {
        warn!(
            event = "core.app.user_error",
            error_code = error.error_code(),
            error = %error
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error_code = error.error_code(),
            error = %error
        );
    }
}
