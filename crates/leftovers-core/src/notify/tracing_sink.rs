use tracing::{debug, error, info, warn};

use super::traits::{Notifier, NotifyLevel};

/// Forwards notifications to the tracing subscriber as structured events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Debug => debug!(event = "core.notify.message", message = message),
            NotifyLevel::Info | NotifyLevel::Success => info!(
                event = "core.notify.message",
                level = level.as_str(),
                message = message
            ),
            NotifyLevel::Warning => warn!(event = "core.notify.message", message = message),
            NotifyLevel::Error => error!(event = "core.notify.message", message = message),
        }
    }
}
