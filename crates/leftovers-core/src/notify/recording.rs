use std::sync::Mutex;

use super::traits::{Notifier, NotifyLevel};

/// Keeps every notification in memory, in arrival order.
///
/// Useful for embedding the orchestrator where output is rendered later, and
/// for asserting on what a run reported.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<(NotifyLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(NotifyLevel, String)> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Messages recorded at `level`, in arrival order.
    pub fn messages(&self, level: NotifyLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_filters_by_level() {
        let notifier = RecordingNotifier::new();
        notifier.notify(NotifyLevel::Success, "first");
        notifier.notify(NotifyLevel::Error, "second");
        notifier.notify(NotifyLevel::Success, "third");

        assert_eq!(notifier.entries().len(), 3);
        assert_eq!(
            notifier.messages(NotifyLevel::Success),
            vec!["first".to_string(), "third".to_string()]
        );
    }
}
