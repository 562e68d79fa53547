//! Terminal collaborators: coloured notifications and the y/N prompt.

use std::io::{BufRead, Write};

use leftovers_core::{Notifier, NotifyLevel, Prompter};
use tokio::runtime::RuntimeFlavor;
use tracing::{debug, warn};

use crate::color;

/// Prints notifications: successes and info to stdout, problems to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Debug => debug!(event = "cli.notify", message = message),
            NotifyLevel::Info => println!("{}", color::bold(message)),
            NotifyLevel::Success => println!("{}", color::success(message)),
            NotifyLevel::Warning => eprintln!("{}", color::warning(message)),
            NotifyLevel::Error => eprintln!("{}", color::error(message)),
        }
    }
}

/// Asks on stdout and reads the answer from stdin. Anything but y/yes declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&self, resource_type: &str, name: &str) -> bool {
        run_blocking(|| {
            ask(
                std::io::stdin().lock(),
                std::io::stdout().lock(),
                resource_type,
                name,
            )
        })
    }
}

/// Run a blocking read without stalling other tasks on a multi-threaded runtime.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

fn ask(mut input: impl BufRead, mut output: impl Write, resource_type: &str, name: &str) -> bool {
    if write!(output, "{} (y/N) ", prompt_message(resource_type, name))
        .and_then(|_| output.flush())
        .is_err()
    {
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(e) => {
            warn!(event = "cli.prompt_read_failed", error = %e);
            false
        }
    }
}

pub fn prompt_message(resource_type: &str, name: &str) -> String {
    format!("Are you sure you want to delete {} {}?", resource_type, name)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
