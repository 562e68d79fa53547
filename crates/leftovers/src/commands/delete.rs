use std::sync::Arc;

use clap::ArgMatches;
use tracing::{error, info};

use leftovers_core::{AutoConfirm, InventoryError, Prompter, events};

use super::helpers;
use crate::color;
use crate::console::StdinPrompter;

pub(crate) async fn handle_delete_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let resource_type = matches.get_one::<String>("type");
    let no_confirm = matches.get_flag("no-confirm");

    info!(
        event = "cli.delete_started",
        resource_type = ?resource_type,
        no_confirm = no_confirm
    );

    let config = helpers::load_config(matches)?;
    let filter = helpers::build_filter(matches, &config)?;
    let cloud = helpers::load_inventory(matches)?;

    let prompter: Arc<dyn Prompter> = if no_confirm {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(StdinPrompter)
    };
    let leftovers =
        helpers::build_leftovers(&cloud, prompter, helpers::notifier_for(false), &config);

    let result = match resource_type {
        Some(resource_type) => leftovers.delete_by_type(&filter, resource_type).await,
        None => leftovers.delete(&filter).await,
    };

    match result {
        Ok(report) => {
            info!(
                event = "cli.delete_completed",
                deleted = report.succeeded.len(),
                rounds = report.rounds_run(),
                termination = %report.termination
            );
            Ok(())
        }
        // Each abandoned resource was already reported as it was given up on.
        Err(InventoryError::Deletion(e)) => {
            eprintln!(
                "{}",
                color::hint(
                    "Re-run once the blocking resources are handled, or raise --max-rounds."
                )
            );
            error!(
                event = "cli.delete_incomplete",
                abandoned = e.abandoned().len()
            );
            events::log_app_error(&e);
            Err(e.into())
        }
        Err(e) => Err(helpers::report_error("cli.delete_failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::app::build_cli;

    fn write_inventory(dir: &Path, body: &str) -> String {
        let path = dir.join("cloud.toml");
        std::fs::write(&path, body).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn delete_matches(inventory: &str) -> ArgMatches {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "leftovers",
                "delete",
                "--no-confirm",
                "--inventory",
                inventory,
                "--max-rounds",
                "3",
            ])
            .unwrap();
        matches.subcommand_matches("delete").unwrap().clone()
    }

    #[tokio::test]
    async fn test_abandoned_resource_fails_the_command() {
        let dir = tempfile::TempDir::new().unwrap();
        let inventory = write_inventory(
            dir.path(),
            r#"
[[resources]]
type = "instance"
name = "banana-instance"
fail = "termination protection enabled"

[[resources]]
type = "volume"
name = "banana-volume"
"#,
        );

        let result = handle_delete_command(&delete_matches(&inventory)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_full_deletion_succeeds() {
        let dir = tempfile::TempDir::new().unwrap();
        let inventory = write_inventory(
            dir.path(),
            r#"
[[resources]]
type = "subnet"
name = "banana-subnet"
blocked_by = ["banana-instance"]

[[resources]]
type = "instance"
name = "banana-instance"
"#,
        );

        let result = handle_delete_command(&delete_matches(&inventory)).await;
        assert!(result.is_ok());
    }
}
