use std::sync::Arc;

use clap::ArgMatches;
use tracing::info;

use leftovers_core::AutoConfirm;

use super::helpers;
use crate::color;

pub(crate) async fn handle_list_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let resource_type = matches.get_one::<String>("type");

    info!(
        event = "cli.list_started",
        resource_type = ?resource_type,
        json_output = json_output
    );

    let config = helpers::load_config(matches)?;
    let filter = helpers::build_filter(matches, &config)?;
    let cloud = helpers::load_inventory(matches)?;
    let leftovers = helpers::build_leftovers(
        &cloud,
        Arc::new(AutoConfirm),
        helpers::notifier_for(json_output),
        &config,
    );

    let ids = match resource_type {
        Some(resource_type) => leftovers
            .list_by_type(&filter, resource_type)
            .await
            .map_err(|e| helpers::report_error("cli.list_failed", e))?,
        None => leftovers.list(&filter).await,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&ids)?);
    } else if ids.is_empty() {
        println!("{}", color::muted("No resources found."));
    } else {
        for id in &ids {
            println!("[{}: {}]", color::accent(&id.resource_type), id.name);
        }
        println!("{}", color::muted(&format!("{} resource(s)", ids.len())));
    }

    info!(event = "cli.list_completed", count = ids.len());
    Ok(())
}
