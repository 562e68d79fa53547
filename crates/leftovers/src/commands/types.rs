use clap::ArgMatches;
use tracing::info;

use super::helpers;

pub(crate) fn handle_types_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.types_started", json_output = json_output);

    let cloud = helpers::load_inventory(matches)?;
    let types = cloud.types();

    if json_output {
        println!("{}", serde_json::to_string_pretty(types)?);
    } else {
        for resource_type in types {
            println!("{}", resource_type);
        }
    }

    info!(event = "cli.types_completed", count = types.len());
    Ok(())
}
