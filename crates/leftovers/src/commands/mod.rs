use clap::ArgMatches;
use tracing::error;

use leftovers_core::events;

mod delete;
mod helpers;
mod list;
mod types;

pub(crate) async fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches).await,
        Some(("types", sub_matches)) => types::handle_types_command(sub_matches),
        Some(("delete", sub_matches)) => delete::handle_delete_command(sub_matches).await,
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
