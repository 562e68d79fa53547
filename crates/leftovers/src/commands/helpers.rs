use std::path::PathBuf;
use std::sync::Arc;

use clap::ArgMatches;
use tracing::{error, info};

use leftovers_config::LeftoversConfig;
use leftovers_core::{
    Leftovers, LeftoversError, NameFilter, Notifier, OrchestratorSettings, Prompter, SandboxCloud,
    TracingNotifier, events,
};

use crate::color;
use crate::console::ConsoleNotifier;

/// Print, log and box a command error.
pub(crate) fn report_error<E: LeftoversError>(
    event: &'static str,
    e: E,
) -> Box<dyn std::error::Error> {
    eprintln!("{}", color::error(&e.to_string()));
    error!(event = event, error = %e);
    events::log_app_error(&e);
    e.into()
}

/// Config layers, then `--max-rounds` / `--call-timeout` on top, validated.
pub(crate) fn load_config(
    matches: &ArgMatches,
) -> Result<LeftoversConfig, Box<dyn std::error::Error>> {
    let mut config = leftovers_config::load_hierarchy()
        .map_err(|e| report_error("cli.config_load_failed", e))?;

    if let Some(max_rounds) = matches.get_one::<u32>("max-rounds") {
        config.orchestrator.max_rounds = Some(*max_rounds);
    }
    if let Some(secs) = matches.get_one::<u64>("call-timeout") {
        config.orchestrator.call_timeout_secs = Some(*secs);
    }

    leftovers_config::validate_config(&config)
        .map_err(|e| report_error("cli.config_invalid", e))?;

    Ok(config)
}

/// `--filter`, compiled as a regex when `--regex` or `[filter] regex` asks for it.
pub(crate) fn build_filter(
    matches: &ArgMatches,
    config: &LeftoversConfig,
) -> Result<NameFilter, Box<dyn std::error::Error>> {
    let pattern = matches
        .get_one::<String>("filter")
        .map(String::as_str)
        .unwrap_or("");
    let regex = matches.get_flag("regex") || config.filter.regex();

    NameFilter::new(pattern, regex).map_err(|e| report_error("cli.filter_invalid", e))
}

pub(crate) fn load_inventory(
    matches: &ArgMatches,
) -> Result<SandboxCloud, Box<dyn std::error::Error>> {
    let Some(path) = matches.get_one::<PathBuf>("inventory") else {
        eprintln!("{}", color::error("No inventory given."));
        eprintln!("{}", color::hint("Pass --inventory <FILE> with a sandbox manifest."));
        error!(event = "cli.inventory_missing");
        return Err("No inventory given".into());
    };

    let cloud = SandboxCloud::from_manifest_file(path)
        .map_err(|e| report_error("cli.inventory_load_failed", e))?;

    info!(
        event = "cli.inventory_loaded",
        path = %path.display(),
        types = cloud.types().len()
    );
    Ok(cloud)
}

/// Console output for people, structured log events when stdout carries JSON.
pub(crate) fn notifier_for(json_output: bool) -> Arc<dyn Notifier> {
    if json_output {
        Arc::new(TracingNotifier)
    } else {
        Arc::new(ConsoleNotifier)
    }
}

pub(crate) fn build_leftovers(
    cloud: &SandboxCloud,
    prompter: Arc<dyn Prompter>,
    notifier: Arc<dyn Notifier>,
    config: &LeftoversConfig,
) -> Leftovers {
    Leftovers::new(
        cloud.suppliers(),
        prompter,
        notifier,
        OrchestratorSettings::from(&config.orchestrator),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_cli;

    fn list_matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["leftovers", "list"];
        argv.extend_from_slice(args);
        let matches = build_cli().try_get_matches_from(argv).unwrap();
        matches.subcommand_matches("list").unwrap().clone()
    }

    #[test]
    fn test_filter_defaults_to_all() {
        let matches = list_matches(&[]);
        let filter = build_filter(&matches, &LeftoversConfig::default()).unwrap();
        assert!(filter.is_all());
    }

    #[test]
    fn test_config_can_turn_on_regex() {
        let matches = list_matches(&["--filter", "^banana-[0-9]+$"]);
        let mut config = LeftoversConfig::default();
        config.filter.regex = Some(true);

        let filter = build_filter(&matches, &config).unwrap();
        assert!(matches!(filter, NameFilter::Regex(_)));
        assert!(filter.matches("banana-42"));
        assert!(!filter.matches("banana-kiwi"));
    }

    #[test]
    fn test_invalid_regex_is_an_error() {
        let matches = list_matches(&["--filter", "(", "--regex"]);
        assert!(build_filter(&matches, &LeftoversConfig::default()).is_err());
    }

    #[test]
    fn test_missing_inventory_is_an_error() {
        let matches = list_matches(&[]);
        assert!(load_inventory(&matches).is_err());
    }

    #[test]
    fn test_inventory_loads_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cloud.toml");
        std::fs::write(
            &path,
            "[[resources]]\ntype = \"volume\"\nname = \"banana-volume\"\n",
        )
        .unwrap();

        let matches = list_matches(&["--inventory", path.to_str().unwrap()]);
        let cloud = load_inventory(&matches).unwrap();
        assert_eq!(cloud.types(), ["volume"]);
    }
}
