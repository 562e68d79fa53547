use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("leftovers")
        .about("Delete leftover cloud resources, retrying until their dependencies are gone")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable coloured output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("inventory")
                .long("inventory")
                .help("Sandbox inventory manifest (TOML) to operate on")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("max-rounds")
                .long("max-rounds")
                .help("Give up after this many deletion rounds")
                .value_name("N")
                .value_parser(clap::value_parser!(u32).range(1..))
                .global(true),
        )
        .arg(
            Arg::new("call-timeout")
                .long("call-timeout")
                .help("Seconds to wait for a single delete call")
                .value_name("SECS")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .subcommand(
            Command::new("list")
                .about("List resources that would be deleted")
                .arg(filter_arg())
                .arg(regex_arg())
                .arg(type_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("types").about("List the resource types that can be deleted").arg(
                Arg::new("json")
                    .long("json")
                    .help("Output as JSON")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete every matching resource, retrying until nothing more can go")
                .arg(filter_arg())
                .arg(regex_arg())
                .arg(type_arg())
                .arg(
                    Arg::new("no-confirm")
                        .long("no-confirm")
                        .short('n')
                        .help("Delete without asking for confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn filter_arg() -> Arg {
    Arg::new("filter")
        .long("filter")
        .short('f')
        .help("Only resources whose names match this filter")
        .value_name("FILTER")
}

fn regex_arg() -> Arg {
    Arg::new("regex")
        .long("regex")
        .help("Treat the filter as a regular expression")
        .action(ArgAction::SetTrue)
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .help("Only resources of this type")
        .value_name("TYPE")
}
