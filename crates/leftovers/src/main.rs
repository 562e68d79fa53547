use leftovers_core::init_logging;

mod app;
mod color;
mod commands;
mod console;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Default (no flag) = quiet mode, -v/--verbose = verbose mode
    let verbose = matches.get_flag("verbose");
    init_logging(!verbose);

    if matches.get_flag("no-color") {
        color::set_no_color();
    }

    // Built after the colour override so no worker thread races the env update.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    if let Err(e) = runtime.block_on(commands::run_command(&matches)) {
        // Commands print their own errors; only the exit status is left to set.
        tracing::debug!(event = "cli.exit_failure", error = %e);
        std::process::exit(1);
    }

    Ok(())
}
