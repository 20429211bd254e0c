use ChemFormula::cli::cli_args::{CliArgs, run_formulas};
use ChemFormula::cli::cli_main::run_interactive_menu;
use ChemFormula::cli::session::Session;
use ChemFormula::settings::{DEFAULT_CONFIG_FILE, SettingsManager};
use clap::Parser;
use log::{LevelFilter, error};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::Path;
use std::process::ExitCode;

pub fn main() -> ExitCode {
    // clap prints help or usage errors itself and exits
    let cli_args = CliArgs::parse();

    // everything passes the terminal logger, the configured level is applied once settings are read
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("logger not initialized: {}", e);
    }
    let config_file = cli_args
        .config
        .as_deref()
        .unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    let settings = SettingsManager::with_config_file(&config_file.to_string_lossy());
    log::set_max_level(settings.log_level());

    let session = match Session::start(settings) {
        Ok(session) => session,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli_args.formulas.is_empty() {
        run_interactive_menu(&session);
        ExitCode::SUCCESS
    } else if run_formulas(&session, &cli_args.formulas, cli_args.json) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
