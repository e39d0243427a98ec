pub mod agents;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod demo;
pub mod generator;
pub mod models;
pub mod schema;
pub mod seed;
pub mod tools;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

/// Process entry point: parse flags, load settings, run the requested
/// actions. Any error is reported once here and turned into exit code 1.
pub fn run() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    if args.is_empty() {
        if let Err(e) = cli::Args::command().print_help() {
            tracing::warn!(error = %e, "Cannot print help");
        }
        return ExitCode::SUCCESS;
    }

    if let Err(e) = ctrlc::set_handler(|| {
        println!("\nInterrupted by user.");
        std::process::exit(1);
    }) {
        tracing::warn!(error = %e, "Cannot install Ctrl-C handler");
    }

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    println!("{} - Multi-Agent Patient Journey Orchestrator\n", config::APP_NAME);

    // Unlocked handle: the Ctrl-C handler prints to stdout too.
    let mut out = std::io::stdout();

    let result = config::Settings::from_env()
        .map_err(commands::CommandError::from)
        .and_then(|settings| commands::execute(&args.actions(), &settings, &mut out));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            println!("\nFatal error: {e}");
            ExitCode::FAILURE
        }
    }
}
