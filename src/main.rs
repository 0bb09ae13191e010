//! Bootstrapper - provision a Python application checkout
//!
//! Creates an isolated virtual environment, installs the declared
//! dependencies, fetches the language model, creates the data directory
//! layout and seeds the local config file from its template. Every step is
//! idempotent, so the tool can be rerun at any time.

use clap::Parser;
use console::Style;

mod cli;
mod commands;
mod config;
mod environment;
mod error;
mod process;
mod progress;
mod runner;
mod status;
mod steps;
mod workspace;

use cli::{Cli, Commands};
use error::BootstrapError;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(cli.workspace, cli.python, cli.verbose),
        Commands::Status(args) => {
            commands::status::run(cli.workspace, cli.python, &args).map(|ready| {
                if !ready {
                    std::process::exit(1);
                }
            })
        }
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(e.exit_code());
    }
}

fn report_error(err: &BootstrapError) {
    eprintln!("{} {}", Style::new().red().bold().apply_to("Error:"), err);
    if let Some(help) = err.help_text() {
        eprintln!("  {} {}", Style::new().bold().apply_to("help:"), help);
    }
}
