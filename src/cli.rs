//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Bootstrapper - provision a Python application checkout
///
/// Creates the virtual environment, installs dependencies, fetches the language
/// model, creates data directories and seeds the local config file.
#[derive(Parser, Debug)]
#[command(
    name = "bootstrapper",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Provision a Python application checkout",
    long_about = "Provisions a Python application checkout in one idempotent run: creates the \
                  virtual environment, installs requirements, fetches the language model, \
                  creates the data directories and seeds the local config file from its \
                  template. Safe to run again at any time.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  bootstrapper\n    \
                  bootstrapper --workspace ./my-project\n    \
                  bootstrapper --python python3.12\n    \
                  bootstrapper status --json"
)]
pub struct Cli {
    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w', global = true)]
    pub workspace: Option<PathBuf>,

    /// Echo each command before running it
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Interpreter used to create the virtual environment
    #[arg(long, global = true, env = "BOOTSTRAP_PYTHON", value_name = "PROGRAM")]
    pub python: Option<String>,

    /// Runs the bootstrap when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the workspace (default)
    Run,

    /// Show what is already provisioned, without changing anything
    Status(StatusArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show provisioning status:\n    bootstrapper status\n\n\
                  Machine-readable output:\n    bootstrapper status --json")]
pub struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    bootstrapper completions --shell bash > ~/.bash_completion.d/bootstrapper\n\n\
                  Generate zsh completions:\n    bootstrapper completions --shell zsh > ~/.zfunc/_bootstrapper\n\n\
                  Generate fish completions:\n    bootstrapper completions --shell fish > ~/.config/fish/completions/bootstrapper.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parsing_no_arguments() {
        let cli = Cli::try_parse_from(["bootstrapper"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.workspace.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parsing_global_options() {
        let cli = Cli::try_parse_from([
            "bootstrapper",
            "status",
            "--json",
            "-w",
            "/tmp/project",
            "--python",
            "python3.12",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.workspace, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.python.as_deref(), Some("python3.12"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Status(StatusArgs { json: true }))));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["bootstrapper", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Some(Commands::Completions(args)) => assert_eq!(args.shell, Shell::Zsh),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_shell() {
        assert!(
            Cli::try_parse_from(["bootstrapper", "completions", "--shell", "tcsh"]).is_err()
        );
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["bootstrapper", "extra"]).is_err());
    }
}
