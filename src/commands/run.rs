//! Run command: provision the workspace

use std::path::PathBuf;

use console::Style;

use crate::error::Result;
use crate::process::SystemRunner;
use crate::runner::Bootstrap;
use crate::workspace::Workspace;

/// Run every bootstrap step against the workspace
pub fn run(workspace: Option<PathBuf>, python: Option<String>, verbose: bool) -> Result<()> {
    let workspace = Workspace::open(workspace, python)?;

    if verbose {
        eprintln!(
            "{} {}",
            Style::new().bold().apply_to("Workspace:"),
            workspace.root().display()
        );
    }

    let mut runner = SystemRunner::new(workspace.root(), verbose);
    let report = Bootstrap::new(&workspace, &mut runner).run()?;

    for (step, message) in report.warnings() {
        eprintln!(
            "{} {step}: {message}",
            Style::new().yellow().bold().apply_to("Warning:")
        );
    }

    Ok(())
}
