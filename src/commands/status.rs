//! Status command: report what is already provisioned

use std::path::PathBuf;

use console::Style;

use crate::cli::StatusArgs;
use crate::error::Result;
use crate::status::{self, StatusReport};
use crate::workspace::Workspace;

/// Print the workspace status; returns whether it is fully provisioned
pub fn run(workspace: Option<PathBuf>, python: Option<String>, args: &StatusArgs) -> Result<bool> {
    let workspace = Workspace::open(workspace, python)?;
    let report = status::inspect(&workspace);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display(&report);
    }

    Ok(report.ready)
}

fn display(report: &StatusReport) {
    let bold = Style::new().bold();

    println!("{} {}", bold.apply_to("Workspace:"), report.workspace);
    for artifact in &report.artifacts {
        let marker = if artifact.present {
            Style::new().green().apply_to("✓")
        } else if artifact.kind.is_output() {
            Style::new().yellow().apply_to("✗")
        } else {
            Style::new().red().apply_to("✗")
        };
        println!(
            "  {marker} {:<15} {}",
            artifact.kind.label(),
            artifact.path
        );
    }
    println!();

    if report.ready {
        println!("{}", Style::new().green().apply_to("Workspace is provisioned."));
    } else {
        println!("Run 'bootstrapper' to provision the workspace.");
    }
}
