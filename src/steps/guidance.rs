//! Completion guidance printed after a successful bootstrap

use console::Style;

use crate::workspace::Workspace;

use super::StepOutcome;

/// Credential the application reads from the seeded config file
const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Activation command a user types in their own shell
fn activate_hint(venv_dir: &str) -> String {
    if cfg!(windows) {
        format!("{venv_dir}\\Scripts\\activate")
    } else {
        format!("source {venv_dir}/bin/activate")
    }
}

/// The plain-text guidance lines, without styling
pub fn lines(workspace: &Workspace) -> Vec<String> {
    let config = workspace.config();
    let mut lines = vec![format!(
        "Add your {API_KEY_VAR} to {}",
        config.config_file
    )];
    lines.push(format!("Activate the environment: {}", activate_hint(&config.venv_dir)));
    lines.extend(config.next_steps.iter().map(|step| format!("Run: {step}")));
    lines
}

/// Print the next steps
pub fn print(workspace: &Workspace) -> StepOutcome {
    let bold = Style::new().bold();
    let green = Style::new().green().bold();

    println!();
    println!("{}", green.apply_to("Setup complete!"));
    println!();
    println!("{}", bold.apply_to("Next steps:"));
    for (index, line) in lines(workspace).iter().enumerate() {
        println!("  {}. {line}", index + 1);
    }

    StepOutcome::Done
}
