//! Create and activate the isolated environment

use crate::environment::IsolatedEnv;
use crate::error::Result;
use crate::process::CommandRunner;
use crate::workspace::Workspace;

use super::StepOutcome;

/// `python -m venv <venv_dir>`, unless a usable environment is already there
pub fn create(workspace: &Workspace, runner: &mut dyn CommandRunner) -> Result<StepOutcome> {
    let layout = workspace.env_layout();
    if layout.exists() {
        return Ok(StepOutcome::AlreadySatisfied);
    }

    runner.run(&layout.create_command(&workspace.config().python))?;
    Ok(StepOutcome::Done)
}

/// Build the activation context every later package command runs in
pub fn activate(workspace: &Workspace) -> Result<IsolatedEnv> {
    IsolatedEnv::activate_from_process(workspace.env_layout())
}
