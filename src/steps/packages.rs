//! Package manager upgrade and dependency installation

use crate::environment::IsolatedEnv;
use crate::error::{BootstrapError, Result};
use crate::process::CommandRunner;
use crate::workspace::Workspace;

use super::StepOutcome;

/// `pip install --upgrade pip`
///
/// The step is best-effort: the runner turns an error here into a warning.
pub fn upgrade(env: &IsolatedEnv, runner: &mut dyn CommandRunner) -> Result<StepOutcome> {
    runner.run(&env.upgrade_pip())?;
    Ok(StepOutcome::Done)
}

/// `pip install -r <manifest>`; the manifest must exist
pub fn install(
    workspace: &Workspace,
    env: &IsolatedEnv,
    runner: &mut dyn CommandRunner,
) -> Result<StepOutcome> {
    let manifest = workspace.manifest_path();
    if !manifest.is_file() {
        return Err(BootstrapError::ManifestNotFound {
            path: workspace.display_path(&manifest),
        });
    }

    runner.run(&env.install_requirements(&manifest))?;
    Ok(StepOutcome::Done)
}
