//! Fetch the language model through its downloader

use crate::environment::IsolatedEnv;
use crate::error::Result;
use crate::process::CommandRunner;
use crate::workspace::Workspace;

use super::StepOutcome;

/// `python -m <downloader> download <model>`, unless disabled in `bootstrap.yaml`
pub fn fetch(
    workspace: &Workspace,
    env: &IsolatedEnv,
    runner: &mut dyn CommandRunner,
) -> Result<StepOutcome> {
    let Some(model) = &workspace.config().model else {
        return Ok(StepOutcome::Skipped("no model configured".to_string()));
    };

    runner.run(&env.download_model(&model.downloader, &model.name))?;
    Ok(StepOutcome::Done)
}
