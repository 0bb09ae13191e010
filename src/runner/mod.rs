//! Bootstrap runner
//!
//! Executes [`Step::ALL`] in order against one workspace. The first fatal
//! error stops the run and is returned wrapped in
//! [`BootstrapError::StepFailed`] naming the step. Completed steps are not
//! rolled back: every step is idempotent, so running again resumes.


use crate::environment::IsolatedEnv;
use crate::error::{BootstrapError, Result};
use crate::process::CommandRunner;
use crate::progress::ProgressDisplay;
use crate::steps::{self, Step, StepOutcome};
use crate::workspace::Workspace;

/// Outcome of every step of a successful run, in order
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<(Step, StepOutcome)>,
}

impl Report {
    fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.entries.push((step, outcome));
    }

    #[allow(dead_code)]
    pub fn entries(&self) -> &[(Step, StepOutcome)] {
        &self.entries
    }

    #[allow(dead_code)]
    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.entries
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, outcome)| outcome)
    }

    pub fn warnings(&self) -> impl Iterator<Item = (Step, &str)> {
        self.entries.iter().filter_map(|(step, outcome)| match outcome {
            StepOutcome::Warned(message) => Some((*step, message.as_str())),
            _ => None,
        })
    }
}

/// Runs the bootstrap steps for a workspace
pub struct Bootstrap<'a> {
    workspace: &'a Workspace,
    runner: &'a mut dyn CommandRunner,
    progress: ProgressDisplay,
    env: Option<IsolatedEnv>,
}

impl<'a> Bootstrap<'a> {
    pub fn new(workspace: &'a Workspace, runner: &'a mut dyn CommandRunner) -> Self {
        Self::with_progress(workspace, runner, ProgressDisplay::new(Step::ALL.len() as u64))
    }

    pub fn with_progress(
        workspace: &'a Workspace,
        runner: &'a mut dyn CommandRunner,
        progress: ProgressDisplay,
    ) -> Self {
        Self {
            workspace,
            runner,
            progress,
            env: None,
        }
    }

    /// Run every step in order, stopping at the first fatal error
    pub fn run(mut self) -> Result<Report> {
        let mut report = Report::default();
        let total = Step::ALL.len();

        for (index, step) in Step::ALL.into_iter().enumerate() {
            let workspace = self.workspace;
            let runner = &mut *self.runner;
            let env = &mut self.env;

            // Guidance goes to stdout once the bar is gone
            if step == Step::CompletionGuidance {
                self.progress.finish();
                let outcome = Self::execute(workspace, runner, env, step)?;
                report.record(step, outcome);
                continue;
            }

            self.progress.start_step(step, index + 1, total);
            let result = self
                .progress
                .suspend(|| Self::execute(workspace, runner, env, step));

            match result {
                Ok(outcome) => {
                    self.progress.complete_step(step, &outcome);
                    report.record(step, outcome);
                }
                Err(e) if !step.is_fatal() => {
                    let outcome = StepOutcome::Warned(e.to_string());
                    self.progress.complete_step(step, &outcome);
                    report.record(step, outcome);
                }
                Err(e) => {
                    self.progress.fail_step(step);
                    self.progress.abandon();
                    return Err(BootstrapError::StepFailed {
                        step: step.label().to_string(),
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(report)
    }

    fn execute(
        workspace: &Workspace,
        runner: &mut dyn CommandRunner,
        env: &mut Option<IsolatedEnv>,
        step: Step,
    ) -> Result<StepOutcome> {
        match step {
            Step::CreateEnvironment => steps::environment::create(workspace, runner),
            Step::ActivateEnvironment => {
                *env = Some(steps::environment::activate(workspace)?);
                Ok(StepOutcome::Done)
            }
            Step::UpgradePackageManager => {
                steps::packages::upgrade(active(workspace, env.as_ref())?, runner)
            }
            Step::InstallDependencies => {
                steps::packages::install(workspace, active(workspace, env.as_ref())?, runner)
            }
            Step::FetchModel => {
                steps::model::fetch(workspace, active(workspace, env.as_ref())?, runner)
            }
            Step::EnsureLayout => steps::layout::ensure(workspace),
            Step::SeedConfig => steps::secrets::seed(workspace),
            Step::CompletionGuidance => Ok(steps::guidance::print(workspace)),
        }
    }
}

/// The activated environment; package steps only run after activation
fn active<'e>(workspace: &Workspace, env: Option<&'e IsolatedEnv>) -> Result<&'e IsolatedEnv> {
    env.ok_or_else(|| BootstrapError::EnvironmentNotFound {
        path: workspace.env_layout().root().display().to_string(),
    })
}
