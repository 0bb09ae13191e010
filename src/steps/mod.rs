//! Provisioning steps
//!
//! The bootstrap is a fixed, ordered list of [`Step`]s. Each step is an
//! idempotent operation returning a [`StepOutcome`]; the runner stops at the
//! first fatal error.

pub mod environment;
pub mod guidance;
pub mod layout;
pub mod model;
pub mod packages;
pub mod secrets;

use std::fmt;

/// One stage of the bootstrap, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CreateEnvironment,
    ActivateEnvironment,
    UpgradePackageManager,
    InstallDependencies,
    FetchModel,
    EnsureLayout,
    SeedConfig,
    CompletionGuidance,
}

impl Step {
    /// All steps, in the order they run
    pub const ALL: [Step; 8] = [
        Step::CreateEnvironment,
        Step::ActivateEnvironment,
        Step::UpgradePackageManager,
        Step::InstallDependencies,
        Step::FetchModel,
        Step::EnsureLayout,
        Step::SeedConfig,
        Step::CompletionGuidance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Step::CreateEnvironment => "Create isolated environment",
            Step::ActivateEnvironment => "Activate environment",
            Step::UpgradePackageManager => "Upgrade package manager",
            Step::InstallDependencies => "Install dependencies",
            Step::FetchModel => "Fetch language model",
            Step::EnsureLayout => "Create data directories",
            Step::SeedConfig => "Seed configuration file",
            Step::CompletionGuidance => "Print next steps",
        }
    }

    /// Best-effort steps report failures as warnings instead of aborting
    pub fn is_fatal(self) -> bool {
        !matches!(self, Step::UpgradePackageManager)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a completed step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step changed something
    Done,
    /// Nothing to do, a previous run already completed it
    AlreadySatisfied,
    /// A best-effort step failed; the run continues
    Warned(String),
    /// Disabled by configuration
    Skipped(String),
}
