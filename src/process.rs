//! Subprocess execution
//!
//! Every external tool the bootstrapper drives (the interpreter, pip, the
//! model downloader) is described as a [`CommandSpec`] and run through a
//! [`CommandRunner`]. Child processes inherit stdio so their diagnostics
//! reach the user unchanged.

use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, ExitStatus};

use console::Style;

use crate::error::{BootstrapError, Result};

/// A fully described subprocess invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: OsString,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    env_removals: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            envs: Vec::new(),
            env_removals: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn env_remove(mut self, key: impl AsRef<OsStr>) -> Self {
        self.env_removals.push(key.as_ref().to_os_string());
        self
    }

    #[allow(dead_code)]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    #[allow(dead_code)]
    pub fn arg_list(&self) -> &[OsString] {
        &self.args
    }

    /// Value this command sets for `key`, if any
    #[allow(dead_code)]
    pub fn env_value(&self, key: &str) -> Option<&OsStr> {
        self.envs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_os_str())
    }

    #[allow(dead_code)]
    pub fn removes_env(&self, key: &str) -> bool {
        self.env_removals.iter().any(|k| k == key)
    }

    /// Shell-like rendering for messages, e.g. `venv/bin/python -m pip install -r requirements.txt`
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| quote(&part.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build the `std::process::Command` rooted at `cwd`
    pub fn to_command(&self, cwd: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(cwd);
        for key in &self.env_removals {
            command.env_remove(key);
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }
        command
    }
}

fn quote(part: &str) -> String {
    if !part.is_empty() && !part.contains(char::is_whitespace) {
        part.to_string()
    } else {
        format!("'{part}'")
    }
}

/// Runs subprocesses on behalf of the bootstrap steps
pub trait CommandRunner {
    /// Run to completion; a non-zero exit is an error
    fn run(&mut self, spec: &CommandSpec) -> Result<()>;
}

/// Runs commands for real, in the workspace root
pub struct SystemRunner<'a> {
    cwd: &'a Path,
    verbose: bool,
}

impl<'a> SystemRunner<'a> {
    pub fn new(cwd: &'a Path, verbose: bool) -> Self {
        Self { cwd, verbose }
    }
}

impl CommandRunner for SystemRunner<'_> {
    fn run(&mut self, spec: &CommandSpec) -> Result<()> {
        if self.verbose {
            eprintln!("{} {}", Style::new().dim().apply_to("$"), spec.display());
        }

        let status = spec
            .to_command(self.cwd)
            .status()
            .map_err(|e| spawn_error(spec, &e))?;

        check_status(spec, status)
    }
}

fn spawn_error(spec: &CommandSpec, err: &std::io::Error) -> BootstrapError {
    if err.kind() == ErrorKind::NotFound {
        BootstrapError::InterpreterNotFound {
            python: spec.program.to_string_lossy().into_owned(),
        }
    } else {
        BootstrapError::CommandSpawnFailed {
            command: spec.display(),
            reason: err.to_string(),
        }
    }
}

fn check_status(spec: &CommandSpec, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    Err(BootstrapError::CommandFailed {
        command: spec.display(),
        status: status
            .code()
            .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}")),
        code: status.code(),
    })
}
