//! Isolated Python environment
//!
//! Shell activation (`source venv/bin/activate`) mutates the calling shell.
//! Here activation produces an [`IsolatedEnv`] value instead, and every
//! package command is built from it: the environment's own interpreter,
//! `VIRTUAL_ENV` pointing at the environment, its script directory first on
//! `PATH`, and `PYTHONHOME` cleared.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};
use crate::process::CommandSpec;

#[cfg(windows)]
const SCRIPTS_DIR: &str = "Scripts";
#[cfg(not(windows))]
const SCRIPTS_DIR: &str = "bin";

#[cfg(windows)]
const PYTHON_EXE: &str = "python.exe";
#[cfg(not(windows))]
const PYTHON_EXE: &str = "python";

/// Marker file every virtual environment carries
const PYVENV_CFG: &str = "pyvenv.cfg";

/// Directory layout of a virtual environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLayout {
    root: PathBuf,
}

impl EnvLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join(SCRIPTS_DIR)
    }

    pub fn python(&self) -> PathBuf {
        self.scripts_dir().join(PYTHON_EXE)
    }

    /// Whether a usable environment already exists here
    pub fn exists(&self) -> bool {
        self.root.join(PYVENV_CFG).is_file() && self.python().is_file()
    }

    /// Command that creates this environment with `python`
    pub fn create_command(&self, python: &str) -> CommandSpec {
        CommandSpec::new(python)
            .args(["-m", "venv"])
            .arg(&self.root)
    }
}

/// An activated environment: the context every package command runs in
#[derive(Debug, Clone)]
pub struct IsolatedEnv {
    layout: EnvLayout,
    path: OsString,
}

impl IsolatedEnv {
    /// Activate the environment at `layout`, prepending its scripts to `base_path`
    pub fn activate(layout: EnvLayout, base_path: Option<OsString>) -> Result<Self> {
        if !layout.python().is_file() {
            return Err(BootstrapError::EnvironmentNotFound {
                path: layout.root().display().to_string(),
            });
        }

        let inherited = base_path.unwrap_or_default();
        let path = std::env::join_paths(
            std::iter::once(layout.scripts_dir())
                .chain(std::env::split_paths(&inherited).filter(|p| !p.as_os_str().is_empty())),
        )
        .map_err(|e| BootstrapError::IoError {
            message: format!("Cannot put {} on PATH: {e}", layout.scripts_dir().display()),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { layout, path })
    }

    /// Activate using the `PATH` of the current process
    pub fn activate_from_process(layout: EnvLayout) -> Result<Self> {
        Self::activate(layout, std::env::var_os("PATH"))
    }

    #[allow(dead_code)]
    pub fn layout(&self) -> &EnvLayout {
        &self.layout
    }

    /// `<env python> -m <module>` with the environment applied
    pub fn module(&self, module: &str) -> CommandSpec {
        CommandSpec::new(self.layout.python())
            .args(["-m", module])
            .env("VIRTUAL_ENV", self.layout.root())
            .env("PATH", &self.path)
            .env_remove("PYTHONHOME")
    }

    /// `pip install --upgrade pip`
    pub fn upgrade_pip(&self) -> CommandSpec {
        self.module("pip").args(["install", "--upgrade", "pip"])
    }

    /// `pip install -r <manifest>`
    pub fn install_requirements(&self, manifest: &Path) -> CommandSpec {
        self.module("pip").args(["install", "-r"]).arg(manifest)
    }

    /// `<downloader> download <model>`
    pub fn download_model(&self, downloader: &str, model: &str) -> CommandSpec {
        self.module(downloader).args(["download", model])
    }
}
