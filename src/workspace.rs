//! Workspace: the project checkout being provisioned
//!
//! All configured paths are relative to the workspace root; this type
//! resolves them once so the steps only ever see absolute paths.

use std::path::{Path, PathBuf};

use crate::config::BootstrapConfig;
use crate::environment::EnvLayout;
use crate::error::{BootstrapError, Result, fs::io_error};

/// A resolved workspace root plus its bootstrap configuration
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: BootstrapConfig,
}

impl Workspace {
    /// Open the workspace at `path` (current directory when `None`).
    ///
    /// Loads `bootstrap.yaml` if present and applies the interpreter override.
    pub fn open(path: Option<PathBuf>, python: Option<String>) -> Result<Self> {
        let root = resolve_root(path)?;
        let config = BootstrapConfig::load(&root)?.with_python(python);
        Ok(Self::new(root, config))
    }

    pub fn new(root: impl Into<PathBuf>, config: BootstrapConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn env_layout(&self) -> EnvLayout {
        EnvLayout::new(self.root.join(&self.config.venv_dir))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.config.manifest)
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.config.template)
    }

    pub fn config_file_path(&self) -> PathBuf {
        self.root.join(&self.config.config_file)
    }

    /// Whether the config file is present; a dangling symlink counts
    pub fn has_config_file(&self) -> bool {
        std::fs::symlink_metadata(self.config_file_path()).is_ok()
    }

    pub fn data_dirs(&self) -> Vec<PathBuf> {
        self.config
            .data_dirs
            .iter()
            .map(|dir| self.root.join(dir))
            .collect()
    }

    /// Render `path` relative to the workspace root for messages
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => std::env::current_dir()
            .map_err(|e| io_error("Failed to get current directory", e))?,
    };

    if !path.is_dir() {
        return Err(BootstrapError::WorkspaceNotFound {
            path: path.display().to_string(),
        });
    }

    dunce::canonicalize(&path).map_err(|e| io_error(format!("Failed to resolve {}", path.display()), e))
}
