//! Bootstrap configuration (bootstrap.yaml) data structures
//!
//! Every key is optional. A workspace without a `bootstrap.yaml` gets the
//! defaults below, which describe the standard project layout:
//! a `venv/` environment, `requirements.txt`, the `en_core_web_sm` spaCy
//! model, three data directories and a `.env` seeded from `.env.example`.


use std::fs;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::{BootstrapError, Result};

/// File name looked up in the workspace root
pub const CONFIG_FILE_NAME: &str = "bootstrap.yaml";

/// Bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Interpreter used to create the isolated environment
    #[serde(default = "default_python")]
    pub python: String,

    /// Environment directory, relative to the workspace root
    #[serde(default = "default_venv_dir")]
    pub venv_dir: String,

    /// Dependency manifest handed to `pip install -r`
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Model artifact to fetch; `null` disables the step
    #[serde(default = "default_model")]
    pub model: Option<ModelConfig>,

    /// Data directories created on every run
    #[serde(default = "default_data_dirs")]
    pub data_dirs: Vec<String>,

    /// Checked-in template for the local config file
    #[serde(default = "default_template")]
    pub template: String,

    /// Local config file seeded from the template
    #[serde(default = "default_config_file")]
    pub config_file: String,

    /// Commands printed once provisioning has finished
    #[serde(default = "default_next_steps")]
    pub next_steps: Vec<String>,
}

/// Model artifact fetched through a Python module's `download` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Module run as `python -m <downloader> download <name>`
    #[serde(default = "default_downloader")]
    pub downloader: String,

    /// Model identifier
    pub name: String,
}

fn default_python() -> String {
    if cfg!(windows) {
        "python".to_string()
    } else {
        "python3".to_string()
    }
}

fn default_venv_dir() -> String {
    "venv".to_string()
}

fn default_manifest() -> String {
    "requirements.txt".to_string()
}

fn default_downloader() -> String {
    "spacy".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_model() -> Option<ModelConfig> {
    Some(ModelConfig {
        downloader: default_downloader(),
        name: "en_core_web_sm".to_string(),
    })
}

fn default_data_dirs() -> Vec<String> {
    ["data/cache", "data/vector_store", "data/pdfs"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_template() -> String {
    ".env.example".to_string()
}

fn default_config_file() -> String {
    ".env".to_string()
}

fn default_next_steps() -> Vec<String> {
    vec![
        "python run.py --ingest".to_string(),
        "streamlit run src/ui/app.py".to_string(),
    ]
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            venv_dir: default_venv_dir(),
            manifest: default_manifest(),
            model: default_model(),
            data_dirs: default_data_dirs(),
            template: default_template(),
            config_file: default_config_file(),
            next_steps: default_next_steps(),
        }
    }
}

impl BootstrapConfig {
    /// Parse configuration from a YAML string and validate it
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // A file with only comments deserializes to unit, not to an empty mapping
        let has_content = yaml.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#') && line != "---" && line != "..."
        });
        if !has_content {
            return Ok(Self::default());
        }

        // `~` and `null` documents carry no settings either
        let config = serde_yaml::from_str::<Option<Self>>(yaml)
            .map_err(|e| BootstrapError::ConfigParseFailed {
                path: CONFIG_FILE_NAME.to_string(),
                reason: e.to_string(),
            })?
            .unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Load `bootstrap.yaml` from the workspace root, falling back to defaults
    pub fn load(workspace_root: &Path) -> Result<Self> {
        let path = workspace_root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| BootstrapError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            BootstrapError::ConfigParseFailed { reason, .. } => {
                BootstrapError::ConfigParseFailed {
                    path: path.display().to_string(),
                    reason,
                }
            }
            other => other,
        })
    }

    /// Check the constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.python.trim().is_empty() {
            return Err(invalid("python must not be empty"));
        }

        validate_relative("venv_dir", &self.venv_dir)?;
        validate_relative("manifest", &self.manifest)?;
        validate_relative("template", &self.template)?;
        validate_relative("config_file", &self.config_file)?;

        if normalized(&self.template) == normalized(&self.config_file) {
            return Err(invalid("template and config_file must be different files"));
        }

        if self.data_dirs.is_empty() {
            return Err(invalid("data_dirs must list at least one directory"));
        }
        for dir in &self.data_dirs {
            validate_relative("data_dirs", dir)?;
        }

        if let Some(model) = &self.model {
            if model.name.trim().is_empty() {
                return Err(invalid("model.name must not be empty"));
            }
            if model.downloader.trim().is_empty() {
                return Err(invalid("model.downloader must not be empty"));
            }
        }

        Ok(())
    }

    /// Replace the interpreter, e.g. from `--python` or `BOOTSTRAP_PYTHON`
    #[must_use]
    pub fn with_python(mut self, python: Option<String>) -> Self {
        if let Some(python) = python.filter(|p| !p.trim().is_empty()) {
            self.python = python;
        }
        self
    }
}

fn invalid(message: impl Into<String>) -> BootstrapError {
    BootstrapError::ConfigInvalid {
        message: message.into(),
    }
}

/// Workspace paths must stay inside the workspace
fn validate_relative(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{key} must not be empty")));
    }

    let path = Path::new(value);
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if escapes {
        return Err(invalid(format!(
            "{key} must be a path inside the workspace, got '{value}'"
        )));
    }

    if normalized(value).is_empty() {
        return Err(invalid(format!(
            "{key} must name a path below the workspace root, got '{value}'"
        )));
    }

    Ok(())
}

/// Path components with `.` dropped, so `./.env` and `.env` compare equal
fn normalized(value: &str) -> Vec<Component<'_>> {
    Path::new(value)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
