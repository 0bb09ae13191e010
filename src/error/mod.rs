//! Error types and handling for the bootstrapper
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructors for the common filesystem failures live in [`fs`] so call
//! sites can stay on one line.

pub mod fs;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bootstrap operations
#[derive(Error, Diagnostic, Debug)]
pub enum BootstrapError {
    // Environment errors
    #[error("Python interpreter not found: {python}")]
    #[diagnostic(
        code(bootstrapper::env::interpreter_not_found),
        help("Install Python 3 or point --python / BOOTSTRAP_PYTHON at an interpreter")
    )]
    InterpreterNotFound { python: String },

    #[error("Isolated environment not found at: {path}")]
    #[diagnostic(
        code(bootstrapper::env::not_found),
        help("Remove the directory and run the bootstrapper again to recreate it")
    )]
    EnvironmentNotFound { path: String },

    // Subprocess errors
    #[error("Command failed ({status}): {command}")]
    #[diagnostic(
        code(bootstrapper::command::failed),
        help("See the command output above for details")
    )]
    CommandFailed {
        command: String,
        status: String,
        code: Option<i32>,
    },

    #[error("Failed to start command: {command}: {reason}")]
    #[diagnostic(code(bootstrapper::command::spawn_failed))]
    CommandSpawnFailed { command: String, reason: String },

    // Input errors
    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(bootstrapper::manifest::not_found),
        help("Run the bootstrapper from the project root, or pass --workspace")
    )]
    ManifestNotFound { path: String },

    #[error("Configuration template not found: {path}")]
    #[diagnostic(
        code(bootstrapper::template::not_found),
        help("Restore the template from version control or create the config file by hand")
    )]
    TemplateNotFound { path: String },

    #[error("Path exists but is not a directory: {path}")]
    #[diagnostic(
        code(bootstrapper::layout::not_a_directory),
        help("Move the file out of the way so the directory can be created")
    )]
    NotADirectory { path: String },

    // Workspace errors
    #[error("Workspace not found at: {path}")]
    #[diagnostic(code(bootstrapper::workspace::not_found))]
    WorkspaceNotFound { path: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(bootstrapper::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(bootstrapper::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(bootstrapper::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(bootstrapper::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(bootstrapper::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(bootstrapper::fs::io_error))]
    IoError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Runner errors
    #[error("Step '{step}' failed: {source}")]
    #[diagnostic(code(bootstrapper::step_failed))]
    StepFailed {
        step: String,
        #[source]
        source: Box<BootstrapError>,
    },
}

impl BootstrapError {
    /// The innermost error, looking through step wrappers
    pub fn root(&self) -> &BootstrapError {
        match self {
            BootstrapError::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }

    /// Process exit code for this error.
    ///
    /// A failed subprocess hands its own exit code through; everything else
    /// exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self.root() {
            BootstrapError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Help text of the innermost error, if it has any
    pub fn help_text(&self) -> Option<String> {
        self.root().help().map(|help| help.to_string())
    }
}

impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::IoError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for BootstrapError {
    fn from(err: serde_json::Error) -> Self {
        BootstrapError::IoError {
            message: format!("JSON serialization failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias for bootstrap operations
pub type Result<T> = std::result::Result<T, BootstrapError>;
