//! File system errors

use std::path::Path;

use super::BootstrapError;

/// Creates a read failure for `path`
pub fn read_failed(path: &Path, err: &std::io::Error) -> BootstrapError {
    BootstrapError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a write failure for `path`
pub fn write_failed(path: &Path, err: &std::io::Error) -> BootstrapError {
    BootstrapError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error with a context message
pub fn io_error(message: impl Into<String>, err: std::io::Error) -> BootstrapError {
    BootstrapError::IoError {
        message: message.into(),
        source: Some(Box::new(err)),
    }
}
