//! Data directory layout

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result, fs::io_error};
use crate::workspace::Workspace;

use super::StepOutcome;

/// Create every configured data directory, parents included.
///
/// Existing directories are left alone. A regular file sitting where a
/// directory belongs is an error.
pub fn ensure(workspace: &Workspace) -> Result<StepOutcome> {
    let mut created = false;

    for dir in workspace.data_dirs() {
        if dir.is_dir() {
            continue;
        }

        if let Some(blocker) = first_non_directory(workspace.root(), &dir) {
            return Err(BootstrapError::NotADirectory {
                path: workspace.display_path(&blocker),
            });
        }

        fs::create_dir_all(&dir).map_err(|e| {
            io_error(
                format!("Failed to create directory {}", workspace.display_path(&dir)),
                e,
            )
        })?;
        created = true;
    }

    Ok(if created {
        StepOutcome::Done
    } else {
        StepOutcome::AlreadySatisfied
    })
}

/// The first path between `root` and `dir` (inclusive) that exists but is not a directory
fn first_non_directory(root: &Path, dir: &Path) -> Option<PathBuf> {
    let relative = dir.strip_prefix(root).ok()?;
    let mut current = root.to_path_buf();
    for component in relative.components() {
        current.push(component);
        match fs::metadata(&current) {
            Ok(meta) if !meta.is_dir() => return Some(current),
            Ok(_) => {}
            Err(_) => return None,
        }
    }
    None
}
