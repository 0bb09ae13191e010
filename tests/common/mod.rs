//! Common test utilities for bootstrapper integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Python stand-in: handles `-m venv`, `-m pip` and `-m <downloader> download`.
///
/// Every invocation is appended to `$FAKE_PYTHON_LOG`. Failures are switched
/// on through `FAKE_PIP_UPGRADE_FAIL`, `FAKE_PIP_INSTALL_FAIL` and
/// `FAKE_DOWNLOAD_EXIT`.
const FAKE_PYTHON: &str = r#"#!/bin/sh
log="${FAKE_PYTHON_LOG:-/dev/null}"
echo "$* [VIRTUAL_ENV=${VIRTUAL_ENV:-}]" >> "$log"
[ "$1" = "-m" ] || exit 0
case "$2" in
  venv)
    mkdir -p "$3/bin" || exit 1
    cp "$0" "$3/bin/python" || exit 1
    chmod +x "$3/bin/python" || exit 1
    echo "home = /usr/bin" > "$3/pyvenv.cfg"
    ;;
  pip)
    if [ "$4" = "--upgrade" ] && [ -n "$FAKE_PIP_UPGRADE_FAIL" ]; then
      echo "pip: upgrade failed" >&2
      exit 1
    fi
    if [ "$4" = "-r" ]; then
      [ -f "$5" ] || { echo "ERROR: Could not open requirements file" >&2; exit 1; }
      if [ -n "$FAKE_PIP_INSTALL_FAIL" ]; then
        echo "ERROR: No matching distribution found" >&2
        exit 1
      fi
    fi
    ;;
  *)
    if [ "$3" = "download" ] && [ -n "$FAKE_DOWNLOAD_EXIT" ]; then
      echo "download failed: $4" >&2
      exit "$FAKE_DOWNLOAD_EXIT"
    fi
    ;;
esac
exit 0
"#;

pub const TEMPLATE: &str = "GEMINI_API_KEY=\nSCRAPER_RATE_LIMIT=2.0\n";

/// A project checkout in a temporary directory, next to a fake interpreter
pub struct TestWorkspace {
    /// Temporary directory holding the project, the interpreter and the call log
    pub temp: TempDir,
    /// Path to the project root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create an empty project directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("project");
        std::fs::create_dir_all(&path).expect("Failed to create project directory");
        Self { temp, path }
    }

    /// Create a project with a manifest and a config template
    pub fn with_project_files() -> Self {
        let workspace = Self::new();
        workspace.write_file("requirements.txt", "spacy>=3.7\nstreamlit\n");
        workspace.write_file(".env.example", TEMPLATE);
        workspace
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    pub fn remove_file(&self, path: &str) {
        std::fs::remove_file(self.path.join(path)).expect("Failed to remove file");
    }

    /// Install the fake interpreter outside the project and return its path
    #[cfg(unix)]
    pub fn fake_python(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.temp.path().join("fake-python");
        if !path.exists() {
            std::fs::write(&path, FAKE_PYTHON).expect("Failed to write fake python");
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to make fake python executable");
        }
        path
    }

    pub fn log_path(&self) -> PathBuf {
        self.temp.path().join("calls.log")
    }

    /// Interpreter invocations recorded so far
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        let _ = std::fs::remove_file(self.log_path());
    }

    /// Bootstrapper run from the project root with the fake interpreter
    #[cfg(unix)]
    pub fn bootstrap_cmd(&self) -> Command {
        let mut cmd = bootstrapper_cmd();
        cmd.current_dir(&self.path)
            .env("BOOTSTRAP_PYTHON", self.fake_python())
            .env("FAKE_PYTHON_LOG", self.log_path())
            .env_remove("VIRTUAL_ENV");
        cmd
    }

    /// Every path under the project with its content (`None` for directories)
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
        WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .map(|entry| {
                let entry = entry.expect("Failed to walk workspace");
                let relative = entry
                    .path()
                    .strip_prefix(&self.path)
                    .expect("Entry outside workspace")
                    .to_path_buf();
                let content = if entry.file_type().is_dir() {
                    None
                } else {
                    Some(std::fs::read(entry.path()).expect("Failed to read file"))
                };
                (relative, content)
            })
            .collect()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The real bootstrapper binary, with no interpreter override inherited
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn bootstrapper_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bootstrapper").expect("Failed to find bootstrapper binary");
    cmd.env_remove("BOOTSTRAP_PYTHON");
    cmd
}
