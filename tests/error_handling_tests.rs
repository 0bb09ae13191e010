//! Error handling integration tests

mod common;

use common::{TestWorkspace, bootstrapper_cmd};
use predicates::prelude::*;

#[test]
fn test_corrupted_bootstrap_yaml() {
    let workspace = TestWorkspace::with_project_files();
    workspace.write_file("bootstrap.yaml", "data_dirs: [unterminated\n");

    bootstrapper_cmd()
        .current_dir(&workspace.path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse configuration file"))
        .stderr(predicate::str::contains("bootstrap.yaml"));

    assert!(!workspace.file_exists("venv"));
}

#[test]
fn test_unknown_configuration_key() {
    let workspace = TestWorkspace::with_project_files();
    workspace.write_file("bootstrap.yaml", "virtualenv: venv\n");

    bootstrapper_cmd()
        .current_dir(&workspace.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn test_configuration_escaping_workspace() {
    let workspace = TestWorkspace::with_project_files();
    workspace.write_file("bootstrap.yaml", "data_dirs: [../elsewhere]\n");

    bootstrapper_cmd()
        .current_dir(&workspace.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));

    assert!(!workspace.temp.path().join("elsewhere").exists());
}

#[cfg(unix)]
#[test]
fn test_file_blocking_data_directory() {
    let workspace = TestWorkspace::with_project_files();
    workspace.write_file("data", "oops");

    workspace
        .bootstrap_cmd()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Path exists but is not a directory: data"))
        .stderr(predicate::str::contains("help:"));

    assert_eq!(workspace.read_file("data"), "oops");
    assert!(!workspace.file_exists(".env"));
}

#[cfg(unix)]
#[test]
fn test_error_names_failing_step() {
    let workspace = TestWorkspace::with_project_files();
    workspace.remove_file(".env.example");

    workspace
        .bootstrap_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step 'Seed configuration file' failed"));
}
