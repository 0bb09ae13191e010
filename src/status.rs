//! Read-only inspection of a workspace's provisioning state

use serde::Serialize;

use crate::workspace::Workspace;

/// What an inspected path is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Environment,
    Manifest,
    Template,
    DataDirectory,
    ConfigFile,
}

impl ArtifactKind {
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Environment => "Environment",
            ArtifactKind::Manifest => "Manifest",
            ArtifactKind::Template => "Template",
            ArtifactKind::DataDirectory => "Data directory",
            ArtifactKind::ConfigFile => "Config file",
        }
    }

    /// Inputs are checked in; outputs are what the bootstrap produces
    pub fn is_output(self) -> bool {
        matches!(
            self,
            ArtifactKind::Environment | ArtifactKind::DataDirectory | ArtifactKind::ConfigFile
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactStatus {
    pub kind: ArtifactKind,
    pub path: String,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub workspace: String,
    pub artifacts: Vec<ArtifactStatus>,
    /// Every output artifact is present
    pub ready: bool,
}

/// Inspect the workspace without modifying it or running anything
pub fn inspect(workspace: &Workspace) -> StatusReport {
    let mut artifacts = Vec::new();
    let mut add = |kind, path: &std::path::Path, present: bool| {
        artifacts.push(ArtifactStatus {
            kind,
            path: workspace.display_path(path),
            present,
        });
    };

    let layout = workspace.env_layout();
    add(ArtifactKind::Environment, layout.root(), layout.exists());

    let manifest = workspace.manifest_path();
    add(ArtifactKind::Manifest, &manifest, manifest.is_file());

    let template = workspace.template_path();
    add(ArtifactKind::Template, &template, template.is_file());

    for dir in workspace.data_dirs() {
        add(ArtifactKind::DataDirectory, &dir, dir.is_dir());
    }

    add(
        ArtifactKind::ConfigFile,
        &workspace.config_file_path(),
        workspace.has_config_file(),
    );

    let ready = artifacts
        .iter()
        .filter(|a| a.kind.is_output())
        .all(|a| a.present);

    StatusReport {
        workspace: workspace.root().display().to_string(),
        artifacts,
        ready,
    }
}
