//! Seed the local configuration file from its template
//!
//! The config file holds user secrets (the API key). Once it exists it is
//! never written again, whatever its content.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};

use crate::error::{
    BootstrapError, Result,
    fs::{read_failed, write_failed},
};
use crate::workspace::Workspace;

use super::StepOutcome;

/// Copy the template to the config file if and only if the config file is absent
pub fn seed(workspace: &Workspace) -> Result<StepOutcome> {
    if workspace.has_config_file() {
        return Ok(StepOutcome::AlreadySatisfied);
    }
    let target = workspace.config_file_path();

    let template = workspace.template_path();
    let mut source = match File::open(&template) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(BootstrapError::TemplateNotFound {
                path: workspace.display_path(&template),
            });
        }
        Err(e) => return Err(read_failed(&template, &e)),
    };
    let metadata = source.metadata().map_err(|e| read_failed(&template, &e))?;
    if !metadata.is_file() {
        return Err(BootstrapError::TemplateNotFound {
            path: workspace.display_path(&template),
        });
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| write_failed(parent, &e))?;
    }

    let mut dest = match OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Ok(StepOutcome::AlreadySatisfied);
        }
        Err(e) => return Err(write_failed(&target, &e)),
    };

    if let Err(e) = io::copy(&mut source, &mut dest) {
        drop(dest);
        let _ = fs::remove_file(&target);
        return Err(write_failed(&target, &e));
    }

    dest.set_permissions(metadata.permissions())
        .map_err(|e| write_failed(&target, &e))?;

    Ok(StepOutcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BootstrapConfig;
    use tempfile::TempDir;

    const TEMPLATE: &str = "GEMINI_API_KEY=\nSCRAPER_RATE_LIMIT=2.0\n";

    fn workspace(temp: &TempDir) -> Workspace {
        Workspace::new(temp.path(), BootstrapConfig::default())
    }

    #[test]
    fn test_copies_template_when_absent() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env.example"), TEMPLATE).unwrap();

        assert_eq!(seed(&workspace(&temp)).unwrap(), StepOutcome::Done);
        assert_eq!(
            fs::read_to_string(temp.path().join(".env")).unwrap(),
            TEMPLATE
        );
    }

    #[test]
    fn test_existing_config_is_untouched() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env.example"), TEMPLATE).unwrap();
        fs::write(temp.path().join(".env"), "GEMINI_API_KEY=secret\n").unwrap();

        assert_eq!(
            seed(&workspace(&temp)).unwrap(),
            StepOutcome::AlreadySatisfied
        );
        assert_eq!(
            fs::read_to_string(temp.path().join(".env")).unwrap(),
            "GEMINI_API_KEY=secret\n"
        );
    }

    #[test]
    fn test_existing_config_without_template_is_fine() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), "GEMINI_API_KEY=secret\n").unwrap();

        assert_eq!(
            seed(&workspace(&temp)).unwrap(),
            StepOutcome::AlreadySatisfied
        );
    }

    #[test]
    fn test_missing_template_creates_nothing() {
        let temp = TempDir::new().unwrap();

        let err = seed(&workspace(&temp)).unwrap_err();
        assert!(matches!(err, BootstrapError::TemplateNotFound { ref path } if path == ".env.example"));
        assert!(!temp.path().join(".env").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_template_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".env.example")).unwrap();

        let err = seed(&workspace(&temp)).unwrap_err();
        assert!(matches!(err, BootstrapError::TemplateNotFound { .. }));
        assert!(!temp.path().join(".env").exists());
    }

    #[test]
    fn test_nested_config_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env.example"), TEMPLATE).unwrap();
        let config = BootstrapConfig {
            config_file: "config/local.env".to_string(),
            ..BootstrapConfig::default()
        };

        let workspace = Workspace::new(temp.path(), config);
        assert_eq!(seed(&workspace).unwrap(), StepOutcome::Done);
        assert!(temp.path().join("config/local.env").is_file());
    }

    #[test]
    fn test_seeding_twice_keeps_user_edits() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env.example"), TEMPLATE).unwrap();
        let workspace = workspace(&temp);

        seed(&workspace).unwrap();
        fs::write(temp.path().join(".env"), "GEMINI_API_KEY=edited\n").unwrap();
        seed(&workspace).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join(".env")).unwrap(),
            "GEMINI_API_KEY=edited\n"
        );
    }
}
