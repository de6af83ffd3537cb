#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{KickrocksError, Result};
use crate::utils::validation::{validate_existing_dir, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fully resolved options for one rotation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSettings {
    /// Directory whose entries are rotated; the tiers live directly under it.
    pub root: PathBuf,
    pub skip_dotfiles: bool,
    pub skip_subdirs: bool,
    pub verbose: bool,
    pub dry_run: bool,
}

impl RotationSettings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip_dotfiles: false,
            skip_subdirs: false,
            verbose: false,
            dry_run: false,
        }
    }
}

impl Validate for RotationSettings {
    fn validate(&self) -> Result<()> {
        validate_existing_dir("dir", &self.root)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub const NAMES: [&'static str; 2] = ["compact", "json"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "compact" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Directory holding the running executable, the default rotation root.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(KickrocksError::ExecutableDirError)?;
    exe.parent().map(|p| p.to_path_buf()).ok_or_else(|| {
        KickrocksError::ExecutableDirError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_require_existing_root() {
        let temp_dir = TempDir::new().unwrap();
        assert!(RotationSettings::new(temp_dir.path()).validate().is_ok());
        assert!(RotationSettings::new(temp_dir.path().join("nope"))
            .validate()
            .is_err());
    }

    #[test]
    fn test_executable_dir_exists() {
        let dir = executable_dir().unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_log_format_names() {
        for name in LogFormat::NAMES {
            assert!(LogFormat::parse(name).is_some());
        }
        assert_eq!(LogFormat::parse("pretty"), None);
    }
}
