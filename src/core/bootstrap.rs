use crate::domain::model::RotationTargets;
use crate::utils::error::{KickrocksError, Result};
use std::fs::DirBuilder;
use std::path::Path;

pub const TARGET_DIR_MODE: u32 = 0o775;

/// Creates any missing tier directory. Existing paths are left untouched.
pub fn ensure_targets(targets: &RotationTargets) -> Result<()> {
    for target in targets.iter() {
        let path = target.path();
        if path.exists() {
            continue;
        }
        tracing::debug!("Creating rotation directory {}", path.display());
        create_target_dir(path).map_err(|source| KickrocksError::BootstrapError {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn create_target_dir(path: &Path) -> std::io::Result<()> {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(TARGET_DIR_MODE);
    }
    builder.create(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_targets() {
        let temp_dir = TempDir::new().unwrap();
        let targets = RotationTargets::resolve(temp_dir.path());

        ensure_targets(&targets).unwrap();

        assert!(temp_dir.path().join("last_week").is_dir());
        assert!(temp_dir.path().join("last_month").is_dir());
    }

    #[test]
    fn test_existing_targets_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let staging = temp_dir.path().join("last_week");
        std::fs::create_dir(&staging).unwrap();
        std::fs::write(staging.join("keep.txt"), b"data").unwrap();

        ensure_targets(&RotationTargets::resolve(temp_dir.path())).unwrap();

        assert!(staging.join("keep.txt").exists());
        assert!(temp_dir.path().join("last_month").is_dir());
    }

    #[test]
    fn test_missing_root_is_a_bootstrap_error() {
        let temp_dir = TempDir::new().unwrap();
        let targets = RotationTargets::resolve(temp_dir.path().join("gone"));

        let err = ensure_targets(&targets).unwrap_err();
        assert!(matches!(err, KickrocksError::BootstrapError { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_created_with_group_writable_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        ensure_targets(&RotationTargets::resolve(temp_dir.path())).unwrap();

        let mode = std::fs::metadata(temp_dir.path().join("last_week"))
            .unwrap()
            .permissions()
            .mode();
        // umask may clear bits but never adds any
        assert_eq!(mode & !TARGET_DIR_MODE & 0o777, 0);
    }
}
