use crate::config::RotationSettings;
use crate::core::age::age_in_days;
use crate::domain::model::{
    AgeThreshold, DirectoryEntry, EntryOutcome, EntryStatus, RotationReport, RotationTargets,
    SkipReason, TierHint,
};
use crate::domain::ports::Clock;
use crate::utils::error::{KickrocksError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Moves aged entries of one directory into another.
pub struct Rotator<'a, C: Clock> {
    settings: &'a RotationSettings,
    targets: &'a RotationTargets,
    clock: C,
}

impl<'a, C: Clock> Rotator<'a, C> {
    pub fn new(settings: &'a RotationSettings, targets: &'a RotationTargets, clock: C) -> Self {
        Self {
            settings,
            targets,
            clock,
        }
    }

    /// Rotates every immediate entry of `source_dir` whose age reaches
    /// `threshold` into `dest_dir`.
    ///
    /// A listing failure aborts the pass. A failed move is recorded in the
    /// report and the pass carries on with the next entry.
    pub fn rotate(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        threshold: AgeThreshold,
    ) -> Result<RotationReport> {
        let entries = list_entries(source_dir)?;
        tracing::debug!(
            "Scanning {} ({} entries, threshold {} days)",
            source_dir.display(),
            entries.len(),
            threshold.as_days()
        );

        let mut report =
            RotationReport::new(source_dir, dest_dir, threshold, self.settings.dry_run);
        for entry in &entries {
            let (outcome, lines) =
                self.evaluate(entry, source_dir, dest_dir, threshold, self.clock.now());
            if self.settings.verbose {
                for line in &lines {
                    tracing::info!("{}", line);
                }
            }
            report.entries.push(outcome);
        }

        tracing::info!(
            "{} -> {}: {} moved, {} planned, {} kept, {} skipped, {} failed",
            source_dir.display(),
            dest_dir.display(),
            report.moved(),
            report.planned(),
            report.kept(),
            report.skipped(),
            report.failed()
        );

        Ok(report)
    }

    fn evaluate(
        &self,
        entry: &DirectoryEntry,
        source_dir: &Path,
        dest_dir: &Path,
        threshold: AgeThreshold,
        now: DateTime<Utc>,
    ) -> (EntryOutcome, Vec<ProgressLine>) {
        let name = entry.name.to_string_lossy().into_owned();
        let mut lines = Vec::new();
        let skipped = |reason| EntryOutcome {
            name: name.clone(),
            age_in_days: None,
            status: EntryStatus::Skipped { reason },
        };

        if self.settings.skip_dotfiles && entry.is_dotfile() {
            return (skipped(SkipReason::Dotfile), lines);
        }
        if self.settings.skip_subdirs && entry.is_dir {
            return (skipped(SkipReason::Subdirectory), lines);
        }
        if let Some(target) = self.targets.protecting(source_dir, &entry.name) {
            lines.push(ProgressLine::Protected {
                path: target.path().to_path_buf(),
            });
            return (skipped(SkipReason::Protected), lines);
        }

        let age = age_in_days(now, entry.modified_at);
        let from = source_dir.join(&entry.name);
        let to = dest_dir.join(&entry.name);

        let status = if !threshold.is_met_by(age) {
            EntryStatus::Kept
        } else if self.settings.dry_run {
            lines.push(ProgressLine::WouldMove {
                from,
                to: to.clone(),
            });
            EntryStatus::Planned { destination: to }
        } else {
            match move_entry(&from, &to) {
                Ok(()) => {
                    lines.push(ProgressLine::Moved {
                        from,
                        to: to.clone(),
                    });
                    EntryStatus::Moved { destination: to }
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    EntryStatus::Failed {
                        error: e.to_string(),
                    }
                }
            }
        };

        if let Some(hint) = TierHint::classify(age) {
            lines.push(ProgressLine::TierHint {
                name: name.clone(),
                hint,
            });
        }

        let outcome = EntryOutcome {
            name,
            age_in_days: Some(age),
            status,
        };
        (outcome, lines)
    }
}

/// Human-readable line printed for an entry when verbose output is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressLine {
    Protected { path: PathBuf },
    Moved { from: PathBuf, to: PathBuf },
    WouldMove { from: PathBuf, to: PathBuf },
    /// Fixed 30/7-day tiers, printed whether or not the entry moved.
    TierHint { name: String, hint: TierHint },
}

impl fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressLine::Protected { path } => {
                write!(f, "{} is a protected directory; Skipping", path.display())
            }
            ProgressLine::Moved { from, to } => {
                write!(f, "{} moved to {}", from.display(), to.display())
            }
            ProgressLine::WouldMove { from, to } => {
                write!(f, "{} would be moved to {}", from.display(), to.display())
            }
            ProgressLine::TierHint { name, hint } => {
                write!(f, "{} to be moved to {} dir", name, hint.dir_name())
            }
        }
    }
}

/// Lists the immediate entries of `dir`, sorted by name. Symlinks are
/// described by their own metadata, never by what they point at.
pub fn list_entries(dir: &Path) -> Result<Vec<DirectoryEntry>> {
    let read_err = |source| KickrocksError::ReadDirError {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(dir).map_err(read_err)? {
        let dir_entry = dir_entry.map_err(read_err)?;
        let metadata = fs::symlink_metadata(dir_entry.path()).map_err(read_err)?;
        let modified = metadata.modified().map_err(read_err)?;

        entries.push(DirectoryEntry {
            name: dir_entry.file_name(),
            is_dir: metadata.is_dir(),
            modified_at: DateTime::<Utc>::from(modified),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(entries)
}

/// Renames `from` to `to` in place. Both paths must share a filesystem.
pub fn move_entry(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| KickrocksError::RenameError {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}
