use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub const STAGING_DIR_NAME: &str = "last_week";
pub const ARCHIVE_DIR_NAME: &str = "last_month";

/// Entry observed while listing a scan root. Discarded after the pass.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: OsString,
    pub is_dir: bool,
    pub modified_at: DateTime<Utc>,
}

impl DirectoryEntry {
    pub fn is_dotfile(&self) -> bool {
        self.name.to_string_lossy().starts_with('.')
    }
}

/// Minimum age in whole days before an entry is rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AgeThreshold(i64);

impl AgeThreshold {
    /// Root to `last_week`.
    pub const STAGING: AgeThreshold = AgeThreshold(7);
    /// `last_week` to `last_month`.
    pub const ARCHIVE: AgeThreshold = AgeThreshold(14);

    pub const fn days(days: i64) -> Self {
        AgeThreshold(days)
    }

    pub fn as_days(&self) -> i64 {
        self.0
    }

    pub fn is_met_by(&self, age_in_days: i64) -> bool {
        age_in_days >= self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationTarget {
    name: &'static str,
    path: PathBuf,
}

impl RotationTarget {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The two staging tiers under a rotation root. Doubles as the set of
/// protected names that a root scan must never move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationTargets {
    root: PathBuf,
    staging: RotationTarget,
    archive: RotationTarget,
}

impl RotationTargets {
    pub fn resolve(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let staging = RotationTarget {
            name: STAGING_DIR_NAME,
            path: root.join(STAGING_DIR_NAME),
        };
        let archive = RotationTarget {
            name: ARCHIVE_DIR_NAME,
            path: root.join(ARCHIVE_DIR_NAME),
        };
        Self {
            root,
            staging,
            archive,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn staging(&self) -> &RotationTarget {
        &self.staging
    }

    pub fn archive(&self) -> &RotationTarget {
        &self.archive
    }

    pub fn iter(&self) -> impl Iterator<Item = &RotationTarget> {
        [&self.archive, &self.staging].into_iter()
    }

    /// Returns the target guarding `name` when `scan_root` is the rotation root.
    /// Scans of the tiers themselves protect nothing.
    pub fn protecting(&self, scan_root: &Path, name: &OsStr) -> Option<&RotationTarget> {
        if scan_root != self.root.as_path() {
            return None;
        }
        self.iter().find(|target| name == target.name)
    }
}

/// Tier an entry's age falls into for the informational verbose line.
/// The cutoffs are fixed and unrelated to the threshold driving the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierHint {
    LastMonth,
    LastWeek,
}

impl TierHint {
    pub fn classify(age_in_days: i64) -> Option<Self> {
        match age_in_days {
            d if d >= 30 => Some(TierHint::LastMonth),
            d if d >= 7 => Some(TierHint::LastWeek),
            _ => None,
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            TierHint::LastMonth => ARCHIVE_DIR_NAME,
            TierHint::LastWeek => STAGING_DIR_NAME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Dotfile,
    Subdirectory,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
    Moved { destination: PathBuf },
    Planned { destination: PathBuf },
    Kept,
    Skipped { reason: SkipReason },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    pub name: String,
    /// `None` for entries skipped before the age was computed.
    pub age_in_days: Option<i64>,
    #[serde(flatten)]
    pub status: EntryStatus,
}

/// Result of one `rotate` pass over a single directory.
#[derive(Debug, Clone, Serialize)]
pub struct RotationReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub threshold_days: AgeThreshold,
    pub dry_run: bool,
    pub entries: Vec<EntryOutcome>,
}

impl RotationReport {
    pub fn new(source: &Path, destination: &Path, threshold: AgeThreshold, dry_run: bool) -> Self {
        Self {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            threshold_days: threshold,
            dry_run,
            entries: Vec::new(),
        }
    }

    fn count(&self, pred: impl Fn(&EntryStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.status)).count()
    }

    pub fn moved(&self) -> usize {
        self.count(|s| matches!(s, EntryStatus::Moved { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|s| matches!(s, EntryStatus::Planned { .. }))
    }

    pub fn kept(&self) -> usize {
        self.count(|s| matches!(s, EntryStatus::Kept))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, EntryStatus::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, EntryStatus::Failed { .. }))
    }

    pub fn outcome(&self, name: &str) -> Option<&EntryOutcome> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Both stages of a run, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub archive_stage: RotationReport,
    pub staging_stage: RotationReport,
}

impl RunReport {
    pub fn total_moved(&self) -> usize {
        self.archive_stage.moved() + self.staging_stage.moved()
    }

    pub fn total_failed(&self) -> usize {
        self.archive_stage.failed() + self.staging_stage.failed()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
