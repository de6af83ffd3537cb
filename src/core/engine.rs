use crate::config::RotationSettings;
use crate::core::bootstrap::ensure_targets;
use crate::core::rotate::Rotator;
use crate::domain::model::{AgeThreshold, RotationTargets, RunReport};
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::Result;

pub struct RotationEngine<C: Clock = SystemClock> {
    settings: RotationSettings,
    targets: RotationTargets,
    clock: C,
}

impl RotationEngine<SystemClock> {
    pub fn new(settings: RotationSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> RotationEngine<C> {
    pub fn with_clock(settings: RotationSettings, clock: C) -> Self {
        let targets = RotationTargets::resolve(settings.root.clone());
        Self {
            settings,
            targets,
            clock,
        }
    }

    /// Promotes `last_week` into `last_month`, then stages the root into
    /// `last_week`. Entries staged by this run are not promoted until the next.
    pub fn run(&self) -> Result<RunReport> {
        tracing::info!("Rotating {}", self.targets.root().display());
        if self.settings.dry_run {
            tracing::info!("Dry run: nothing will be moved");
        }

        ensure_targets(&self.targets)?;

        let rotator = Rotator::new(&self.settings, &self.targets, &self.clock);
        let staging = self.targets.staging().path();
        let archive = self.targets.archive().path();

        let archive_stage = rotator.rotate(staging, archive, AgeThreshold::ARCHIVE)?;
        let staging_stage = rotator.rotate(self.targets.root(), staging, AgeThreshold::STAGING)?;

        Ok(RunReport {
            root: self.targets.root().to_path_buf(),
            archive_stage,
            staging_stage,
        })
    }
}
