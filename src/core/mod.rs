pub mod age;
pub mod bootstrap;
pub mod engine;
pub mod rotate;

pub use crate::domain::model::{AgeThreshold, RotationReport, RotationTargets, RunReport};
pub use crate::domain::ports::{Clock, FixedClock, SystemClock};
pub use crate::utils::error::Result;
