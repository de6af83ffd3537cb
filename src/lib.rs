pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{toml_config::TomlConfig, RotationSettings};
pub use crate::core::{engine::RotationEngine, rotate::Rotator};
pub use utils::error::{KickrocksError, Result};
