use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KickrocksError {
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create rotation directory {}: {source}", .path.display())]
    BootstrapError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    RenameError {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not resolve the executable directory: {0}")]
    ExecutableDirError(std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl KickrocksError {
    /// Every error aborts the run except a failed move of a single entry.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, KickrocksError::RenameError { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            KickrocksError::ReadDirError { path, .. } => {
                format!("Cannot list {}", path.display())
            }
            KickrocksError::BootstrapError { path, .. } => {
                format!("Cannot create {}", path.display())
            }
            KickrocksError::RenameError { from, .. } => {
                format!("Cannot move {}", from.display())
            }
            KickrocksError::ExecutableDirError(_) => {
                "Cannot determine which directory to rotate".to_string()
            }
            KickrocksError::ConfigError { .. }
            | KickrocksError::ConfigValidationError { .. }
            | KickrocksError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            KickrocksError::ReadDirError { .. } => {
                "Check that the directory exists and is readable by this user"
            }
            KickrocksError::BootstrapError { .. } => {
                "Check write permissions on the rotation root"
            }
            KickrocksError::RenameError { .. } => {
                "Make sure the destination is on the same filesystem and the name is free"
            }
            KickrocksError::ExecutableDirError(_) => "Pass the directory explicitly with --dir",
            KickrocksError::ConfigError { .. }
            | KickrocksError::ConfigValidationError { .. }
            | KickrocksError::InvalidConfigValueError { .. } => {
                "Review the command-line flags and the config file"
            }
            KickrocksError::SerializationError(_) => {
                "Retry the run; if it keeps failing, run with --verbose for details"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, KickrocksError>;
