use crate::config::LogFormat;
use crate::utils::error::{KickrocksError, Result};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub rotation: RotationConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotationConfig {
    pub dir: Option<String>,
    pub skip_dotfiles: Option<bool>,
    pub skip_subdirs: Option<bool>,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| KickrocksError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| KickrocksError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| KickrocksError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(dir) = &self.rotation.dir {
            validate_path("rotation.dir", Path::new(dir))?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            validate_one_of("logging.format", format, &LogFormat::NAMES)?;
        }

        Ok(())
    }

    pub fn dir(&self) -> Option<PathBuf> {
        self.rotation.dir.as_ref().map(PathBuf::from)
    }

    pub fn skip_dotfiles(&self) -> bool {
        self.rotation.skip_dotfiles.unwrap_or(false)
    }

    pub fn skip_subdirs(&self) -> bool {
        self.rotation.skip_subdirs.unwrap_or(false)
    }

    pub fn dry_run(&self) -> bool {
        self.rotation.dry_run.unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[rotation]
dir = "/srv/drop"
skip_dotfiles = true
skip_subdirs = false

[logging]
verbose = true
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.dir(), Some(PathBuf::from("/srv/drop")));
        assert!(config.skip_dotfiles());
        assert!(!config.skip_subdirs());
        assert!(!config.dry_run());
        assert!(config.verbose());
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.dir(), None);
        assert!(!config.skip_dotfiles());
        assert!(!config.verbose());
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KICKROCKS_TEST_ROOT", "/data/incoming");

        let toml_content = r#"
[rotation]
dir = "${KICKROCKS_TEST_ROOT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.dir(), Some(PathBuf::from("/data/incoming")));

        std::env::remove_var("KICKROCKS_TEST_ROOT");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let toml_content = r#"
[rotation]
dir = "${KICKROCKS_SURELY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.dir(),
            Some(PathBuf::from("${KICKROCKS_SURELY_UNSET_VAR}"))
        );
    }

    #[test]
    fn test_unknown_log_format_fails_validation() {
        let toml_content = r#"
[logging]
format = "xml"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let err = TomlConfig::from_toml_str("[rotation\ndir = 1").unwrap_err();
        assert!(matches!(err, KickrocksError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[rotation]\nskip_subdirs = true\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(config.skip_subdirs());
    }
}
