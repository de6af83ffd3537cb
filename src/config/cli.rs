use crate::config::toml_config::TomlConfig;
use crate::config::{executable_dir, RotationSettings};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "kickrocks")]
#[command(about = "Rotate files untouched for a week into last_week, and for two more into last_month")]
pub struct CliConfig {
    /// Directory to rotate [default: the directory holding this executable]
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Never rotate dotfiles such as .env
    #[arg(long = "skipdotfiles", alias = "skip-dotfiles")]
    pub skip_dotfiles: bool,

    /// Never rotate sub-directories
    #[arg(long = "skipsubdirs", alias = "skip-subdirs")]
    pub skip_subdirs: bool,

    /// Describe every move and protected directory
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML file with defaults for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report what would move without renaming anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl CliConfig {
    pub fn load_config_file(&self) -> Result<Option<TomlConfig>> {
        self.config
            .as_ref()
            .map(|path| TomlConfig::from_file(path))
            .transpose()
    }

    pub fn is_verbose(&self, file: Option<&TomlConfig>) -> bool {
        self.verbose || file.is_some_and(|f| f.verbose())
    }

    /// Merges flags with the optional config file. `--dir` wins over the
    /// file, switches are on when either source sets them.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> Result<RotationSettings> {
        let root = match (&self.dir, file.and_then(|f| f.dir())) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => dir,
            (None, None) => executable_dir()?,
        };

        Ok(RotationSettings {
            root,
            skip_dotfiles: self.skip_dotfiles || file.is_some_and(|f| f.skip_dotfiles()),
            skip_subdirs: self.skip_subdirs || file.is_some_and(|f| f.skip_subdirs()),
            verbose: self.is_verbose(file),
            dry_run: self.dry_run || file.is_some_and(|f| f.dry_run()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = CliConfig::try_parse_from(["kickrocks"]).unwrap();
        assert_eq!(cli.dir, None);
        assert!(!cli.skip_dotfiles);
        assert!(!cli.skip_subdirs);
        assert!(!cli.verbose);

        let settings = cli.resolve(None).unwrap();
        assert_eq!(settings.root, executable_dir().unwrap());
    }

    #[test]
    fn test_flag_spellings() {
        let cli = CliConfig::try_parse_from([
            "kickrocks",
            "--dir",
            "/srv/drop",
            "--skipdotfiles",
            "--skip-subdirs",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.dir, Some(PathBuf::from("/srv/drop")));
        assert!(cli.skip_dotfiles);
        assert!(cli.skip_subdirs);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_dir_overrides_file() {
        let file = TomlConfig::from_toml_str(
            "[rotation]\ndir = \"/from/file\"\nskip_dotfiles = true\n",
        )
        .unwrap();

        let cli = CliConfig::try_parse_from(["kickrocks", "--dir", "/from/cli"]).unwrap();
        let settings = cli.resolve(Some(&file)).unwrap();
        assert_eq!(settings.root, PathBuf::from("/from/cli"));
        assert!(settings.skip_dotfiles);

        let cli = CliConfig::try_parse_from(["kickrocks"]).unwrap();
        let settings = cli.resolve(Some(&file)).unwrap();
        assert_eq!(settings.root, PathBuf::from("/from/file"));
    }
}
