//! `~/.skill-arbiter/config.toml`
//!
//! Every field is optional. A missing file means defaults; the file is never
//! created implicitly.

use std::fs;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::audit::DEFAULT_MAX_FILE_BYTES;
use crate::error::ConfigError;
use crate::lifecycle::DEFAULT_SCAN_CONCURRENCY;
use crate::workspace::DEFAULT_SELF_SKILL_NAMES;

pub const CONFIG_DIR: &str = ".skill-arbiter";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_ENV: &str = "ARBITER_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Where this config was read from, if anywhere.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
    /// Workspace root; `~` is expanded.
    pub workspace: Option<String>,
    /// Directory names the arbiter itself is installed under.
    pub self_skill_names: Vec<String>,
    /// Directory names skipped during scans, on top of the built-in list.
    pub extra_skip_dirs: Vec<String>,
    pub scan_concurrency: usize,
    /// Larger files are not scanned.
    pub max_file_bytes: u64,
    pub log_level: String,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            workspace: None,
            self_skill_names: DEFAULT_SELF_SKILL_NAMES
                .iter()
                .map(ToString::to_string)
                .collect(),
            extra_skip_dirs: Vec::new(),
            scan_concurrency: DEFAULT_SCAN_CONCURRENCY,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            log_level: "info".into(),
        }
    }
}

impl ArbiterConfig {
    /// `~/.skill-arbiter/config.toml`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        UserDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from `explicit` (which must exist) or the default location
    /// (which may not).
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (Some(path.to_path_buf()), true),
            None => (Self::default_path(), false),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            if required {
                return Err(ConfigError::Load {
                    path,
                    message: "file does not exist".into(),
                });
            }
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&contents).map_err(|err| match err {
            ConfigError::Load { message, .. } => ConfigError::Load {
                path: path.clone(),
                message,
            },
            other => other,
        })?;
        config.config_path = Some(path);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|err| ConfigError::Load {
            path: PathBuf::new(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_concurrency == 0 {
            return Err(ConfigError::Validation(
                "scan_concurrency must be at least 1".into(),
            ));
        }
        if self.max_file_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_file_bytes must be greater than 0".into(),
            ));
        }
        if parse_level(&self.log_level).is_none() {
            return Err(ConfigError::Validation(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Effective log level: `--verbose`, then `ARBITER_LOG`, then config.
    pub fn log_level(&self, verbose: bool) -> Level {
        if verbose {
            return Level::DEBUG;
        }
        std::env::var(LOG_ENV)
            .ok()
            .and_then(|value| parse_level(&value))
            .or_else(|| parse_level(&self.log_level))
            .unwrap_or(Level::INFO)
    }
}

fn parse_level(value: &str) -> Option<Level> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = ArbiterConfig::from_toml("").unwrap();
        assert_eq!(config, ArbiterConfig::default());
        assert_eq!(config.scan_concurrency, 4);
        assert!(config.self_skill_names.contains(&"openclaw-arbiter".to_string()));
    }

    #[test]
    fn fields_override_defaults() {
        let config = ArbiterConfig::from_toml(
            r#"
workspace = "~/agents/main"
extra_skip_dirs = ["fixtures"]
scan_concurrency = 8
max_file_bytes = 1024
log_level = "warn"
"#,
        )
        .unwrap();
        assert_eq!(config.workspace.as_deref(), Some("~/agents/main"));
        assert_eq!(config.extra_skip_dirs, ["fixtures"]);
        assert_eq!(config.scan_concurrency, 8);
        assert_eq!(config.max_file_bytes, 1024);
        assert_eq!(config.log_level(false), Level::WARN);
        assert_eq!(config.log_level(true), Level::DEBUG);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            ArbiterConfig::from_toml("scan_concurrency = 0"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            ArbiterConfig::from_toml("log_level = \"loud\""),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            ArbiterConfig::from_toml("scan_concurrency = \"many\""),
            Err(ConfigError::Load { .. })
        ));
    }

    #[test]
    fn explicit_path_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(matches!(
            ArbiterConfig::load(Some(&missing)),
            Err(ConfigError::Load { .. })
        ));
    }

    #[test]
    fn load_records_source_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "scan_concurrency = 2\n").unwrap();

        let config = ArbiterConfig::load(Some(&path)).unwrap();
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.scan_concurrency, 2);
    }
}
