//! Configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/uodata/config.toml`
//! - Windows: `%APPDATA%/uodata/config.toml`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured data directory.
pub const DATA_DIR_ENV: &str = "UODATA_DIR";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Client data directory; skips discovery when it exists.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Extra directories scanned after the registry.
    #[serde(default)]
    pub search_paths: Vec<String>,

    /// Scan the Windows registry for installations.
    #[serde(default = "default_true")]
    pub use_registry: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "warn".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            search_paths: Vec::new(),
            use_registry: default_true(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the platform location when
    /// `path` is `None`. A missing file at the platform location yields the
    /// defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        if !explicit && !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Picks the data directory: command line, then environment, then file.
    pub fn data_dir(&self, flag: Option<PathBuf>, env: Option<OsString>) -> Option<PathBuf> {
        flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| self.data_dir.as_deref().map(expand_home))
    }

    pub fn search_paths(&self) -> Vec<PathBuf> {
        self.search_paths.iter().map(|p| expand_home(p)).collect()
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("uodata").join("config.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        home_dir().join(".config").join("uodata").join("config.toml")
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
}

/// Expands `~` prefix to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.data_dir.is_none());
        assert!(config.search_paths.is_empty());
        assert!(config.use_registry);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn config_partial_toml() {
        let config: Config = toml::from_str(r#"data_dir = "/opt/uo""#).unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("/opt/uo"));
        assert!(config.use_registry);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn config_full_toml() {
        let toml_str = r#"
            data_dir = "/opt/uo"
            search_paths = ["/srv/uo", "~/uo"]
            use_registry = false
            log_filter = "uodata_locator=trace"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.use_registry);
        assert_eq!(config.log_filter, "uodata_locator=trace");

        let paths = config.search_paths();
        assert_eq!(paths[0], PathBuf::from("/srv/uo"));
        assert!(paths[1].ends_with("uo"));
        assert!(!paths[1].to_string_lossy().contains('~'));
    }

    #[test]
    fn data_dir_precedence() {
        let config = Config {
            data_dir: Some("/from/file".into()),
            ..Config::default()
        };

        assert_eq!(
            config.data_dir(Some("/from/flag".into()), Some("/from/env".into())),
            Some(PathBuf::from("/from/flag"))
        );
        assert_eq!(
            config.data_dir(None, Some("/from/env".into())),
            Some(PathBuf::from("/from/env"))
        );
        assert_eq!(
            config.data_dir(None, Some(OsString::new())),
            Some(PathBuf::from("/from/file"))
        );
        assert_eq!(config.data_dir(None, None), Some(PathBuf::from("/from/file")));
        assert_eq!(Config::default().data_dir(None, None), None);
    }

    #[test]
    fn load_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "search_paths = [\"/srv/uo\"]\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.search_paths, vec!["/srv/uo".to_string()]);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_invalid_toml_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "use_registry = \"maybe\"").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = Config {
            data_dir: Some("/opt/uo".into()),
            search_paths: vec!["/srv/uo".into()],
            use_registry: false,
            log_filter: "debug".into(),
        };
        let parsed: Config = toml::from_str(&toml::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(parsed.data_dir.as_deref(), Some("/opt/uo"));
        assert_eq!(parsed.search_paths, vec!["/srv/uo".to_string()]);
        assert!(!parsed.use_registry);
    }

    #[test]
    fn config_path_not_empty() {
        assert!(config_path().to_string_lossy().contains("uodata"));
    }
}
