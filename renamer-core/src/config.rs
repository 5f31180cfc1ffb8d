use crate::entry::STATE_DIR;
use crate::log::Level;
use crate::plan::{CollisionPolicy, ExtensionPolicy};
use crate::report::ReportFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "table", "summary", "json" or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Back up originals before renaming
    #[serde(default)]
    pub backup: bool,

    /// Where backups are written
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    #[serde(default)]
    pub collision: CollisionPolicy,

    #[serde(default)]
    pub case_extension: ExtensionPolicy,

    /// Replace targets that already exist on disk
    #[serde(default)]
    pub allow_overwrite: bool,

    #[serde(default = "default_log_level")]
    pub log_level: Level,

    /// Save an operations log after each rename run
    #[serde(default)]
    pub save_log: Option<ReportFormat>,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            backup: false,
            backup_dir: default_backup_dir(),
            collision: CollisionPolicy::default(),
            case_extension: ExtensionPolicy::default(),
            allow_overwrite: false,
            log_level: default_log_level(),
            save_log: None,
            use_color: None,
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_backup_dir() -> PathBuf {
    Path::new(STATE_DIR).join("backups")
}

fn default_log_level() -> Level {
    Level::Info
}

impl Config {
    /// Load config from .renamer/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(STATE_DIR).join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}
