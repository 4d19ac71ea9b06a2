use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

pub const BASE_DIR_ENV: &str = "UTOOB_HOME";
pub const DEFAULT_DOWNLOAD_PATH: &str = "downloads";
pub const DOWNLOAD_PATH_KEY: &str = "download_path";

const SYS_FILES_SUBDIR: &str = "sys_files";
const CACHE_SUBDIR: &str = "cache";
const CONFIG_FILE: &str = "config.json";
const HISTORY_DB_FILE: &str = "history.db";
const LOG_FILE: &str = "utoob.log";

/// Every filesystem location the tool reads or writes, resolved once at
/// startup and handed to each component.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub base: PathBuf,
    pub sys_files: PathBuf,
    pub config_file: PathBuf,
    pub cache_dir: PathBuf,
    pub history_db: PathBuf,
    pub log_file: PathBuf,
}

impl AppPaths {
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let sys_files = base.join(SYS_FILES_SUBDIR);
        Self {
            config_file: sys_files.join(CONFIG_FILE),
            cache_dir: sys_files.join(CACHE_SUBDIR),
            history_db: sys_files.join(HISTORY_DB_FILE),
            log_file: sys_files.join(LOG_FILE),
            sys_files,
            base,
        }
    }

    /// Picks the base directory: explicit override, then `UTOOB_HOME`, then
    /// the platform data directory.
    pub fn resolve(override_base: Option<PathBuf>) -> Result<Self> {
        if let Some(base) = override_base {
            return Ok(Self::from_base(base));
        }
        if let Some(base) = env::var_os(BASE_DIR_ENV).filter(|value| !value.is_empty()) {
            return Ok(Self::from_base(PathBuf::from(base)));
        }
        let dirs = ProjectDirs::from("", "", "utoob")
            .ok_or_else(|| anyhow!("could not determine a home directory; set {BASE_DIR_ENV}"))?;
        Ok(Self::from_base(dirs.data_dir()))
    }

    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.sys_files)
            .with_context(|| format!("creating {}", self.sys_files.display()))?;
        fs::create_dir_all(&self.cache_dir)
            .with_context(|| format!("creating {}", self.cache_dir.display()))?;
        Ok(())
    }

    /// Relative download paths live under the base directory; absolute ones
    /// are used untouched.
    pub fn download_dir(&self, settings: &Settings) -> PathBuf {
        self.base.join(&settings.download_path)
    }
}

/// Contents of `config.json`. Unknown keys survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_download_path")]
    pub download_path: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_path: default_download_path(),
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<String> {
        if key == DOWNLOAD_PATH_KEY {
            return Some(self.download_path.clone());
        }
        self.extra.get(key).map(|value| match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if key == DOWNLOAD_PATH_KEY {
            self.download_path = value;
        } else {
            self.extra
                .insert(key.to_owned(), serde_json::Value::String(value));
        }
    }
}

fn default_download_path() -> String {
    DEFAULT_DOWNLOAD_PATH.to_string()
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Parsing {}", path.display()))
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(settings).context("serializing settings")?;
    fs::write(path, content).with_context(|| format!("Writing {}", path.display()))
}
