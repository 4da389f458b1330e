use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::theme::ThemeConfig;

pub const APP_DIR: &str = "task-calendar";
const TASKS_FILE: &str = "tasks.txt";
const LOG_FILE: &str = "task-calendar.log";
const CONFIG_FILE: &str = "config.toml";

/// Settings from `<config dir>/task-calendar/config.toml`.
///
/// ```toml
/// tasks_file = "/home/me/notes/tasks.txt"
///
/// [theme]
/// preset = "nord"
/// selected_bg = "#88c0d0"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tasks_file: Option<PathBuf>,
    pub theme: ThemeConfig,
}

impl Config {
    /// Read the config file. Missing or unparseable files give the defaults.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Where tasks are persisted: the configured path, else the data dir.
    pub fn tasks_path(&self) -> PathBuf {
        self.tasks_file
            .clone()
            .unwrap_or_else(|| data_dir().join(TASKS_FILE))
    }
}

pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE)
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}
