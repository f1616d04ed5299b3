use crate::error::{BikeshareError, Result};
use crate::explorer::raw::DEFAULT_PAGE_SIZE;
use crate::explorer::{ReportOptions, SessionOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Directory holding `chicago.csv`, `new_york_city.csv` and `washington.csv`
    pub data_dir: String,
    /// Rows per page in the raw data pager
    pub raw_page_size: u32,
    /// Whether each report ends with the time it took
    pub show_timing: bool,
    /// Whether to offer the raw data pager after loading
    pub show_raw_data: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_dir: ".".to_owned(),
            raw_page_size: DEFAULT_PAGE_SIZE as u32,
            show_timing: true,
            show_raw_data: false,
        }
    }
}

impl AppSettings {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            data_dir: PathBuf::from(&self.data_dir),
            report: ReportOptions {
                show_timing: self.show_timing,
            },
            raw_page_size: self
                .show_raw_data
                .then(|| (self.raw_page_size.max(1)) as usize),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bikeshare")
        .join("config.json")
}

/// Reads settings from `path`, falling back to defaults when the file is
/// missing or cannot be parsed.
pub fn load_app_config_from(path: &Path) -> AppSettings {
    if !path.exists() {
        tracing::debug!("No settings at {}, using defaults", path.display());
        return AppSettings::default();
    }

    match std::fs::read_to_string(path)
        .map_err(BikeshareError::from)
        .and_then(|content| serde_json::from_str::<AppSettings>(&content).map_err(Into::into))
    {
        Ok(settings) => {
            tracing::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            tracing::warn!("Ignoring settings at {}: {e}", path.display());
            AppSettings::default()
        }
    }
}

pub fn load_app_config() -> AppSettings {
    load_app_config_from(&get_config_path())
}

pub fn save_app_config_to(settings: &AppSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn save_app_config(settings: &AppSettings) -> Result<()> {
    save_app_config_to(settings, &get_config_path())
}
