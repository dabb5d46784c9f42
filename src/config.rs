use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File looked up in the working directory at start-up.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Dashboard settings
// ---------------------------------------------------------------------------

/// Settings of the dashboard. Every field has a default, so a partial
/// `dashboard.json` only overrides what it names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Catalog loaded at start-up.
    pub dataset_path: PathBuf,
    /// Rows shown in the filtered table preview.
    pub preview_rows: usize,
    /// Entries kept by the top-countries and top-genres charts.
    pub top_n: usize,
    /// Initial window size in points.
    pub window_size: [f32; 2],
    pub word_cloud: WordCloudConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("netflix_titles.csv"),
            preview_rows: 5,
            top_n: 10,
            window_size: [1280.0, 900.0],
            word_cloud: WordCloudConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    pub width: f32,
    pub height: f32,
    pub max_words: usize,
    pub max_font_size: f32,
    pub min_font_size: f32,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            max_words: 200,
            max_font_size: 64.0,
            min_font_size: 10.0,
        }
    }
}

impl DashboardConfig {
    /// Read settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings from `dashboard.json` when present, defaults otherwise.
    /// A broken file is reported and ignored.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Using settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring {CONFIG_FILE}: {e}");
                Self::default()
            }
        }
    }
}
