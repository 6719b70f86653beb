//! # Site Configuration
//!
//! Runtime settings read from a YAML file, typically `site_config.yaml` next
//! to the data directory:
//!
//! ```yaml
//! data_directory: "data"
//! submit_delay_ms: 2000
//! upcoming_window_days: 30
//! birthday_window_days: 30
//! log_level: "info"
//! ```
//!
//! Missing keys take their default value, and a missing file yields the
//! default configuration.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding one JSON document per store
    pub data_directory: PathBuf,
    /// Simulated network delay of a contact form submission
    pub submit_delay_ms: u64,
    /// Days ahead shown in the upcoming events list
    pub upcoming_window_days: u32,
    /// Days ahead shown in the upcoming birthdays list
    pub birthday_window_days: u32,
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            submit_delay_ms: 2000,
            upcoming_window_days: 30,
            birthday_window_days: 30,
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Configuration storing its data under `data_directory`
    pub fn with_data_directory(data_directory: impl Into<PathBuf>) -> Self {
        Self {
            data_directory: data_directory.into(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read site config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid site config {:?}", path))?;
        debug!("Loaded site config from {:?}", path);
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No site config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Write the configuration atomically (temp file, then rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let yaml_content = serde_yaml::to_string(self)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, path)?;

        debug!("Saved site config to {:?}", path);
        Ok(())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}
