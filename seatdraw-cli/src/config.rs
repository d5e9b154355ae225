use anyhow::Context;
use clap::ValueEnum;
use seatdraw_core::EventConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file in the data directory
    File,
    /// SQLite database in the data directory
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub backend: BackendKind,
    pub event: EventConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: BackendKind::File,
            event: EventConfig::default(),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("seatdraw")
}

impl CliConfig {
    /// Defaults, overlaid by `<data_dir>/config.json` when present.
    pub fn load(data_dir: &Path) -> anyhow::Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<CliConfig>(&content)
                .with_context(|| format!("invalid config file {}", path.display()))?
        } else {
            CliConfig::default()
        };

        // The directory the config was found in wins over whatever it says.
        config.data_dir = data_dir.to_path_buf();
        Ok(config)
    }
}
