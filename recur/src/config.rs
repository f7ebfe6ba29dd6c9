//! Configuration for the recur binary

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::AnchorMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Anchor mode used when `--anchor` is not given
    #[serde(default)]
    pub default_anchor: AnchorMode,

    /// Number of occurrences `preview` prints by default
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Print JSON instead of text
    #[serde(default)]
    pub json: bool,
}

fn default_preview_limit() -> usize {
    crate::DEFAULT_PREVIEW_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_anchor: AnchorMode::default(),
            preview_limit: default_preview_limit(),
            json: false,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from(config_path);
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("recur").join("config.yml")),
            Some(PathBuf::from("recur.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        Ok(Config::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
