use serde::{Deserialize, Serialize};
use slidebar_runtime::EngineConfig;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "slidebar.config.json";

/// Slidebar project configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing campaign `.json` files
    #[serde(default = "default_campaigns_dir")]
    pub campaigns_dir: String,

    /// Where `compile` writes its output
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Viewport width used by `preview`
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,

    /// Engine settings shared by `compile` and `preview`
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_campaigns_dir() -> String {
    "campaigns".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_viewport_width() -> f64 {
    1280.0
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn campaigns_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.campaigns_dir)
    }

    pub fn out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            campaigns_dir: default_campaigns_dir(),
            out_dir: default_out_dir(),
            viewport_width: default_viewport_width(),
            engine: EngineConfig::default(),
        }
    }
}
