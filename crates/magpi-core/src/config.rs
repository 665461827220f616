use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/magpi/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagpiConfig {
    /// Publisher site root; landing and listing URLs are built from it.
    pub base_url: String,
    /// Href prefix that marks the PDF link on an issue's landing page.
    pub download_prefix: String,
    /// Case-insensitive text in the listing-page heading that announces the newest issue.
    pub latest_heading_marker: String,
    /// Saved files are named `{file_prefix}{issue}.pdf`.
    pub file_prefix: String,
    /// Default destination when `--dest` is not given (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// TCP/TLS connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("magpi-dl/{} (+rust; {})", env!("CARGO_PKG_VERSION"), std::env::consts::OS)
}

impl Default for MagpiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://magpi.raspberrypi.com".to_string(),
            download_prefix: "/downloads".to_string(),
            latest_heading_marker: "out now".to_string(),
            file_prefix: "MagPi".to_string(),
            download_dir: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("magpi")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MagpiConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<MagpiConfig> {
    if !path.exists() {
        let default_cfg = MagpiConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MagpiConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
