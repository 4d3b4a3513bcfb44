use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// What to do when `quip-assets.json` exists but cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataPolicy {
    /// Fail store construction.
    #[default]
    Strict,
    /// Log a warning and start with an empty mapping.
    Lenient,
}

/// Global configuration loaded from `~/.config/quipnorm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Environment variable holding the session cookie.
    pub credential_env: String,
    /// Handling of a corrupt metadata file.
    #[serde(default)]
    pub metadata_policy: MetadataPolicy,
    /// Seconds allowed for establishing a connection to the asset host.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole asset transfer.
    pub timeout_secs: u64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            credential_env: "QUIP_COOKIE".to_string(),
            metadata_policy: MetadataPolicy::Strict,
            connect_timeout_secs: 30,
            timeout_secs: 300,
        }
    }
}

impl NormalizeConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("quipnorm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NormalizeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NormalizeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: NormalizeConfig = toml::from_str(&data)?;
    Ok(cfg)
}
