use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default bytes per range request.
pub const DEFAULT_CHUNK_SIZE: u64 = 1_000_000;

/// Global configuration loaded from `~/.config/rmd5/config.toml`.
/// CLI flags override these values per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmdConfig {
    /// Bytes per range request (the last range absorbs any remainder).
    pub chunk_size: u64,
    /// Cap on concurrent range fetches; absent = one worker per range.
    #[serde(default)]
    pub max_concurrent_fetches: Option<usize>,
}

impl Default for RmdConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent_fetches: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rmd5")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RmdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RmdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_from(path: &Path) -> Result<RmdConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: RmdConfig = toml::from_str(&data)?;
    Ok(cfg)
}
