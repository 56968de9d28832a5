//! Configuration loading.
//! Reads portfolio.toml from the current directory or the path in PORTFOLIO_CONFIG.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::rank::Weights;
use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "PORTFOLIO_CONFIG";
pub const CONFIG_FILE: &str = "portfolio.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Spreadsheet read after login and on reload.
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,
    /// username → password
    #[serde(default = "default_users")]
    pub users: BTreeMap<String, String>,
    /// Initial slider positions.
    #[serde(default)]
    pub weights: Weights,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("PortafolioFoco.xlsx")
}

fn default_users() -> BTreeMap<String, String> {
    [
        ("admin", "admin123"),
        ("comercial", "ventas2025"),
        ("gerencia", "luker2025"),
    ]
    .into_iter()
    .map(|(u, p)| (u.to_string(), p.to_string()))
    .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            users: default_users(),
            weights: Weights::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document. Weights are clamped to [0, 100].
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let w = config.weights;
        config.weights = Weights::new(w.kilos, w.sales, w.numeric_distribution, w.caf);
        Ok(config)
    }

    /// Load from `$PORTFOLIO_CONFIG`, else `./portfolio.toml`, else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load_from(&path)
    }

    /// A missing file yields the built-in defaults; a broken one is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text, path)?;
        log::info!(
            "Loaded config from {} ({} users)",
            path.display(),
            config.users.len()
        );
        Ok(config)
    }
}
