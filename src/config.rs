//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/heritage/heritage.toml`
//! 3. Local config: `<dir>/.heritage.toml`
//! 4. Environment variables: `HERITAGE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::application::services::DistributionService;

/// Prices used to value properties and land.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PriceConfig {
    /// Price of one property
    pub property: i64,
    /// Price of one m² of land
    pub land_extension_m2: i64,
}

/// Raw price config for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPriceConfig {
    pub property: Option<i64>,
    pub land_extension_m2: Option<i64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_depth: Option<usize>,
    pub prices: RawPriceConfig,
}

impl PriceConfig {
    /// Overlay wins for every price it specifies.
    pub fn merge(&self, overlay: &RawPriceConfig) -> Self {
        Self {
            property: overlay.property.unwrap_or(self.property),
            land_extension_m2: overlay.land_extension_m2.unwrap_or(self.land_extension_m2),
        }
    }
}

/// Unified configuration for the heritage engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Generations a search may descend before failing
    pub max_depth: usize,
    /// Valuation prices
    pub prices: PriceConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DistributionService::DEFAULT_MAX_DEPTH,
            prices: PriceConfig::default(),
        }
    }
}

/// Get the XDG config directory for heritage.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "heritage").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("heritage.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".heritage.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay values win where specified, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            prices: self.prices.merge(&overlay.prices),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.heritage.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/heritage/heritage.toml`
    /// 3. Local config: `<local_dir>/.heritage.toml`
    /// 4. Environment variables: `HERITAGE_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        let local = local_dir.map(local_config_path).filter(|p| p.exists());
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load settings from explicit config files (each optional).
    ///
    /// Same layering as [`Settings::load`], without looking up default locations.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        for path in [global, local].into_iter().flatten() {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply HERITAGE_* environment variables as explicit overrides.
    ///
    /// `HERITAGE_MAX_DEPTH`, `HERITAGE_PRICES__PROPERTY`,
    /// `HERITAGE_PRICES__LAND_EXTENSION_M2`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("HERITAGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Some(val) = optional(config.get_int("max_depth"))? {
            settings.max_depth = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("max_depth must not be negative: {val}"),
            })?;
        }
        if let Some(val) = optional(config.get_int("prices.property"))? {
            settings.prices.property = val;
        }
        if let Some(val) = optional(config.get_int("prices.land_extension_m2"))? {
            settings.prices.land_extension_m2 = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# heritage configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/heritage/heritage.toml
#   Local:  <dir>/.heritage.toml
#   Env:    HERITAGE_* environment variables
#           (HERITAGE_MAX_DEPTH, HERITAGE_PRICES__PROPERTY, HERITAGE_PRICES__LAND_EXTENSION_M2)

# Generations searched before giving up
# max_depth = 128

[prices]
# Price of one property
# property = 1000000

# Price of one m² of land
# land_extension_m2 = 300
"#
        .to_string()
    }
}

/// Missing keys are fine, malformed values are not.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
