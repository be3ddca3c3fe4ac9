//! Datasource configuration.

use std::env;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Observer location the datasource is configured with.
///
/// Query targets may override either coordinate per request; both the
/// stored values and the overrides are validated with the same bounds
/// (latitude in `[-90, 90]`, longitude in `[-360, 360]`) at query time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasourceConfig {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Default for DatasourceConfig {
    /// Greenwich observatory.
    fn default() -> Self {
        Self {
            latitude: 51.4769,
            longitude: 0.0,
        }
    }
}

impl DatasourceConfig {
    /// Create a configuration from explicit coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `SUNMOON_LATITUDE` (required): observer latitude in degrees
    /// - `SUNMOON_LONGITUDE` (required): observer longitude in degrees
    ///
    /// # Errors
    /// Returns an error if either variable is missing or not numeric.
    pub fn from_env() -> Result<Self, String> {
        let latitude = env::var("SUNMOON_LATITUDE")
            .map_err(|_| "SUNMOON_LATITUDE environment variable not set".to_string())?
            .parse()
            .map_err(|_| "SUNMOON_LATITUDE must be a number".to_string())?;
        let longitude = env::var("SUNMOON_LONGITUDE")
            .map_err(|_| "SUNMOON_LONGITUDE environment variable not set".to_string())?
            .parse()
            .map_err(|_| "SUNMOON_LONGITUDE must be a number".to_string())?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Load configuration for the server binary.
    ///
    /// Resolution order: TOML file named by `SUNMOON_CONFIG`, then the
    /// `SUNMOON_LATITUDE`/`SUNMOON_LONGITUDE` env pair, then the Greenwich
    /// default. A named config file that fails to load is an error rather
    /// than a silent fallback.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = env::var("SUNMOON_CONFIG") {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path))?;
            let config = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path))?;
            return Ok(config);
        }
        match Self::from_env() {
            Ok(config) => Ok(config),
            Err(_) => {
                log::debug!("no location configured, using Greenwich default");
                Ok(Self::default())
            }
        }
    }
}
