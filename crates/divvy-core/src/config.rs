//! Split configuration (tolerances and display threshold)
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. Explicit path (e.g. `divvy --config split.toml`)
//! 2. Override in data dir (~/.local/share/divvy/config/split.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Keys missing from an override file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/split.toml");

/// Tolerances used by the validator plus the presentation threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    /// Allowed distance of a per-item share sum from 1.0
    pub share_tolerance: f64,
    /// Allowed difference between stated and computed item totals
    pub total_tolerance: f64,
    /// Per-item amounts below this are hidden by presentation layers
    pub display_threshold: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            share_tolerance: 0.01,
            total_tolerance: 1e-6,
            display_threshold: 0.01,
        }
    }
}

impl SplitConfig {
    /// Load config, trying `path`, then the data dir override, then defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_toml(&read_config(path)?);
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                tracing::debug!(path = %default_path.display(), "Using config override");
                return Self::from_toml(&read_config(&default_path)?);
            }
        }

        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Parse config from TOML content, layering it over the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(validation) = raw.validation {
            if let Some(tolerance) = validation.share_tolerance {
                config.share_tolerance = tolerance;
            }
            if let Some(tolerance) = validation.total_tolerance {
                config.total_tolerance = tolerance;
            }
        }

        if let Some(display) = raw.display {
            if let Some(threshold) = display.amount_threshold {
                config.display_threshold = threshold;
            }
        }

        config.check()?;
        Ok(config)
    }

    /// Lower bound of the accepted share-sum band
    pub fn min_share_sum(&self) -> f64 {
        1.0 - self.share_tolerance
    }

    /// Upper bound of the accepted share-sum band
    pub fn max_share_sum(&self) -> f64 {
        1.0 + self.share_tolerance
    }

    fn check(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.share_tolerance) {
            return Err(Error::InvalidData(format!(
                "share_tolerance must be in [0, 1), got {}",
                self.share_tolerance
            )));
        }
        if self.total_tolerance < 0.0 || self.display_threshold < 0.0 {
            return Err(Error::InvalidData(
                "total_tolerance and amount_threshold must not be negative".into(),
            ));
        }
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::InvalidData(format!(
            "Failed to read config {}: {}",
            path.display(),
            e
        ))
    })
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("divvy").join("config").join("split.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    validation: Option<RawValidation>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawValidation {
    share_tolerance: Option<f64>,
    total_tolerance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    amount_threshold: Option<f64>,
}
