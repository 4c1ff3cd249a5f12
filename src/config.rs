//! Engine configuration.
//!
//! All thresholds live in an explicit [`EngineConfig`] value object that is
//! passed into each computation call. There is no ambient configuration state,
//! so computations stay pure and independently testable.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration value object for the coverage engine.
///
/// Deserializable from TOML; every field has a default so a partial file only
/// overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Cloud-cover fraction below which a scene counts as clear
    pub clear_cloud_threshold: f64,
    /// Gap length in days strictly above which a gap is counted as a data void
    pub gap_threshold_days: i64,
    /// Optional site-identifier allowlist for vegetation index computation.
    /// `None` computes the index for every site; an explicit list restricts it
    /// (gap statistics are always computed for the full catalog).
    pub index_sites: Option<Vec<String>>,
    /// Rolling window in days for the index outlier envelope
    pub envelope_window_days: i64,
    /// Window percentile used as the upper envelope
    pub envelope_percentile: f64,
    /// Distance below the envelope that flags an index point as an outlier
    pub envelope_threshold_below: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clear_cloud_threshold: 0.30,
            gap_threshold_days: 10,
            index_sites: None,
            envelope_window_days: 30,
            envelope_percentile: 80.0,
            envelope_threshold_below: 0.15,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a TOML string and validate it.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("Invalid engine configuration TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Check threshold ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.clear_cloud_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.clear_cloud_threshold)
        {
            bail!(
                "clear_cloud_threshold must be a fraction in [0, 1], got {}",
                self.clear_cloud_threshold
            );
        }
        if self.gap_threshold_days < 0 {
            bail!(
                "gap_threshold_days must be non-negative, got {}",
                self.gap_threshold_days
            );
        }
        if self.envelope_window_days < 0 {
            bail!(
                "envelope_window_days must be non-negative, got {}",
                self.envelope_window_days
            );
        }
        if !self.envelope_percentile.is_finite()
            || self.envelope_percentile <= 0.0
            || self.envelope_percentile > 100.0
        {
            bail!(
                "envelope_percentile must be in (0, 100], got {}",
                self.envelope_percentile
            );
        }
        if !self.envelope_threshold_below.is_finite() || self.envelope_threshold_below < 0.0 {
            bail!(
                "envelope_threshold_below must be non-negative, got {}",
                self.envelope_threshold_below
            );
        }
        Ok(())
    }

    /// Whether the vegetation index should be computed for this site.
    pub fn computes_index_for(&self, site_id: &str) -> bool {
        match &self.index_sites {
            None => true,
            Some(sites) => sites.iter().any(|s| s == site_id),
        }
    }
}
