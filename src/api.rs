//! Public API surface for the coverage engine.
//!
//! This file consolidates the DTO types shared by the services, the repository
//! layer, and the HTTP API. All types derive Serialize/Deserialize for JSON
//! serialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fixed geographic monitoring location with descriptive metadata.
///
/// The engine treats a site as an opaque key plus its scene history; the
/// descriptive fields are owned by the external catalog and passed through
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Site {
    /// Catalog identifier (shown to user, unique within a catalog)
    pub site_id: String,
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: f64,
    /// Vegetation type label from the catalog
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vegetation_type: String,
    /// Free-form site description from the catalog
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Elevation in meters above sea level (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
    /// Country code or name from the catalog
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
}

impl Site {
    pub fn new(site_id: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err("Longitude must be between -180 and 180 degrees".to_string());
        }
        Ok(Self {
            site_id: site_id.into(),
            latitude,
            longitude,
            vegetation_type: String::new(),
            description: String::new(),
            elevation_m: None,
            country: String::new(),
        })
    }
}

/// One satellite acquisition event for a site.
///
/// Immutable once retrieved. The index value is present only when the imagery
/// backend computed a region-aggregated vegetation index for the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    /// Acquisition date (timestamp truncated to date resolution)
    pub date: NaiveDate,
    /// Cloud-cover fraction in [0, 1]
    pub cloud_cover: f64,
    /// Region-aggregated vegetation index value, if computed upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_value: Option<f64>,
}

impl Scene {
    pub fn new(date: NaiveDate, cloud_cover: f64) -> Self {
        Self {
            date,
            cloud_cover,
            index_value: None,
        }
    }

    pub fn with_index(date: NaiveDate, cloud_cover: f64, index_value: f64) -> Self {
        Self {
            date,
            cloud_cover,
            index_value: Some(index_value),
        }
    }

    /// A scene is clear when its cloud-cover fraction is below the threshold.
    pub fn is_clear(&self, clear_cloud_threshold: f64) -> bool {
        self.cloud_cover < clear_cloud_threshold
    }
}

/// Temporal sparsity statistics for one scene subset.
///
/// One instance is produced per (site, subset-policy) pair and never mutated
/// after computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GapStatistics {
    /// Number of scenes in the subset
    pub scene_count: usize,
    /// Largest gap in whole days between temporally adjacent scenes (0 for < 2 scenes)
    pub max_gap_days: i64,
    /// Number of gaps strictly longer than the configured threshold
    pub gap_count: usize,
    /// Severity-weighted gap score (mean squared gap length; 0 for < 2 scenes)
    pub weighted_gap_score: f64,
    /// Earliest acquisition date in the subset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_date: Option<NaiveDate>,
    /// Latest acquisition date in the subset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<NaiveDate>,
}

impl GapStatistics {
    /// Statistics for a subset with no scenes.
    pub fn empty() -> Self {
        Self {
            scene_count: 0,
            max_gap_days: 0,
            gap_count: 0,
            weighted_gap_score: 0.0,
            first_date: None,
            last_date: None,
        }
    }
}

/// One point of a vegetation index time series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexPoint {
    pub date: NaiveDate,
    pub value: f64,
    /// Upper-envelope outlier flag; informational only, never excludes the
    /// point from summary statistics
    #[serde(default)]
    pub outlier: bool,
}

/// Vegetation index time series with summary statistics.
///
/// An empty series is a valid state: the summary fields are `null` in JSON so
/// downstream consumers can distinguish "no data" from an index value of zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexSummary {
    /// Number of observations contributing to the summary
    pub observations: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// max − min
    pub range: Option<f64>,
    /// (date, value) pairs sorted ascending by date, values unmodified
    pub series: Vec<IndexPoint>,
}

impl IndexSummary {
    /// Summary for a site with no usable index observations.
    pub fn empty() -> Self {
        Self {
            observations: 0,
            mean: None,
            min: None,
            max: None,
            range: None,
            series: Vec::new(),
        }
    }
}

/// Per-site output record: site metadata plus both gap-statistics policies and
/// the vegetation index summary.
///
/// Created once per site per run and immutable after assembly. The
/// `clear_`-prefixed fields carry the cloud-filtered subset policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteReport {
    #[serde(flatten)]
    pub site: Site,
    /// Total scenes supplied by the source (after malformed-record filtering)
    pub scene_count: usize,
    /// Scenes below the clear-cloud threshold
    pub clear_scene_count: usize,
    /// Records dropped during parsing for this site
    #[serde(default)]
    pub malformed_scene_count: usize,
    /// Mean cloud-cover fraction over all scenes (`null` when no scenes)
    pub cloud_cover_mean: Option<f64>,
    /// Sample standard deviation of cloud cover (`null` when no scenes)
    pub cloud_cover_std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<NaiveDate>,
    // All-scene gap statistics
    pub max_gap_days: i64,
    pub gap_count: usize,
    pub weighted_gap_score: f64,
    // Clear-scene gap statistics
    pub clear_max_gap_days: i64,
    pub clear_gap_count: usize,
    pub clear_weighted_gap_score: f64,
    /// Vegetation index summary; absent when the site is not selected for
    /// index computation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexSummary>,
}

/// Per-site error marker recorded when the scene source failed for one site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteFailure {
    #[serde(flatten)]
    pub site: Site,
    pub error: String,
}

/// Outcome of one site's computation: a full report or an explicit error
/// marker. The final output carries exactly one outcome per requested site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SiteOutcome {
    Report(SiteReport),
    Failed(SiteFailure),
}

impl SiteOutcome {
    pub fn site_id(&self) -> &str {
        match self {
            SiteOutcome::Report(report) => &report.site.site_id,
            SiteOutcome::Failed(failure) => &failure.site.site_id,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SiteOutcome::Failed(_))
    }

    pub fn as_report(&self) -> Option<&SiteReport> {
        match self {
            SiteOutcome::Report(report) => Some(report),
            SiteOutcome::Failed(_) => None,
        }
    }
}

/// Complete coverage run output: one outcome per requested site, ordered by
/// site identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageData {
    pub site_count: usize,
    pub failed_count: usize,
    pub sites: Vec<SiteOutcome>,
}

/// One catalog entry: a site plus its scene history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteRecord {
    #[serde(flatten)]
    pub site: Site,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// Raw records dropped during parsing (missing date/cloud cover)
    #[serde(default)]
    pub malformed_scene_count: usize,
}

/// Parsed site catalog with validated scene records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteCatalog {
    #[serde(default)]
    pub name: String,
    /// SHA256 checksum of the raw catalog JSON
    #[serde(default)]
    pub checksum: String,
    pub sites: Vec<SiteRecord>,
}

/// Summary returned after storing a catalog in a repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSummary {
    pub name: String,
    pub checksum: String,
    pub site_count: usize,
    pub scene_count: usize,
}
