//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The coverage DTOs are re-exported from the api module since they already
//! derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    CatalogSummary, CoverageData, GapStatistics, IndexPoint, IndexSummary, Site, SiteFailure,
    SiteOutcome, SiteReport,
};

/// Request body for uploading a site catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCatalogRequest {
    /// Name for the catalog
    #[serde(default)]
    pub name: String,
    /// Catalog JSON data (site metadata, optionally with inline scenes)
    pub catalog_json: serde_json::Value,
    /// Optional separate scenes blob keyed by site identifier
    #[serde(default)]
    pub scenes_json: Option<serde_json::Value>,
}

/// Response for catalog upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCatalogResponse {
    pub name: String,
    pub checksum: String,
    pub site_count: usize,
    pub scene_count: usize,
}

/// Query parameters for coverage endpoints: per-request threshold overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoverageQuery {
    /// Override for the clear-cloud threshold
    #[serde(default)]
    pub clear_cloud_threshold: Option<f64>,
    /// Override for the gap-count threshold in days
    #[serde(default)]
    pub gap_threshold_days: Option<i64>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub repository: String,
}

/// Site list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteListResponse {
    /// List of catalog sites
    pub sites: Vec<Site>,
    /// Total count
    pub total: usize,
}
