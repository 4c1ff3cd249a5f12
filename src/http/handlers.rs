//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the actual computation.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    CoverageQuery, HealthResponse, SiteListResponse, UploadCatalogRequest, UploadCatalogResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{CoverageData, SiteReport};
use crate::config::EngineConfig;
use crate::models::catalog::parse_catalog_json_str;
use crate::services::coverage;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Engine configuration for one request: the state's config with any query
/// overrides applied.
fn request_config(base: &EngineConfig, query: &CoverageQuery) -> Result<EngineConfig, AppError> {
    let mut config = base.clone();
    if let Some(threshold) = query.clear_cloud_threshold {
        config.clear_cloud_threshold = threshold;
    }
    if let Some(days) = query.gap_threshold_days {
        config.gap_threshold_days = days;
    }
    config
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(config)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Catalog CRUD
// =============================================================================

/// GET /v1/sites
///
/// List all sites in the catalog.
pub async fn list_sites(State(state): State<AppState>) -> HandlerResult<SiteListResponse> {
    let sites = state.repository.list_sites().await?;
    let total = sites.len();

    Ok(Json(SiteListResponse { sites, total }))
}

/// POST /v1/sites
///
/// Upload a site catalog, replacing records for matching site identifiers.
pub async fn upload_catalog(
    State(state): State<AppState>,
    Json(request): Json<UploadCatalogRequest>,
) -> Result<(axum::http::StatusCode, Json<UploadCatalogResponse>), AppError> {
    // Convert JSON values to strings for the parsing layer
    let catalog_json = serde_json::to_string(&request.catalog_json)
        .map_err(|e| AppError::BadRequest(format!("Invalid catalog JSON: {}", e)))?;
    let scenes_json = request
        .scenes_json
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("Invalid scenes JSON: {}", e)))?;

    let mut catalog = parse_catalog_json_str(&catalog_json, scenes_json.as_deref())
        .map_err(|e| AppError::BadRequest(format!("Failed to parse catalog: {}", e)))?;
    if catalog.name.is_empty() {
        catalog.name = request.name;
    }

    let summary = state.repository.store_catalog(catalog).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(UploadCatalogResponse {
            name: summary.name,
            checksum: summary.checksum,
            site_count: summary.site_count,
            scene_count: summary.scene_count,
        }),
    ))
}

// =============================================================================
// Coverage Endpoints
// =============================================================================

/// GET /v1/sites/{site_id}/coverage
///
/// Get the coverage report for one site.
pub async fn get_site_coverage(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
    Query(query): Query<CoverageQuery>,
) -> HandlerResult<SiteReport> {
    let config = request_config(&state.config, &query)?;
    let record = state.repository.fetch_site_record(&site_id).await?;

    Ok(Json(coverage::evaluate_site(&record, &config)))
}

/// GET /v1/coverage
///
/// Run the coverage evaluation over every site in the catalog.
pub async fn get_coverage(
    State(state): State<AppState>,
    Query(query): Query<CoverageQuery>,
) -> HandlerResult<CoverageData> {
    let config = request_config(&state.config, &query)?;
    let data = coverage::evaluate_sites(state.repository.as_ref(), &config).await?;

    Ok(Json(data))
}
