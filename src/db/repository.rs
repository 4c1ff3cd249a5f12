//! Repository trait and error types for site/scene storage.

use crate::api::{CatalogSummary, Site, SiteCatalog, SiteRecord};
use async_trait::async_trait;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
///
/// `SourceUnavailable` is the per-site failure the assembler isolates: it
/// marks one site's record as missing without affecting any other site.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("site not found: {0}")]
    SiteNotFound(String),
    #[error("scene source unavailable for site {site_id}: {reason}")]
    SourceUnavailable { site_id: String, reason: String },
    #[error("repository error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// True when the error refers to a missing entity rather than a backend
    /// fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::SiteNotFound(_))
    }
}

/// Abstract interface over site/scene storage.
///
/// Implementations must be safe to share across tasks; the engine only reads
/// through this trait during a coverage run.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a parsed catalog, replacing any site records with the same
    /// identifiers.
    async fn store_catalog(&self, catalog: SiteCatalog) -> RepositoryResult<CatalogSummary>;

    /// All known sites.
    async fn list_sites(&self) -> RepositoryResult<Vec<Site>>;

    /// One site's record with its full scene history.
    async fn fetch_site_record(&self, site_id: &str) -> RepositoryResult<SiteRecord>;
}
