//! In-memory repository implementation.
//!
//! Backs unit tests and local development runs. Site records live in a map
//! keyed by site identifier; storing a catalog replaces records with matching
//! identifiers and keeps the rest.

use crate::api::{CatalogSummary, Site, SiteCatalog, SiteRecord};
use crate::db::repository::{RepositoryError, RepositoryResult, SiteRepository};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory site/scene store.
#[derive(Default)]
pub struct LocalRepository {
    records: RwLock<HashMap<String, SiteRecord>>,
    /// Sites whose scene source should report an outage, with the outage
    /// reason (test hook for per-site failure isolation)
    unavailable: RwLock<HashMap<String, String>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one site record directly.
    pub fn insert_record(&self, record: SiteRecord) {
        self.records
            .write()
            .insert(record.site.site_id.clone(), record);
    }

    /// Make `fetch_site_record` fail for this site with `SourceUnavailable`,
    /// simulating a scene-source outage.
    pub fn set_unavailable(&self, site_id: impl Into<String>, reason: impl Into<String>) {
        self.unavailable
            .write()
            .insert(site_id.into(), reason.into());
    }
}

#[async_trait]
impl SiteRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn store_catalog(&self, catalog: SiteCatalog) -> RepositoryResult<CatalogSummary> {
        let scene_count = catalog.sites.iter().map(|record| record.scenes.len()).sum();
        let site_count = catalog.sites.len();

        let mut records = self.records.write();
        for record in catalog.sites {
            records.insert(record.site.site_id.clone(), record);
        }

        Ok(CatalogSummary {
            name: catalog.name,
            checksum: catalog.checksum,
            site_count,
            scene_count,
        })
    }

    async fn list_sites(&self) -> RepositoryResult<Vec<Site>> {
        let mut sites: Vec<Site> = self
            .records
            .read()
            .values()
            .map(|record| record.site.clone())
            .collect();
        sites.sort_by(|a, b| a.site_id.cmp(&b.site_id));
        Ok(sites)
    }

    async fn fetch_site_record(&self, site_id: &str) -> RepositoryResult<SiteRecord> {
        if let Some(reason) = self.unavailable.read().get(site_id) {
            return Err(RepositoryError::SourceUnavailable {
                site_id: site_id.to_string(),
                reason: reason.clone(),
            });
        }
        self.records
            .read()
            .get(site_id)
            .cloned()
            .ok_or_else(|| RepositoryError::SiteNotFound(site_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Scene;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(site_id: &str) -> SiteRecord {
        SiteRecord {
            site: Site::new(site_id, 45.0, 7.0).unwrap(),
            scenes: vec![Scene::new(date(2023, 6, 1), 0.1)],
            malformed_scene_count: 0,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_store_and_list() {
        let repo = LocalRepository::new();
        let catalog = SiteCatalog {
            name: "test".to_string(),
            checksum: "abc".to_string(),
            sites: vec![record("b_site"), record("a_site")],
        };

        let summary = repo.store_catalog(catalog).await.unwrap();
        assert_eq!(summary.site_count, 2);
        assert_eq!(summary.scene_count, 2);

        let sites = repo.list_sites().await.unwrap();
        assert_eq!(sites.len(), 2);
        // Sorted by identifier
        assert_eq!(sites[0].site_id, "a_site");
        assert_eq!(sites[1].site_id, "b_site");
    }

    #[tokio::test]
    async fn test_store_replaces_matching_records() {
        let repo = LocalRepository::new();
        repo.insert_record(record("harvard"));

        let mut updated = record("harvard");
        updated.scenes.push(Scene::new(date(2023, 6, 6), 0.2));
        let catalog = SiteCatalog {
            name: String::new(),
            checksum: String::new(),
            sites: vec![updated],
        };
        repo.store_catalog(catalog).await.unwrap();

        let fetched = repo.fetch_site_record("harvard").await.unwrap();
        assert_eq!(fetched.scenes.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_unknown_site() {
        let repo = LocalRepository::new();
        let err = repo.fetch_site_record("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unavailable_site_reports_source_error() {
        let repo = LocalRepository::new();
        repo.insert_record(record("harvard"));
        repo.set_unavailable("harvard", "upstream timeout");

        let err = repo.fetch_site_record("harvard").await.unwrap_err();
        match err {
            RepositoryError::SourceUnavailable { site_id, reason } => {
                assert_eq!(site_id, "harvard");
                assert_eq!(reason, "upstream timeout");
            }
            other => panic!("Expected SourceUnavailable, got {:?}", other),
        }
    }
}
