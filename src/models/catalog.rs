// ============================================================================
// Catalog JSON Parsing
// ============================================================================
//
// These functions provide string-based parsing of site catalogs with support
// for merging a separate scenes blob (scenes keyed by site identifier) when
// the data is split across multiple files.

use crate::api::{Scene, Site, SiteCatalog, SiteRecord};
use crate::models::date::parse_scene_date;
use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::warn;

#[derive(serde::Deserialize)]
struct CatalogInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub checksum: String,
    #[serde(default)]
    pub sites: Vec<SiteInput>,
}

#[derive(serde::Deserialize)]
struct SiteInput {
    pub site_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub vegetation_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub elevation_m: Option<f64>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub scenes: Vec<RawSceneRecord>,
}

/// Scene record as supplied by an external source, before validation.
///
/// Every attribute is optional at this stage; validation decides which
/// records survive.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawSceneRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    #[serde(default)]
    pub index_value: Option<f64>,
}

fn validate_input_catalog(catalog_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(catalog_json).context("Invalid catalog JSON")?;
    let has_sites = value.as_object().and_then(|obj| obj.get("sites")).is_some();
    if !has_sites {
        anyhow::bail!("Missing required 'sites' field");
    }
    Ok(())
}

/// Parse a site catalog from a JSON string with optional merging of a
/// separate scenes blob.
///
/// The catalog JSON carries the site metadata and, optionally, inline scene
/// records per site. When scene collections are delivered separately,
/// `scenes_json` accepts either a wrapper `{"sites": { "<site_id>": [ ... ] }}`
/// or a direct map `{ "<site_id>": [ ... ] }`; matching sites have their scene
/// collections replaced by the blob's.
///
/// Malformed scene records (missing or unparseable date, missing or
/// out-of-range cloud cover) are dropped with a warning and counted per site;
/// they never abort the site's record.
///
/// # Arguments
///
/// * `catalog_json` - Main catalog JSON (snake_case format matching schema)
/// * `scenes_json` - Optional JSON with scene records per site ID
///
/// # Returns
///
/// A fully populated `SiteCatalog` with validated scenes and computed checksum.
pub fn parse_catalog_json_str(
    catalog_json: &str,
    scenes_json: Option<&str>,
) -> Result<SiteCatalog> {
    validate_input_catalog(catalog_json)?;

    let input: CatalogInput = serde_json::from_str(catalog_json)
        .context("Failed to deserialize catalog JSON using Serde")?;

    let mut catalog = SiteCatalog {
        name: input.name,
        checksum: input.checksum,
        sites: input
            .sites
            .into_iter()
            .map(|site_input| {
                let site = Site {
                    site_id: site_input.site_id,
                    latitude: site_input.latitude,
                    longitude: site_input.longitude,
                    vegetation_type: site_input.vegetation_type,
                    description: site_input.description,
                    elevation_m: site_input.elevation_m,
                    country: site_input.country,
                };
                let (scenes, malformed_scene_count) =
                    validate_scene_records(&site.site_id, site_input.scenes);
                SiteRecord {
                    site,
                    scenes,
                    malformed_scene_count,
                }
            })
            .collect(),
    };

    // Compute checksum if not provided
    if catalog.checksum.is_empty() {
        catalog.checksum = compute_catalog_checksum(catalog_json);
    }

    // If scene collections are supplied separately, merge them into the
    // matching site records. Accept either a wrapper `{"sites": { ... }}` or
    // a direct map.
    if let Some(blob) = scenes_json {
        let trimmed = blob.trim();
        if !trimmed.is_empty() {
            #[derive(serde::Deserialize)]
            struct SitesWrapper {
                sites: HashMap<String, Vec<RawSceneRecord>>,
            }

            // Try wrapper form first, then try direct map form.
            let maybe_map: Option<HashMap<String, Vec<RawSceneRecord>>> =
                match serde_json::from_str::<SitesWrapper>(trimmed) {
                    Ok(wrapper) => Some(wrapper.sites),
                    Err(_) => {
                        serde_json::from_str::<HashMap<String, Vec<RawSceneRecord>>>(trimmed).ok()
                    }
                };

            if let Some(mut map) = maybe_map {
                for record in &mut catalog.sites {
                    if let Some(raw_scenes) = map.remove(&record.site.site_id) {
                        let (scenes, malformed) =
                            validate_scene_records(&record.site.site_id, raw_scenes);
                        record.scenes = scenes;
                        record.malformed_scene_count = malformed;
                    }
                }
            }
        }
    }

    Ok(catalog)
}

/// Validate raw scene records for one site, dropping malformed entries.
///
/// Returns the surviving scenes and the number of records dropped.
pub fn validate_scene_records(
    site_id: &str,
    raw_scenes: Vec<RawSceneRecord>,
) -> (Vec<Scene>, usize) {
    let total = raw_scenes.len();
    let mut scenes = Vec::with_capacity(total);

    for raw in raw_scenes {
        let date = match raw.date.as_deref().and_then(parse_scene_date) {
            Some(date) => date,
            None => {
                warn!(site_id, raw_date = ?raw.date, "Dropping scene record without a usable date");
                continue;
            }
        };
        let cloud_cover = match raw.cloud_cover {
            Some(value) if (0.0..=1.0).contains(&value) => value,
            other => {
                warn!(site_id, cloud_cover = ?other, "Dropping scene record without a cloud-cover fraction in [0, 1]");
                continue;
            }
        };
        scenes.push(Scene {
            date,
            cloud_cover,
            index_value: raw.index_value,
        });
    }

    let malformed = total - scenes.len();
    (scenes, malformed)
}

/// Compute a checksum for the catalog JSON
fn compute_catalog_checksum(json_str: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(json_str.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_CATALOG: &str = r#"{
        "name": "european_sites",
        "sites": [
            {
                "site_id": "harvard",
                "latitude": 42.5378,
                "longitude": -72.1715,
                "vegetation_type": "DB",
                "scenes": [
                    { "date": "2023-06-01", "cloud_cover": 0.12, "index_value": 0.61 },
                    { "date": "2023-06-06T10:30:00Z", "cloud_cover": 0.45 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_minimal_catalog() {
        let result = parse_catalog_json_str(MINIMAL_CATALOG, None);
        assert!(result.is_ok(), "Should parse minimal catalog: {:?}", result.err());

        let catalog = result.unwrap();
        assert_eq!(catalog.name, "european_sites");
        assert_eq!(catalog.sites.len(), 1);

        let record = &catalog.sites[0];
        assert_eq!(record.site.site_id, "harvard");
        assert_eq!(record.scenes.len(), 2);
        assert_eq!(record.malformed_scene_count, 0);
        assert_eq!(record.scenes[0].index_value, Some(0.61));
        assert_eq!(record.scenes[1].index_value, None);
    }

    #[test]
    fn test_checksum_computed_when_absent() {
        let catalog = parse_catalog_json_str(MINIMAL_CATALOG, None).unwrap();
        assert_eq!(catalog.checksum.len(), 64);
        // Deterministic over the raw input
        let again = parse_catalog_json_str(MINIMAL_CATALOG, None).unwrap();
        assert_eq!(catalog.checksum, again.checksum);
    }

    #[test]
    fn test_checksum_preserved_when_present() {
        let json = r#"{ "checksum": "abc123", "sites": [] }"#;
        let catalog = parse_catalog_json_str(json, None).unwrap();
        assert_eq!(catalog.checksum, "abc123");
    }

    #[test]
    fn test_malformed_records_dropped_and_counted() {
        let json = r#"{
            "sites": [
                {
                    "site_id": "donana",
                    "latitude": 37.0,
                    "longitude": -6.4,
                    "scenes": [
                        { "date": "2023-06-01", "cloud_cover": 0.2 },
                        { "cloud_cover": 0.1 },
                        { "date": "garbage", "cloud_cover": 0.1 },
                        { "date": "2023-06-11" },
                        { "date": "2023-06-16", "cloud_cover": 45.0 }
                    ]
                }
            ]
        }"#;
        let catalog = parse_catalog_json_str(json, None).unwrap();
        let record = &catalog.sites[0];
        assert_eq!(record.scenes.len(), 1);
        assert_eq!(record.malformed_scene_count, 4);
    }

    #[test]
    fn test_merge_scenes_blob_wrapper_form() {
        let catalog_json = r#"{
            "sites": [
                { "site_id": "harvard", "latitude": 42.5, "longitude": -72.2 },
                { "site_id": "abisko", "latitude": 68.35, "longitude": 18.82 }
            ]
        }"#;
        let scenes_json = r#"{ "sites": { "harvard": [
            { "date": "2023-06-01", "cloud_cover": 0.1 },
            { "date": "2023-06-06", "cloud_cover": 0.5 }
        ] } }"#;

        let catalog = parse_catalog_json_str(catalog_json, Some(scenes_json)).unwrap();
        let harvard = catalog.sites.iter().find(|r| r.site.site_id == "harvard").unwrap();
        let abisko = catalog.sites.iter().find(|r| r.site.site_id == "abisko").unwrap();
        assert_eq!(harvard.scenes.len(), 2);
        assert!(abisko.scenes.is_empty());
    }

    #[test]
    fn test_merge_scenes_blob_direct_map_form() {
        let catalog_json = r#"{
            "sites": [ { "site_id": "harvard", "latitude": 42.5, "longitude": -72.2 } ]
        }"#;
        let scenes_json = r#"{ "harvard": [ { "date": "2023-06-01", "cloud_cover": 0.1 } ] }"#;

        let catalog = parse_catalog_json_str(catalog_json, Some(scenes_json)).unwrap();
        assert_eq!(catalog.sites[0].scenes.len(), 1);
    }

    #[test]
    fn test_blob_replaces_inline_scenes() {
        let scenes_json = r#"{ "harvard": [ { "date": "2024-01-01", "cloud_cover": 0.05 } ] }"#;
        let catalog = parse_catalog_json_str(MINIMAL_CATALOG, Some(scenes_json)).unwrap();
        let record = &catalog.sites[0];
        assert_eq!(record.scenes.len(), 1);
        assert_eq!(record.scenes[0].cloud_cover, 0.05);
    }

    #[test]
    fn test_missing_sites_key() {
        let result = parse_catalog_json_str(r#"{"SomeOtherKey": []}"#, None);
        assert!(result.is_err(), "Should fail without sites key");
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_catalog_json_str("not valid json {", None);
        assert!(result.is_err(), "Should fail with invalid JSON");
    }

    #[test]
    fn test_empty_scenes_blob_ignored() {
        let catalog = parse_catalog_json_str(MINIMAL_CATALOG, Some("  ")).unwrap();
        assert_eq!(catalog.sites[0].scenes.len(), 2);
    }
}
