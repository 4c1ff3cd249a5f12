//! Site coverage report assembly.
//!
//! Combines the scene filter's two subsets, both gap-statistics results, and
//! the vegetation index summary into one per-site report, then merges all
//! sites into the final ordered collection.
//!
//! Failure policy: a scene-source failure for one site is recorded as an
//! explicit per-site error marker; it never aborts the run or affects any
//! other site. The final output always contains one entry per requested site.

use crate::api::{CoverageData, Scene, SiteFailure, SiteOutcome, SiteRecord, SiteReport};
use crate::config::EngineConfig;
use crate::db::repository::SiteRepository;
use crate::services::{gap_stats, scene_filter, vegetation_index};
use tracing::{debug, info, warn};

/// Mean and sample standard deviation of the cloud-cover fractions.
///
/// `None` for an empty subset; a single scene has zero deviation.
fn cloud_statistics(scenes: &[Scene]) -> (Option<f64>, Option<f64>) {
    if scenes.is_empty() {
        return (None, None);
    }

    let values: Vec<f64> = scenes.iter().map(|scene| scene.cloud_cover).collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let std = if values.len() > 1 {
        let variance = values
            .iter()
            .map(|value| {
                let diff = value - mean;
                diff * diff
            })
            .sum::<f64>()
            / (values.len() - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    (Some(mean), Some(std))
}

/// Assemble the full coverage report for one site.
///
/// Pure and synchronous: the scene collection is already resolved. The gap
/// calculator runs twice — once per subset policy — and a scene excluded from
/// the clear subset still contributes to the all-scene statistics. The
/// vegetation index is computed only for sites the configuration selects.
pub fn evaluate_site(record: &SiteRecord, config: &EngineConfig) -> SiteReport {
    let subsets = scene_filter::partition_scenes(record.scenes.clone(), config.clear_cloud_threshold);

    let all_dates = scene_filter::scene_dates(&subsets.all);
    let clear_dates = scene_filter::scene_dates(&subsets.clear);
    let all_gaps = gap_stats::compute_gap_statistics(&all_dates, config.gap_threshold_days);
    let clear_gaps = gap_stats::compute_gap_statistics(&clear_dates, config.gap_threshold_days);

    let (cloud_cover_mean, cloud_cover_std) = cloud_statistics(&subsets.all);

    let index = config
        .computes_index_for(&record.site.site_id)
        .then(|| vegetation_index::compute_index_summary(&subsets.clear, config));

    debug!(
        site_id = %record.site.site_id,
        scenes = subsets.all.len(),
        clear_scenes = subsets.clear.len(),
        max_gap_days = all_gaps.max_gap_days,
        "Evaluated site coverage"
    );

    SiteReport {
        site: record.site.clone(),
        scene_count: subsets.all.len(),
        clear_scene_count: subsets.clear.len(),
        malformed_scene_count: record.malformed_scene_count,
        cloud_cover_mean,
        cloud_cover_std,
        first_date: all_gaps.first_date,
        last_date: all_gaps.last_date,
        max_gap_days: all_gaps.max_gap_days,
        gap_count: all_gaps.gap_count,
        weighted_gap_score: all_gaps.weighted_gap_score,
        clear_max_gap_days: clear_gaps.max_gap_days,
        clear_gap_count: clear_gaps.gap_count,
        clear_weighted_gap_score: clear_gaps.weighted_gap_score,
        index,
    }
}

/// Evaluate every site known to the repository.
///
/// Sites are processed independently and the results ordered by site
/// identifier for reproducible output. A repository failure for one site is
/// recorded as a [`SiteOutcome::Failed`] entry in place of its statistics.
pub async fn evaluate_sites(
    repo: &dyn SiteRepository,
    config: &EngineConfig,
) -> crate::db::repository::RepositoryResult<CoverageData> {
    let mut sites = repo.list_sites().await?;
    sites.sort_by(|a, b| a.site_id.cmp(&b.site_id));

    let mut outcomes = Vec::with_capacity(sites.len());
    let mut failed_count = 0;

    for site in sites {
        match repo.fetch_site_record(&site.site_id).await {
            Ok(record) => outcomes.push(SiteOutcome::Report(evaluate_site(&record, config))),
            Err(error) => {
                warn!(site_id = %site.site_id, %error, "Recording per-site failure");
                failed_count += 1;
                outcomes.push(SiteOutcome::Failed(SiteFailure {
                    site,
                    error: error.to_string(),
                }));
            }
        }
    }

    info!(
        site_count = outcomes.len(),
        failed_count, "Coverage run complete"
    );

    Ok(CoverageData {
        site_count: outcomes.len(),
        failed_count,
        sites: outcomes,
    })
}
