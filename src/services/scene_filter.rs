//! Scene subset partitioning.
//!
//! Splits a site's scene collection into the two subset policies the gap
//! calculators run on: all scenes, and clear scenes below the cloud-cover
//! threshold. Both subsets come out canonically sorted by ascending
//! acquisition date so every downstream statistic is invariant to the input
//! ordering.

use crate::api::Scene;
use chrono::NaiveDate;

/// A site's scene collection under both subset policies.
///
/// The clear subset is always a subset of the all subset: cloud filtering
/// only removes scenes.
#[derive(Debug, Clone, Default)]
pub struct SceneSubsets {
    /// Every scene, sorted ascending by date
    pub all: Vec<Scene>,
    /// Scenes with cloud cover below the threshold, sorted ascending by date
    pub clear: Vec<Scene>,
}

/// Partition a scene collection by the clear-cloud threshold.
///
/// Duplicate acquisition dates are preserved as distinct entries (two
/// acquisitions on the same day stay two scenes); the sort is stable, so
/// same-day scenes keep their relative input order. An empty input yields two
/// empty subsets.
pub fn partition_scenes(mut scenes: Vec<Scene>, clear_cloud_threshold: f64) -> SceneSubsets {
    scenes.sort_by(|a, b| a.date.cmp(&b.date));

    let clear = scenes
        .iter()
        .filter(|scene| scene.is_clear(clear_cloud_threshold))
        .cloned()
        .collect();

    SceneSubsets { all: scenes, clear }
}

/// Acquisition dates of a sorted scene subset.
pub fn scene_dates(scenes: &[Scene]) -> Vec<NaiveDate> {
    scenes.iter().map(|scene| scene.date).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_subsets() {
        let subsets = partition_scenes(vec![], 0.30);
        assert!(subsets.all.is_empty());
        assert!(subsets.clear.is_empty());
    }

    #[test]
    fn test_partition_sorts_ascending() {
        let scenes = vec![
            Scene::new(date(2023, 6, 20), 0.1),
            Scene::new(date(2023, 6, 1), 0.1),
            Scene::new(date(2023, 6, 10), 0.1),
        ];
        let subsets = partition_scenes(scenes, 0.30);
        let dates = scene_dates(&subsets.all);
        assert_eq!(
            dates,
            vec![date(2023, 6, 1), date(2023, 6, 10), date(2023, 6, 20)]
        );
    }

    #[test]
    fn test_clear_subset_filters_by_threshold() {
        let scenes = vec![
            Scene::new(date(2023, 6, 1), 0.05),
            Scene::new(date(2023, 6, 6), 0.30), // at-threshold is cloudy
            Scene::new(date(2023, 6, 11), 0.95),
            Scene::new(date(2023, 6, 16), 0.29),
        ];
        let subsets = partition_scenes(scenes, 0.30);
        assert_eq!(subsets.all.len(), 4);
        assert_eq!(subsets.clear.len(), 2);
        assert_eq!(
            scene_dates(&subsets.clear),
            vec![date(2023, 6, 1), date(2023, 6, 16)]
        );
    }

    #[test]
    fn test_clear_is_subset_of_all() {
        let scenes = vec![
            Scene::new(date(2023, 6, 3), 0.5),
            Scene::new(date(2023, 6, 1), 0.1),
            Scene::new(date(2023, 6, 2), 0.2),
        ];
        let subsets = partition_scenes(scenes, 0.30);
        for scene in &subsets.clear {
            assert!(subsets.all.contains(scene));
        }
    }

    #[test]
    fn test_duplicate_dates_preserved() {
        let scenes = vec![
            Scene::new(date(2023, 6, 1), 0.1),
            Scene::new(date(2023, 6, 1), 0.2),
        ];
        let subsets = partition_scenes(scenes, 0.30);
        assert_eq!(subsets.all.len(), 2);
        assert_eq!(subsets.clear.len(), 2);
    }

    #[test]
    fn test_no_mutation_of_scene_values() {
        let scenes = vec![Scene::with_index(date(2023, 6, 1), 0.1, 0.55)];
        let subsets = partition_scenes(scenes, 0.30);
        assert_eq!(subsets.all[0].index_value, Some(0.55));
        assert_eq!(subsets.clear[0].index_value, Some(0.55));
    }
}
