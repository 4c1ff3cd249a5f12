//! Vegetation index calculator.
//!
//! Assembles the per-site vegetation index time series from the clear-scene
//! subset and derives its summary statistics. The imagery backend performs
//! the raw band math; scenes arrive carrying an already-reduced index value,
//! and this module only aggregates.
//!
//! Index points are additionally annotated with an upper-envelope outlier
//! flag. The flag is informational: summary statistics always cover every
//! value in the series, and no smoothing or interpolation is applied.

use crate::api::{IndexPoint, IndexSummary, Scene};
use crate::config::EngineConfig;
use chrono::Duration;
use std::cmp::Ordering;

/// Index values below this are implausible for vegetated land cover and are
/// flagged outright.
const MIN_VALID_INDEX: f64 = 0.1;

/// Build the index series from clear scenes and compute its summary.
///
/// Scenes without an index value (the backend computed none) are skipped.
/// An empty series is valid and yields `null` summary statistics, never a
/// numeric zero.
pub fn compute_index_summary(clear_scenes: &[Scene], config: &EngineConfig) -> IndexSummary {
    let mut points: Vec<IndexPoint> = clear_scenes
        .iter()
        .filter_map(|scene| {
            scene.index_value.map(|value| IndexPoint {
                date: scene.date,
                value,
                outlier: false,
            })
        })
        .collect();
    points.sort_by(|a, b| a.date.cmp(&b.date));

    flag_outliers(&mut points, config);
    summarize(points)
}

fn summarize(points: Vec<IndexPoint>) -> IndexSummary {
    if points.is_empty() {
        return IndexSummary::empty();
    }

    let values: Vec<f64> = points.iter().map(|point| point.value).collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    IndexSummary {
        observations: values.len(),
        mean: Some(mean),
        min: Some(min),
        max: Some(max),
        range: Some(max - min),
        series: points,
    }
}

/// Flag index points that fall well below the local upper envelope.
///
/// For each point, the envelope is the configured percentile of plausible
/// values (≥ [`MIN_VALID_INDEX`]) inside a rolling window centered on the
/// point's date. A point is an outlier when it is below the absolute floor or
/// more than `envelope_threshold_below` under its envelope. Points without a
/// computable envelope are left unflagged.
pub fn flag_outliers(points: &mut [IndexPoint], config: &EngineConfig) {
    if points.is_empty() {
        return;
    }

    let half_window = Duration::days(config.envelope_window_days / 2);
    let envelopes: Vec<Option<f64>> = points
        .iter()
        .map(|point| {
            let window_start = point.date - half_window;
            let window_end = point.date + half_window;
            let mut window: Vec<f64> = points
                .iter()
                .filter(|other| {
                    other.date >= window_start
                        && other.date <= window_end
                        && other.value >= MIN_VALID_INDEX
                })
                .map(|other| other.value)
                .collect();
            if window.is_empty() {
                None
            } else {
                window.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                Some(percentile(&window, config.envelope_percentile))
            }
        })
        .collect();

    for (point, envelope) in points.iter_mut().zip(envelopes) {
        point.outlier = if point.value < MIN_VALID_INDEX {
            true
        } else if let Some(envelope) = envelope {
            envelope - point.value > config.envelope_threshold_below
        } else {
            false
        };
    }
}

/// Linearly interpolated percentile of an ascending-sorted slice.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        sorted[low] + (rank - low as f64) * (sorted[high] - sorted[low])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_empty_series_yields_null_sentinels() {
        let summary = compute_index_summary(&[], &config());
        assert_eq!(summary.observations, 0);
        assert!(summary.mean.is_none());
        assert!(summary.min.is_none());
        assert!(summary.max.is_none());
        assert!(summary.range.is_none());
        assert!(summary.series.is_empty());
    }

    #[test]
    fn test_scenes_without_index_value_are_skipped() {
        let scenes = vec![
            Scene::new(date(2023, 6, 1), 0.1),
            Scene::with_index(date(2023, 6, 6), 0.1, 0.4),
        ];
        let summary = compute_index_summary(&scenes, &config());
        assert_eq!(summary.observations, 1);
        assert_eq!(summary.mean, Some(0.4));
    }

    #[test]
    fn test_summary_statistics() {
        let scenes = vec![
            Scene::with_index(date(2023, 6, 1), 0.1, 0.2),
            Scene::with_index(date(2023, 6, 6), 0.1, 0.5),
            Scene::with_index(date(2023, 6, 11), 0.1, 0.3),
        ];
        let summary = compute_index_summary(&scenes, &config());
        assert_eq!(summary.observations, 3);
        assert!((summary.mean.unwrap() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.min, Some(0.2));
        assert_eq!(summary.max, Some(0.5));
        assert!((summary.range.unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_series_sorted_by_date() {
        let scenes = vec![
            Scene::with_index(date(2023, 6, 11), 0.1, 0.3),
            Scene::with_index(date(2023, 6, 1), 0.1, 0.2),
        ];
        let summary = compute_index_summary(&scenes, &config());
        assert_eq!(summary.series[0].date, date(2023, 6, 1));
        assert_eq!(summary.series[1].date, date(2023, 6, 11));
    }

    #[test]
    fn test_low_value_flagged_as_outlier() {
        let scenes = vec![
            Scene::with_index(date(2023, 6, 1), 0.1, 0.05),
            Scene::with_index(date(2023, 6, 6), 0.1, 0.6),
        ];
        let summary = compute_index_summary(&scenes, &config());
        assert!(summary.series[0].outlier);
        assert!(!summary.series[1].outlier);
    }

    #[test]
    fn test_envelope_drop_flagged_as_outlier() {
        // A dense cluster of high values with one sharp dip inside the window
        let mut scenes: Vec<Scene> = (0..10)
            .map(|i| Scene::with_index(date(2023, 6, 1 + i), 0.1, 0.7))
            .collect();
        scenes.push(Scene::with_index(date(2023, 6, 5), 0.1, 0.3));
        let summary = compute_index_summary(&scenes, &config());
        let dip = summary
            .series
            .iter()
            .find(|point| point.value == 0.3)
            .unwrap();
        assert!(dip.outlier);
    }

    #[test]
    fn test_outlier_flags_do_not_change_summary() {
        let scenes = vec![
            Scene::with_index(date(2023, 6, 1), 0.1, 0.05),
            Scene::with_index(date(2023, 6, 6), 0.1, 0.6),
            Scene::with_index(date(2023, 6, 11), 0.1, 0.7),
        ];
        let summary = compute_index_summary(&scenes, &config());
        // The 0.05 outlier still participates in every statistic
        assert_eq!(summary.observations, 3);
        assert_eq!(summary.min, Some(0.05));
        assert!((summary.mean.unwrap() - (0.05 + 0.6 + 0.7) / 3.0).abs() < 1e-9);
        assert!((summary.range.unwrap() - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_interpolation() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&sorted, 50.0) - 2.5).abs() < 1e-12);
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[0.42], 80.0), 0.42);
    }
}
