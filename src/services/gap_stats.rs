//! Gap statistics calculator.
//!
//! Quantifies the temporal sparsity of one scene subset: the largest gap
//! between adjacent acquisitions, the number of gaps long enough to count as
//! data voids, and a severity-weighted score that rewards short, frequent
//! revisits and penalizes long voids.
//!
//! The calculator is invoked twice per site — once on all scenes, once on
//! clear scenes only — so both subset policies share one code path.

use crate::api::GapStatistics;
use chrono::NaiveDate;

/// Consecutive gaps in whole days between adjacent dates.
///
/// The input must be sorted ascending. Fewer than two dates produce no gaps.
pub fn consecutive_gaps(dates: &[NaiveDate]) -> Vec<i64> {
    dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .collect()
}

/// Compute gap statistics for one ascending-sorted date sequence.
///
/// Gaps strictly longer than `gap_threshold_days` count as data voids. The
/// weighted gap score is the mean squared gap length,
/// `Σ gapᵢ² / (scene_count − 1)`, over all consecutive gaps: it grows with
/// every individual gap length and with the share of long gaps, and depends
/// only on the sorted gap multiset. Subsets with fewer than two scenes get
/// zero for all three statistics.
pub fn compute_gap_statistics(dates: &[NaiveDate], gap_threshold_days: i64) -> GapStatistics {
    if dates.len() < 2 {
        return GapStatistics {
            scene_count: dates.len(),
            max_gap_days: 0,
            gap_count: 0,
            weighted_gap_score: 0.0,
            first_date: dates.first().copied(),
            last_date: dates.last().copied(),
        };
    }

    let gaps = consecutive_gaps(dates);
    let max_gap_days = gaps.iter().copied().max().unwrap_or(0);
    let gap_count = gaps.iter().filter(|gap| **gap > gap_threshold_days).count();
    let weighted_gap_score = gaps
        .iter()
        .map(|gap| (*gap as f64) * (*gap as f64))
        .sum::<f64>()
        / gaps.len() as f64;

    GapStatistics {
        scene_count: dates.len(),
        max_gap_days,
        gap_count,
        weighted_gap_score,
        first_date: dates.first().copied(),
        last_date: dates.last().copied(),
    }
}
