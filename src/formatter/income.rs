//! Household income distribution over arbitrary dollar ranges.
//!
//! Census bins rarely line up with the ranges an analyst cares about, so a
//! bin that straddles a range boundary is apportioned by the fraction of its
//! width inside the range, assuming households are spread uniformly within
//! the bin. The open-ended top bin has no width and is counted as a whole at
//! its lower bound.

use crate::property::{IncomeBin, INCOME_BINS};

/// A dollar range `[min, max)` reported in the view; `max = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeBand {
    pub label: &'static str,
    pub min: f64,
    pub max: Option<f64>,
}

/// Bands shown for every radius. Together they cover `[0, ∞)`.
pub const INCOME_BANDS: [IncomeBand; 5] = [
    IncomeBand { label: "Under $40K", min: 0.0, max: Some(40_000.0) },
    IncomeBand { label: "$40K-$80K", min: 40_000.0, max: Some(80_000.0) },
    IncomeBand { label: "$80K-$125K", min: 80_000.0, max: Some(125_000.0) },
    IncomeBand { label: "$125K-$200K", min: 125_000.0, max: Some(200_000.0) },
    IncomeBand { label: "$200K+", min: 200_000.0, max: None },
];

/// Fraction of a bin's households that fall inside `[min, max)`.
fn bin_overlap(bin: &IncomeBin, min: f64, max: Option<f64>) -> f64 {
    let max = max.unwrap_or(f64::INFINITY);
    match bin.upper {
        Some(upper) => {
            let width = upper - bin.lower;
            if width <= 0.0 {
                return 0.0;
            }
            let overlap = upper.min(max) - bin.lower.max(min);
            (overlap / width).clamp(0.0, 1.0)
        }
        None if min <= bin.lower && bin.lower < max => 1.0,
        None => 0.0,
    }
}

/// Percentage (0-100, unrounded) of `total` households earning within
/// `[min, max)`. `counts` is aligned with [`INCOME_BINS`]; missing counts
/// contribute nothing. `None` when the total is missing or not positive.
pub fn income_share(
    counts: &[Option<f64>],
    total: Option<f64>,
    min: f64,
    max: Option<f64>,
) -> Option<f64> {
    let total = total.filter(|t| *t > 0.0)?;
    let households: f64 = INCOME_BINS
        .iter()
        .zip(counts)
        .map(|(bin, count)| count.unwrap_or(0.0).max(0.0) * bin_overlap(bin, min, max))
        .sum();
    Some((households / total * 100.0).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_counts() -> Vec<Option<f64>> {
        [120.0, 95.0, 110.0, 180.0, 260.0, 210.0, 240.0, 130.0, 75.0]
            .into_iter()
            .map(Some)
            .collect()
    }

    fn total(counts: &[Option<f64>]) -> Option<f64> {
        Some(counts.iter().flatten().sum())
    }

    #[test]
    fn test_aligned_range_sums_whole_bins() {
        let counts = complete_counts();
        let share = income_share(&counts, Some(1000.0), 0.0, Some(50_000.0)).unwrap();
        // 120 + 95 + 110 + 180
        assert!((share - 50.5).abs() < 1e-9);
    }

    #[test]
    fn test_partial_bin_is_interpolated() {
        let mut counts = vec![None; INCOME_BINS.len()];
        counts[3] = Some(150.0); // $35K-$50K
        // [40K, 50K) covers two thirds of the bin.
        let share = income_share(&counts, Some(300.0), 40_000.0, Some(50_000.0)).unwrap();
        assert!((share - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_open_ended_bin_counts_at_lower_bound() {
        let mut counts = vec![None; INCOME_BINS.len()];
        counts[8] = Some(40.0);
        assert_eq!(income_share(&counts, Some(100.0), 150_000.0, Some(250_000.0)), Some(40.0));
        assert_eq!(income_share(&counts, Some(100.0), 210_000.0, None), Some(0.0));
        assert_eq!(income_share(&counts, Some(100.0), 0.0, Some(200_000.0)), Some(0.0));
    }

    #[test]
    fn test_full_sweep_sums_to_one_hundred() {
        let counts = complete_counts();
        let total = total(&counts);
        let sum: f64 = INCOME_BANDS
            .iter()
            .map(|band| income_share(&counts, total, band.min, band.max).unwrap())
            .sum();
        assert!((sum - 100.0).abs() < 1e-6, "sweep summed to {sum}");
    }

    #[test]
    fn test_share_stays_within_bounds() {
        let counts = complete_counts();
        let total = total(&counts);
        let edges = [0.0, 12_000.0, 37_500.0, 60_000.0, 99_999.0, 180_000.0, 300_000.0];
        for &min in &edges {
            for &max in &edges {
                let share = income_share(&counts, total, min, Some(max)).unwrap();
                assert!((0.0..=100.0).contains(&share), "[{min}, {max}) gave {share}");
            }
            let share = income_share(&counts, total, min, None).unwrap();
            assert!((0.0..=100.0).contains(&share));
        }
    }

    #[test]
    fn test_zero_or_missing_total_is_unavailable() {
        let counts = complete_counts();
        assert_eq!(income_share(&counts, Some(0.0), 0.0, None), None);
        assert_eq!(income_share(&counts, None, 0.0, None), None);
    }
}
