//! Descriptive statistics over a run's elector distribution.

use crate::{engine::ReplicationResult, types::Electors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: Electors,
    /// Exclusive upper edge.
    pub upper: Electors,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub count:   usize,
    pub mean:    f64,
    pub std_dev: f64,
    pub min:     Electors,
    pub max:     Electors,
    pub p05:     f64,
    pub p50:     f64,
    pub p95:     f64,
    pub histogram: Vec<HistogramBin>,
    /// 99th percentile of |national error|, if the variant records one.
    pub national_error_abs_p99: Option<f64>,
}

impl DistributionSummary {
    pub fn from_results(results: &[ReplicationResult], bin_width: Electors) -> Self {
        let electors: Vec<f64> = results.iter().map(|r| r.electors_won as f64).collect();
        let count = electors.len();

        let mean = if count == 0 {
            0.0
        } else {
            electors.iter().sum::<f64>() / count as f64
        };
        // Sample standard deviation, as the notebooks report it.
        let std_dev = if count < 2 {
            0.0
        } else {
            let ss: f64 = electors.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };

        let min = results.iter().map(|r| r.electors_won).min().unwrap_or(0);
        let max = results.iter().map(|r| r.electors_won).max().unwrap_or(0);

        let abs_errors: Vec<f64> = results
            .iter()
            .filter_map(|r| r.national_error)
            .map(f64::abs)
            .collect();

        Self {
            count,
            mean,
            std_dev,
            min,
            max,
            p05: quantile(&electors, 0.05).unwrap_or(0.0),
            p50: quantile(&electors, 0.50).unwrap_or(0.0),
            p95: quantile(&electors, 0.95).unwrap_or(0.0),
            histogram: histogram(results, bin_width),
            national_error_abs_p99: quantile(&abs_errors, 0.99),
        }
    }
}

/// Nearest-rank quantile. Returns None for empty input or q outside [0, 1].
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = (q * sorted.len() as f64).ceil() as usize;
    Some(sorted[rank.saturating_sub(1).min(sorted.len() - 1)])
}

/// Fixed-width bins from the lowest occupied bin to the highest.
pub fn histogram(results: &[ReplicationResult], bin_width: Electors) -> Vec<HistogramBin> {
    let width = bin_width.max(1);
    let (Some(min), Some(max)) = (
        results.iter().map(|r| r.electors_won).min(),
        results.iter().map(|r| r.electors_won).max(),
    ) else {
        return Vec::new();
    };

    let first = min / width;
    let last = max / width;
    let mut bins: Vec<HistogramBin> = (first..=last)
        .map(|b| HistogramBin {
            lower: b * width,
            upper: b * width + width,
            count: 0,
        })
        .collect();
    for r in results {
        bins[(r.electors_won / width - first) as usize].count += 1;
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(electors_won: Electors) -> ReplicationResult {
        ReplicationResult { index: 0, electors_won, national_error: None }
    }

    #[test]
    fn nearest_rank_quantiles() {
        let v: Vec<f64> = (1..=100).map(f64::from).collect();
        assert_eq!(quantile(&v, 0.05), Some(5.0));
        assert_eq!(quantile(&v, 0.5), Some(50.0));
        assert_eq!(quantile(&v, 1.0), Some(100.0));
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn histogram_spans_occupied_range() {
        let results = vec![result(3), result(12), result(19), result(31)];
        let bins = histogram(&results, 10);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].lower, 0);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 2, 0, 1]);
    }
}
