//! Operations on histograms

use crate::types::{BinLocation, Histogram};

/// Operations that can be performed on histograms
pub trait HistogramOps {
    /// Index of the fullest bin, first one on ties; `None` when all bins are empty
    fn peak_bin(&self) -> Option<usize>;

    /// Center of the fullest bin
    fn peak_position(&self) -> Option<f64>;

    /// Number of in-range entries in the bins whose centers lie in `[low, high]`
    fn integral_between(&self, low: f64, high: f64) -> u64;

    /// Per-bin frequencies of the in-range entries (summing to 1)
    fn normalized(&self) -> Vec<f64>;

    /// Calculate the chi-squared distance between the normalized shapes
    fn chi_squared_distance(&self, other: &Self) -> f64;
}

impl HistogramOps for Histogram {
    fn peak_bin(&self) -> Option<usize> {
        let max = self.max_count();
        if max == 0 {
            return None;
        }
        self.counts().iter().position(|&c| c == max)
    }

    fn peak_position(&self) -> Option<f64> {
        self.peak_bin()
            .and_then(|idx| self.bin(idx))
            .map(|bin| bin.center())
    }

    fn integral_between(&self, low: f64, high: f64) -> u64 {
        self.bins()
            .filter(|bin| bin.center() >= low && bin.center() <= high)
            .map(|bin| bin.count)
            .sum()
    }

    fn normalized(&self) -> Vec<f64> {
        let total = self.in_range();
        if total == 0 {
            return vec![0.0; self.len()];
        }
        self.counts()
            .iter()
            .map(|&c| c as f64 / total as f64)
            .collect()
    }

    fn chi_squared_distance(&self, other: &Self) -> f64 {
        let (aligned_self, aligned_other) = align_histograms(self, other);

        aligned_self
            .iter()
            .zip(aligned_other.iter())
            .map(|(a, b)| {
                let sum = a + b;
                if sum > 0.0 {
                    (a - b).powi(2) / sum
                } else {
                    0.0
                }
            })
            .sum::<f64>()
            * 0.5
    }
}

// Helper functions

/// Rebin `other` onto the bins of `hist` by bin center, then normalize both
fn align_histograms(hist: &Histogram, other: &Histogram) -> (Vec<f64>, Vec<f64>) {
    if hist.binning() == other.binning() {
        return (hist.normalized(), other.normalized());
    }

    let mut rebinned = vec![0.0; hist.len()];
    for bin in other.bins() {
        if let BinLocation::Bin(idx) = hist.find_bin(bin.center()) {
            rebinned[idx] += bin.count as f64;
        }
    }
    let total: f64 = rebinned.iter().sum();
    if total > 0.0 {
        for v in &mut rebinned {
            *v /= total;
        }
    }

    (hist.normalized(), rebinned)
}
