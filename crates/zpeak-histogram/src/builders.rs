//! Histogram booking strategies

use crate::traits::HistogramBuilder;
use crate::types::Histogram;
use zpeak_core::{Binning, Metric, Result};

/// Fixed-width histogram builder
///
/// Books histograms with a specified number of equal-width bins over an
/// explicit range.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthBuilder {
    n_bins: usize,
    low: f64,
    high: f64,
}

impl FixedWidthBuilder {
    /// Create a new fixed-width histogram builder
    pub fn new(n_bins: usize, low: f64, high: f64) -> Self {
        Self { n_bins, low, high }
    }

    /// Builder using a metric's suggested binning
    pub fn for_metric(metric: Metric) -> Self {
        let Binning { n_bins, low, high } = metric.binning();
        Self::new(n_bins, low, high)
    }
}

impl HistogramBuilder for FixedWidthBuilder {
    fn book(&self, name: &str, title: &str) -> Result<Histogram> {
        Histogram::new(name, title, self.n_bins, self.low, self.high)
    }

    fn target_bins(&self) -> Option<usize> {
        Some(self.n_bins)
    }
}
