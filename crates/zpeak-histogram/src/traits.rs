//! Core traits for histogram building

use crate::types::Histogram;
use zpeak_core::Result;

/// Trait for building histograms from sample data
pub trait HistogramBuilder {
    /// Book an empty histogram
    fn book(&self, name: &str, title: &str) -> Result<Histogram>;

    /// Build a histogram from the given sample
    fn build(&self, name: &str, sample: &[f64]) -> Result<Histogram> {
        let mut histogram = self.book(name, "")?;
        histogram.fill_all(sample);
        Ok(histogram)
    }

    /// Get the target number of bins (if known)
    fn target_bins(&self) -> Option<usize> {
        None
    }
}
