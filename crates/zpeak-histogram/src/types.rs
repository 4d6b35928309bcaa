//! Core types for histogram representation

use serde::{Deserialize, Serialize};
use std::fmt;
use zpeak_core::{Binning, Error, Result};

/// A single bin in a histogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Left edge of the bin (inclusive)
    pub left: f64,
    /// Right edge of the bin (exclusive)
    pub right: f64,
    /// Number of values in this bin
    pub count: u64,
}

impl HistogramBin {
    /// Get the center point of the bin
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Get the width of the bin
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Check if a value falls within this bin
    pub fn contains(&self, value: f64) -> bool {
        value >= self.left && value < self.right
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}): count={}", self.left, self.right, self.count)
    }
}

/// Where a filled value landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinLocation {
    Underflow,
    Bin(usize),
    /// At or above the upper edge, or NaN
    Overflow,
}

/// A one-dimensional histogram with fixed, equal-width binning
///
/// Values below the lower edge are counted as underflow, values at or above
/// the upper edge (and NaN) as overflow. Mean and standard deviation are
/// computed over in-range fills only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    name: String,
    title: String,
    binning: Binning,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
    sum: f64,
    sum_squares: f64,
}

impl Histogram {
    /// Create an empty histogram
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        n_bins: usize,
        low: f64,
        high: f64,
    ) -> Result<Self> {
        Ok(Self::with_binning(name, title, Binning::new(n_bins, low, high)?))
    }

    /// Create an empty histogram from an already validated binning
    pub fn with_binning(name: impl Into<String>, title: impl Into<String>, binning: Binning) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            binning,
            counts: vec![0; binning.n_bins],
            underflow: 0,
            overflow: 0,
            sum: 0.0,
            sum_squares: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn binning(&self) -> Binning {
        self.binning
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing has been filled yet
    pub fn is_empty(&self) -> bool {
        self.entries() == 0
    }

    /// Find which bin a value falls into
    pub fn find_bin(&self, value: f64) -> BinLocation {
        let Binning { n_bins, low, high } = self.binning;
        if value < low {
            return BinLocation::Underflow;
        }
        if value >= high || value.is_nan() {
            return BinLocation::Overflow;
        }
        let idx = ((value - low) / (high - low) * n_bins as f64) as usize;
        // Rounding can push a value just below `high` into a phantom bin
        BinLocation::Bin(idx.min(n_bins - 1))
    }

    /// Fill one value
    pub fn fill(&mut self, value: f64) -> BinLocation {
        let location = self.find_bin(value);
        match location {
            BinLocation::Underflow => self.underflow += 1,
            BinLocation::Overflow => self.overflow += 1,
            BinLocation::Bin(idx) => {
                self.counts[idx] += 1;
                self.sum += value;
                self.sum_squares += value * value;
            }
        }
        location
    }

    /// Fill every value of a sample
    pub fn fill_all(&mut self, sample: &[f64]) {
        for &value in sample {
            self.fill(value);
        }
    }

    /// Total number of fills, including underflow and overflow
    pub fn entries(&self) -> u64 {
        self.in_range() + self.underflow + self.overflow
    }

    /// Number of fills that landed inside the binned range
    pub fn in_range(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Count in bin `idx`, `None` when out of range
    pub fn bin_count(&self, idx: usize) -> Option<u64> {
        self.counts.get(idx).copied()
    }

    /// Get counts as a slice
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Get the bin at `idx`
    pub fn bin(&self, idx: usize) -> Option<HistogramBin> {
        let count = self.bin_count(idx)?;
        let width = self.binning.bin_width();
        Some(HistogramBin {
            left: self.binning.low + idx as f64 * width,
            right: self.binning.low + (idx + 1) as f64 * width,
            count,
        })
    }

    /// Iterate over the in-range bins
    pub fn bins(&self) -> impl Iterator<Item = HistogramBin> + '_ {
        (0..self.len()).filter_map(move |idx| self.bin(idx))
    }

    /// Get bin edges (including rightmost edge)
    pub fn edges(&self) -> Vec<f64> {
        let width = self.binning.bin_width();
        (0..=self.len())
            .map(|i| self.binning.low + i as f64 * width)
            .collect()
    }

    /// Get bin centers as a vector
    pub fn centers(&self) -> Vec<f64> {
        self.bins().map(|bin| bin.center()).collect()
    }

    /// Number of in-range entries; the integral of an unweighted histogram
    pub fn integral(&self) -> u64 {
        self.in_range()
    }

    /// Mean of the in-range fills, `None` before any
    pub fn mean(&self) -> Option<f64> {
        let n = self.in_range();
        (n > 0).then(|| self.sum / n as f64)
    }

    /// Population standard deviation of the in-range fills
    pub fn std_dev(&self) -> Option<f64> {
        let n = self.in_range() as f64;
        let mean = self.mean()?;
        Some((self.sum_squares / n - mean * mean).max(0.0).sqrt())
    }

    /// Get the maximum count in any bin
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Add the contents of another histogram with identical binning
    pub fn merge(&mut self, other: &Histogram) -> Result<()> {
        if self.binning != other.binning {
            return Err(Error::BinningMismatch {
                name: self.name.clone(),
                expected: self.binning.to_string(),
                actual: other.binning.to_string(),
            });
        }
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        self.sum += other.sum;
        self.sum_squares += other.sum_squares;
        Ok(())
    }

    /// Clear all contents, keeping the booking
    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.underflow = 0;
        self.overflow = 0;
        self.sum = 0.0;
        self.sum_squares = 0.0;
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({}: {}, entries={}, underflow={}, overflow={})",
            self.name,
            self.binning,
            self.entries(),
            self.underflow,
            self.overflow
        )
    }
}
