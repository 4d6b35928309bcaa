//! Fixed-binning histograms for event analysis
//!
//! This crate provides the histogram side of the zpeak analysis: one-dimensional
//! histograms with fixed, equal-width binning and explicit underflow/overflow
//! counters, booking strategies, a few shape operations, and
//! [`HistogramAccumulator`], a thread-safe set of named histograms that
//! implements [`zpeak_core::HistogramSink`].
//!
//! # Examples
//!
//! ## Booking and filling
//!
//! ```rust
//! use zpeak_histogram::{FixedWidthBuilder, HistogramBuilder, HistogramOps};
//!
//! let builder = FixedWidthBuilder::new(120, 30.0, 150.0);
//! let mut mass = builder.book("dimuonMass", "mass").unwrap();
//! for m in [88.9, 91.2, 91.4, 93.0, 250.0] {
//!     mass.fill(m);
//! }
//!
//! assert_eq!(mass.entries(), 5);
//! assert_eq!(mass.overflow(), 1);
//! assert_eq!(mass.peak_position(), Some(91.5));
//! ```
//!
//! ## Accumulating named metrics
//!
//! ```rust
//! use zpeak_core::{HistogramSink, Metric};
//! use zpeak_histogram::HistogramAccumulator;
//!
//! let sink = HistogramAccumulator::with_metrics(&Metric::ALL);
//! sink.append("nMuon", 2.0).unwrap();
//! sink.append("dimuonMass", 91.1).unwrap();
//!
//! assert_eq!(sink.get("nMuon").unwrap().bin_count(2), Some(1));
//! assert!(sink.append("jetPt", 40.0).is_err());
//! ```

pub mod accumulator;
pub mod builders;
pub mod ops;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use accumulator::HistogramAccumulator;
pub use builders::FixedWidthBuilder;
pub use ops::HistogramOps;
pub use traits::HistogramBuilder;
pub use types::{BinLocation, Histogram, HistogramBin};

// Convenience functions
/// Book an empty histogram for a well-known metric
pub fn book_metric(metric: zpeak_core::Metric) -> Histogram {
    Histogram::with_binning(metric.name(), metric.title(), metric.binning())
}

pub use zpeak_core::Result;
