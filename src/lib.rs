//! # zpeak
//!
//! Dimuon selection and Z-peak histogramming for collider event analysis.
//!
//! The workspace is split into three crates, re-exported here:
//!
//! - [`types`]: four-momenta, muon candidates, metric booking and the
//!   sink/source traits shared by everything else
//! - [`histogram`]: fixed-binning 1-D histograms with under/overflow and a
//!   concurrent named accumulator
//! - [`analysis`]: muon selection, opposite-sign pairing and the
//!   `begin_job` / `analyze` / `end_job` analyzer
//!
//! ## Quick start
//!
//! ```rust
//! use zpeak::prelude::*;
//!
//! let mut analyzer = ZPeakAnalyzer::new(AnalyzerConfig::default())?;
//! analyzer.begin_job()?;
//!
//! let event = Event::new(EventId::new(1, 1, 1)).with_muons(
//!     "slimmedMuons",
//!     vec![
//!         MuonCandidate::with_muon_mass(44.0, 0.3, 0.2, Charge::Positive),
//!         MuonCandidate::with_muon_mass(47.0, -0.4, -2.9, Charge::Negative),
//!     ],
//! );
//! let summary = analyzer.analyze(&event)?;
//! assert_eq!(summary.n_pairs, 1);
//!
//! let report = analyzer.end_job()?;
//! let mass = report.histogram(Metric::DimuonMass).unwrap();
//! assert_eq!(mass.entries(), 1);
//! # Ok::<(), zpeak::types::Error>(())
//! ```

pub use zpeak_analysis as analysis;
pub use zpeak_core as types;
pub use zpeak_histogram as histogram;

/// Everything needed to run an analysis job
pub mod prelude {
    pub use zpeak_analysis::{
        AnalyzerConfig, EtaCut, Event, EventId, EventRecord, EventSummary, JobReport,
        JobStatistics, MuonEventProcessor, MuonSelector, ZPeakAnalyzer,
    };
    pub use zpeak_core::{
        Charge, Error, FourMomentum, HistogramSink, Metric, MuonCandidate, MuonSource, Result,
    };
    pub use zpeak_histogram::{Histogram, HistogramAccumulator, HistogramOps};
}
