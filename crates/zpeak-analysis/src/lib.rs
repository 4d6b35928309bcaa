//! Dimuon selection and Z-peak reconstruction
//!
//! This crate turns collision events carrying reconstructed muon candidates
//! into the histograms of a dimuon analysis. Muons passing a transverse
//! momentum and pseudorapidity selection are counted and their kinematics
//! recorded; every opposite-sign pair of selected muons contributes its
//! invariant mass to the dimuon mass spectrum, where the Z boson shows up as
//! a peak near 91 GeV.
//!
//! # Components
//!
//! - [`MuonEventProcessor`]: stateless per-event selection, kinematics and
//!   pair masses, filling any [`zpeak_core::HistogramSink`]
//! - [`ZPeakAnalyzer`]: the job lifecycle (`begin_job` / `analyze` /
//!   `end_job`) around a [`zpeak_histogram::HistogramAccumulator`]
//! - [`AnalyzerConfig`]: thresholds, eta-cut mode and input label
//!
//! # Examples
//!
//! ## Per-event processing
//!
//! ```rust
//! use zpeak_analysis::MuonEventProcessor;
//! use zpeak_core::{Charge, MuonCandidate};
//!
//! let processor = MuonEventProcessor::default();
//! let muons = vec![
//!     MuonCandidate::with_muon_mass(25.0, 0.5, 0.0, Charge::Positive),
//!     MuonCandidate::with_muon_mass(30.0, -0.3, 3.0, Charge::Negative),
//!     MuonCandidate::with_muon_mass(10.0, 0.0, 1.0, Charge::Negative),
//! ];
//!
//! let selected = processor.select(&muons);
//! assert_eq!(processor.count_selected(&selected), 2);
//! assert_eq!(processor.dimuon_masses(&selected).count(), 1);
//! ```
//!
//! ## A full job
//!
//! ```rust
//! use zpeak_analysis::{AnalyzerConfig, EtaCut, Event, EventId, ZPeakAnalyzer};
//! use zpeak_core::{Charge, Metric, MuonCandidate};
//!
//! let config = AnalyzerConfig::default().with_eta_cut(EtaCut::Absolute);
//! let mut analyzer = ZPeakAnalyzer::new(config).unwrap();
//! analyzer.begin_job().unwrap();
//!
//! let event = Event::new(EventId::new(1, 1, 1)).with_muons(
//!     "slimmedMuons",
//!     vec![
//!         MuonCandidate::with_muon_mass(45.0, 0.1, 0.0, Charge::Positive),
//!         MuonCandidate::with_muon_mass(46.0, -0.2, 3.1, Charge::Negative),
//!     ],
//! );
//! analyzer.analyze(&event).unwrap();
//!
//! let report = analyzer.end_job().unwrap();
//! assert_eq!(report.histogram(Metric::DimuonMass).unwrap().entries(), 1);
//! ```

pub mod analyzer;
pub mod config;
pub mod event;
pub mod pairing;
pub mod processor;
pub mod selection;

#[cfg(test)]
mod log_capture;

#[cfg(feature = "test-utils")]
pub mod test_data;

pub use analyzer::{JobReport, JobStatistics, ZPeakAnalyzer};
pub use config::{AnalyzerConfig, EtaCut};
pub use event::{Event, EventId};
pub use pairing::{DimuonPair, DimuonPairs};
pub use processor::{EventRecord, EventSummary, MuonEventProcessor};
pub use selection::{MuonSelector, SelectedMuons};

pub use zpeak_core::{Error, Result};
