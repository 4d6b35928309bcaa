//! Per-event muon processing
//!
//! [`MuonEventProcessor`] turns one event's raw muon list into the values the
//! analysis histograms: the selected multiplicity, one kinematic record per
//! selected muon, and the invariant mass of every opposite-sign pair. It
//! holds no state between events; the histogram sink is passed in per call.

use crate::config::AnalyzerConfig;
use crate::pairing::{DimuonPair, DimuonPairs};
use crate::selection::{MuonSelector, SelectedMuons};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zpeak_core::{HistogramSink, Metric, MuonCandidate, MuonKinematics, Result};

/// Stateless selection and pairing of one event's muons
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MuonEventProcessor {
    selector: MuonSelector,
}

impl MuonEventProcessor {
    pub fn new(selector: MuonSelector) -> Self {
        Self { selector }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(MuonSelector::from_config(config))
    }

    pub fn selector(&self) -> &MuonSelector {
        &self.selector
    }

    /// Candidates passing the pt and eta cuts, in input order
    pub fn select(&self, muons: &[MuonCandidate]) -> SelectedMuons {
        self.selector.select(muons)
    }

    /// Number of selected muons, the value filled into `nMuon`
    pub fn count_selected(&self, selection: &SelectedMuons) -> usize {
        selection.len()
    }

    /// One `{pt, eta, phi}` record per selected muon
    pub fn kinematics<'a>(
        &self,
        selection: &'a SelectedMuons,
    ) -> impl Iterator<Item = MuonKinematics> + 'a {
        selection.iter().map(MuonCandidate::kinematics)
    }

    /// Opposite-sign pairs among the selected muons
    pub fn dimuon_pairs<'a>(&self, selection: &'a SelectedMuons) -> DimuonPairs<'a> {
        DimuonPairs::new(selection.as_slice())
    }

    /// Invariant mass of every opposite-sign pair
    pub fn dimuon_masses<'a>(&self, selection: &'a SelectedMuons) -> impl Iterator<Item = f64> + 'a {
        self.dimuon_pairs(selection).map(|pair: DimuonPair<'a>| pair.mass())
    }

    /// Everything one event contributes, computed before any sink is touched
    pub fn summarize(&self, muons: &[MuonCandidate]) -> EventRecord {
        let selection = self.select(muons);
        EventRecord {
            n_input: muons.len(),
            n_muon: self.count_selected(&selection),
            kinematics: self.kinematics(&selection).collect(),
            masses: self.dimuon_masses(&selection).collect(),
        }
    }

    /// Summarize one event and fill the result into `sink`
    pub fn process(&self, muons: &[MuonCandidate], sink: &dyn HistogramSink) -> Result<EventSummary> {
        let record = self.summarize(muons);
        record.fill(sink)?;
        debug!(
            n_input = record.n_input,
            n_selected = record.n_muon,
            n_pairs = record.masses.len(),
            "processed event"
        );
        Ok(record.summary())
    }
}

/// All histogram values produced by one event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Candidates before selection
    pub n_input: usize,
    pub n_muon: usize,
    pub kinematics: Vec<MuonKinematics>,
    pub masses: Vec<f64>,
}

impl EventRecord {
    /// Push every value into the sink
    ///
    /// `nMuon` once, `muonPt`/`muonEta`/`muonPhi` per muon, `dimuonMass` per pair.
    pub fn fill(&self, sink: &dyn HistogramSink) -> Result<()> {
        sink.append_metric(Metric::NMuon, self.n_muon as f64)?;
        for k in &self.kinematics {
            sink.append_metric(Metric::MuonPt, k.pt)?;
            sink.append_metric(Metric::MuonEta, k.eta)?;
            sink.append_metric(Metric::MuonPhi, k.phi)?;
        }
        for &mass in &self.masses {
            sink.append_metric(Metric::DimuonMass, mass)?;
        }
        Ok(())
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            n_input: self.n_input,
            n_selected: self.n_muon,
            n_pairs: self.masses.len(),
        }
    }
}

/// Counts describing one processed event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub n_input: usize,
    pub n_selected: usize,
    pub n_pairs: usize,
}
