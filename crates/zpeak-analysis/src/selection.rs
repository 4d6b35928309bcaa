//! Muon quality selection

use crate::config::{AnalyzerConfig, EtaCut};
use zpeak_core::MuonCandidate;

/// Kinematic selection applied to every muon candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuonSelector {
    pt_threshold: f64,
    eta_threshold: f64,
    eta_cut: EtaCut,
}

impl Default for MuonSelector {
    fn default() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }
}

impl MuonSelector {
    pub fn new(pt_threshold: f64, eta_threshold: f64, eta_cut: EtaCut) -> Self {
        Self {
            pt_threshold,
            eta_threshold,
            eta_cut,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.pt_threshold, config.eta_threshold, config.eta_cut)
    }

    pub fn pt_threshold(&self) -> f64 {
        self.pt_threshold
    }

    pub fn eta_threshold(&self) -> f64 {
        self.eta_threshold
    }

    pub fn eta_cut(&self) -> EtaCut {
        self.eta_cut
    }

    /// `pt > pt_threshold` and the eta predicate
    pub fn passes(&self, muon: &MuonCandidate) -> bool {
        muon.pt > self.pt_threshold && self.eta_cut.accepts(muon.eta, self.eta_threshold)
    }

    /// Keep the passing candidates, preserving input order
    pub fn select(&self, muons: &[MuonCandidate]) -> SelectedMuons {
        SelectedMuons {
            muons: muons.iter().filter(|m| self.passes(m)).copied().collect(),
        }
    }
}

/// The candidates of one event that passed selection, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedMuons {
    muons: Vec<MuonCandidate>,
}

impl SelectedMuons {
    pub fn len(&self) -> usize {
        self.muons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.muons.is_empty()
    }

    pub fn as_slice(&self) -> &[MuonCandidate] {
        &self.muons
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MuonCandidate> {
        self.muons.iter()
    }

    pub fn into_vec(self) -> Vec<MuonCandidate> {
        self.muons
    }
}

impl<'a> IntoIterator for &'a SelectedMuons {
    type Item = &'a MuonCandidate;
    type IntoIter = std::slice::Iter<'a, MuonCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.muons.iter()
    }
}
