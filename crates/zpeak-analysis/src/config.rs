//! Configuration types for the dimuon analysis

use serde::{Deserialize, Serialize};
use zpeak_core::{Error, Result};

/// How the pseudorapidity acceptance cut is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EtaCut {
    /// `eta < threshold` on the signed value
    ///
    /// Matches the historical selection, where the comparison was wrapped in
    /// `fabs` instead of the eta value. Muons at large negative eta pass.
    #[default]
    Signed,

    /// `|eta| < threshold`, a detector-symmetric acceptance
    Absolute,
}

impl EtaCut {
    /// Get the name of this cut mode
    pub fn name(&self) -> &'static str {
        match self {
            Self::Signed => "signed",
            Self::Absolute => "absolute",
        }
    }

    /// Whether `eta` passes against `threshold`
    pub fn accepts(&self, eta: f64, threshold: f64) -> bool {
        match self {
            Self::Signed => eta < threshold,
            Self::Absolute => eta.abs() < threshold,
        }
    }
}

/// Configuration of the Z-peak analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerConfig {
    /// Minimum transverse momentum (GeV), exclusive
    pub pt_threshold: f64,

    /// Pseudorapidity acceptance, exclusive
    pub eta_threshold: f64,

    /// Label of the muon collection resolved from each event
    pub muon_source_label: String,

    pub eta_cut: EtaCut,

    /// Emit a progress line every this many events
    pub report_every: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            pt_threshold: 20.0,
            eta_threshold: 2.1,
            muon_source_label: "slimmedMuons".to_string(),
            eta_cut: EtaCut::default(),
            report_every: 1000,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_pt_threshold(mut self, pt_threshold: f64) -> Self {
        self.pt_threshold = pt_threshold;
        self
    }

    pub fn with_eta_threshold(mut self, eta_threshold: f64) -> Self {
        self.eta_threshold = eta_threshold;
        self
    }

    pub fn with_muon_source_label(mut self, label: impl Into<String>) -> Self {
        self.muon_source_label = label.into();
        self
    }

    pub fn with_eta_cut(mut self, eta_cut: EtaCut) -> Self {
        self.eta_cut = eta_cut;
        self
    }

    pub fn with_report_every(mut self, report_every: u64) -> Self {
        self.report_every = report_every;
        self
    }

    /// Check the configuration before a job starts
    pub fn validate(&self) -> Result<()> {
        if !self.pt_threshold.is_finite() {
            return Err(Error::non_finite("pt threshold"));
        }
        if !self.eta_threshold.is_finite() {
            return Err(Error::non_finite("eta threshold"));
        }
        if self.muon_source_label.trim().is_empty() {
            return Err(Error::InvalidParameter(
                "muon source label must not be empty".to_string(),
            ));
        }
        if self.report_every == 0 {
            return Err(Error::InvalidParameter(
                "report interval must be at least one event".to_string(),
            ));
        }
        Ok(())
    }
}
