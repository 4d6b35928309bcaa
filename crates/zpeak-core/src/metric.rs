//! Named metrics filled by the dimuon analysis and their binning

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed, equal-width binning over `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Binning {
    pub n_bins: usize,
    pub low: f64,
    pub high: f64,
}

impl Binning {
    /// Create a validated binning
    pub fn new(n_bins: usize, low: f64, high: f64) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if !low.is_finite() || !high.is_finite() {
            return Err(Error::non_finite("histogram range"));
        }
        if low >= high {
            return Err(Error::InvalidParameter(format!(
                "histogram range [{low}, {high}) is empty"
            )));
        }
        Ok(Self { n_bins, low, high })
    }

    /// Width of a single bin
    pub fn bin_width(&self) -> f64 {
        (self.high - self.low) / self.n_bins as f64
    }
}

impl fmt::Display for Binning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bins [{}, {})", self.n_bins, self.low, self.high)
    }
}

/// Metrics filled per event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    /// Selected muon multiplicity
    NMuon,
    MuonPt,
    MuonEta,
    MuonPhi,
    /// Invariant mass of each opposite-sign pair
    DimuonMass,
}

impl Metric {
    /// Every metric, in booking order
    pub const ALL: [Metric; 5] = [
        Metric::DimuonMass,
        Metric::NMuon,
        Metric::MuonPt,
        Metric::MuonEta,
        Metric::MuonPhi,
    ];

    /// Name used as the sink key
    pub fn name(&self) -> &'static str {
        match self {
            Self::NMuon => "nMuon",
            Self::MuonPt => "muonPt",
            Self::MuonEta => "muonEta",
            Self::MuonPhi => "muonPhi",
            Self::DimuonMass => "dimuonMass",
        }
    }

    /// Axis title
    pub fn title(&self) -> &'static str {
        match self {
            Self::NMuon => "Number of muons",
            Self::MuonPt => "Muon p_{T}",
            Self::MuonEta => "Muon #eta",
            Self::MuonPhi => "muon Phi",
            Self::DimuonMass => "mass",
        }
    }

    /// Suggested binning
    ///
    /// The multiplicity histogram is offset by half a bin so integers sit at
    /// bin centres.
    pub fn binning(&self) -> Binning {
        let (n_bins, low, high) = match self {
            Self::NMuon => (11, -0.5, 10.5),
            Self::MuonPt => (200, 0.0, 200.0),
            Self::MuonEta => (100, -5.0, 5.0),
            Self::MuonPhi => (100, -3.5, 3.5),
            Self::DimuonMass => (120, 30.0, 150.0),
        };
        Binning { n_bins, low, high }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}
