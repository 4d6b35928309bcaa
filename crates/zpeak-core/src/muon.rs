//! Reconstructed muon candidates

use crate::error::{Error, Result};
use crate::kinematics::FourMomentum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Muon rest mass in GeV
pub const MUON_MASS: f64 = 0.105_658_375_5;

/// Electric charge of a muon candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Charge {
    /// μ⁻
    Negative,
    /// μ⁺
    Positive,
}

impl Charge {
    /// Charge in units of e
    pub fn value(self) -> i32 {
        match self {
            Self::Negative => -1,
            Self::Positive => 1,
        }
    }

    /// The opposite charge
    pub fn flipped(self) -> Self {
        match self {
            Self::Negative => Self::Positive,
            Self::Positive => Self::Negative,
        }
    }
}

impl TryFrom<i32> for Charge {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            -1 => Ok(Self::Negative),
            1 => Ok(Self::Positive),
            other => Err(Error::InvalidInput(format!(
                "muon charge must be -1 or +1, got {other}"
            ))),
        }
    }
}

impl From<Charge> for i32 {
    fn from(charge: Charge) -> Self {
        charge.value()
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => write!(f, "-"),
            Self::Positive => write!(f, "+"),
        }
    }
}

/// A reconstructed muon hypothesis for one event
///
/// Immutable once produced upstream; the analysis only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuonCandidate {
    /// Transverse momentum (GeV)
    pub pt: f64,
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuthal angle (radians)
    pub phi: f64,
    /// Mass (GeV)
    pub mass: f64,
    pub charge: Charge,
}

impl MuonCandidate {
    /// Create a candidate from collider coordinates
    pub fn new(pt: f64, eta: f64, phi: f64, mass: f64, charge: Charge) -> Self {
        Self {
            pt,
            eta,
            phi,
            mass,
            charge,
        }
    }

    /// Create a candidate with the PDG muon mass
    pub fn with_muon_mass(pt: f64, eta: f64, phi: f64, charge: Charge) -> Self {
        Self::new(pt, eta, phi, MUON_MASS, charge)
    }

    /// Create a candidate from an integer charge as stored upstream
    pub fn from_raw(pt: f64, eta: f64, phi: f64, mass: f64, charge: i32) -> Result<Self> {
        Ok(Self::new(pt, eta, phi, mass, Charge::try_from(charge)?))
    }

    /// Create a candidate from a Cartesian four-momentum
    pub fn from_p4(p4: FourMomentum, charge: Charge) -> Self {
        Self::new(p4.pt(), p4.eta(), p4.phi(), p4.mass(), charge)
    }

    /// Cartesian four-momentum of this candidate
    pub fn p4(&self) -> FourMomentum {
        FourMomentum::from_pt_eta_phi_m(self.pt, self.eta, self.phi, self.mass)
    }

    /// Whether the two candidates carry opposite charge
    pub fn is_opposite_sign(&self, other: &Self) -> bool {
        self.charge != other.charge
    }

    /// The `{pt, eta, phi}` record filled into the single-muon histograms
    pub fn kinematics(&self) -> MuonKinematics {
        MuonKinematics {
            pt: self.pt,
            eta: self.eta,
            phi: self.phi,
        }
    }
}

/// Per-muon kinematic observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuonKinematics {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_charge_conversions() {
        assert_eq!(Charge::try_from(-1).unwrap(), Charge::Negative);
        assert_eq!(Charge::try_from(1).unwrap(), Charge::Positive);
        assert!(matches!(Charge::try_from(0), Err(Error::InvalidInput(_))));
        assert!(matches!(Charge::try_from(2), Err(Error::InvalidInput(_))));
        assert_eq!(i32::from(Charge::Negative), -1);
        assert_eq!(Charge::Positive.flipped(), Charge::Negative);
        assert_eq!(Charge::Negative.to_string(), "-");
    }

    #[test]
    fn test_from_raw_rejects_bad_charge() {
        assert!(MuonCandidate::from_raw(25.0, 0.1, 0.0, MUON_MASS, 1).is_ok());
        assert!(MuonCandidate::from_raw(25.0, 0.1, 0.0, MUON_MASS, 0).is_err());
    }

    #[test]
    fn test_p4_matches_coordinates() {
        let mu = MuonCandidate::with_muon_mass(40.0, -1.3, 2.9, Charge::Negative);
        let p4 = mu.p4();
        assert_relative_eq!(p4.pt(), 40.0, epsilon = 1e-10);
        assert_relative_eq!(p4.eta(), -1.3, epsilon = 1e-10);
        assert_relative_eq!(p4.phi(), 2.9, epsilon = 1e-10);

        let back = MuonCandidate::from_p4(p4, Charge::Negative);
        assert_relative_eq!(back.pt, mu.pt, epsilon = 1e-10);
        assert_relative_eq!(back.mass, MUON_MASS, epsilon = 1e-6);
    }

    #[test]
    fn test_opposite_sign() {
        let plus = MuonCandidate::with_muon_mass(25.0, 0.5, 0.0, Charge::Positive);
        let minus = MuonCandidate::with_muon_mass(30.0, -0.3, 3.0, Charge::Negative);
        assert!(plus.is_opposite_sign(&minus));
        assert!(!plus.is_opposite_sign(&plus));
    }
}
