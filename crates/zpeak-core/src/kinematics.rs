//! Relativistic four-momentum arithmetic
//!
//! Natural units (c = 1), energies and momenta in GeV. Collider coordinates:
//! z along the beam, `phi` the azimuth in the transverse plane and `eta` the
//! pseudorapidity.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Four-momentum p^μ = (E, p_x, p_y, p_z)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourMomentum {
    /// Energy component
    pub e: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
}

impl FourMomentum {
    /// Create a four-momentum from Cartesian components
    pub fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self { e, px, py, pz }
    }

    /// Create a four-momentum from collider coordinates (pt, eta, phi, m)
    ///
    /// `E = sqrt(|p|² + m²)`; a negative mass is treated as its magnitude.
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let e = (px * px + py * py + pz * pz + mass * mass).sqrt();
        Self { e, px, py, pz }
    }

    /// Transverse momentum: p_T = √(p_x² + p_y²)
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// 3-momentum magnitude
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Pseudorapidity η = asinh(p_z / p_T)
    ///
    /// Along the beam axis (p_T = 0) this is ±∞, or 0 for a null momentum.
    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt > 0.0 {
            (self.pz / pt).asinh()
        } else if self.pz == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(self.pz)
        }
    }

    /// Azimuthal angle φ = atan2(p_y, p_x), in (-π, π]
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Invariant mass squared: m² = E² - |p|²
    pub fn mass_squared(&self) -> f64 {
        self.e * self.e - self.px * self.px - self.py * self.py - self.pz * self.pz
    }

    /// Invariant mass with a negative radicand clamped to zero
    pub fn mass(&self) -> f64 {
        self.mass_squared().max(0.0).sqrt()
    }

    /// Invariant mass, failing on a negative radicand
    ///
    /// A NaN radicand is returned as NaN rather than an error.
    pub fn checked_mass(&self) -> Result<f64> {
        let mass_squared = self.mass_squared();
        if mass_squared < 0.0 {
            return Err(Error::NumericDomain { mass_squared });
        }
        Ok(mass_squared.sqrt())
    }

    /// Minkowski inner product: p · q = E₁E₂ - p⃗₁·p⃗₂
    pub fn dot(&self, other: &Self) -> f64 {
        self.e * other.e - self.px * other.px - self.py * other.py - self.pz * other.pz
    }
}

impl Add for FourMomentum {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            e: self.e + other.e,
            px: self.px + other.px,
            py: self.py + other.py,
            pz: self.pz + other.pz,
        }
    }
}

impl AddAssign for FourMomentum {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for FourMomentum {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
