//! Opposite-sign dimuon combinations

use tracing::warn;
use zpeak_core::{FourMomentum, MuonCandidate};

/// Two distinct selected muons with opposite charge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimuonPair<'a> {
    pub first: &'a MuonCandidate,
    pub second: &'a MuonCandidate,
}

impl<'a> DimuonPair<'a> {
    /// Summed four-momentum
    pub fn p4(&self) -> FourMomentum {
        self.first.p4() + self.second.p4()
    }

    /// Invariant mass of the pair
    ///
    /// A negative mass squared from rounding is clamped to zero and reported
    /// as a warning. A non-finite mass (overflowing kinematics) is passed
    /// through and also reported.
    pub fn mass(&self) -> f64 {
        match self.p4().checked_mass() {
            Ok(mass) if mass.is_finite() => mass,
            Ok(mass) => {
                warn!(mass, first = ?self.first, second = ?self.second, "non-finite dimuon mass");
                mass
            }
            Err(err) => {
                warn!(%err, first = ?self.first, second = ?self.second, "clamping dimuon mass to zero");
                0.0
            }
        }
    }
}

/// Iterator over opposite-sign pairs `(i, j)`, `i < j`, `i` then `j` ascending
#[derive(Debug, Clone)]
pub struct DimuonPairs<'a> {
    muons: &'a [MuonCandidate],
    i: usize,
    j: usize,
}

impl<'a> DimuonPairs<'a> {
    pub fn new(muons: &'a [MuonCandidate]) -> Self {
        Self { muons, i: 0, j: 1 }
    }
}

impl<'a> Iterator for DimuonPairs<'a> {
    type Item = DimuonPair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.muons.len();
        while self.i + 1 < n {
            if self.j >= n {
                self.i += 1;
                self.j = self.i + 1;
                continue;
            }
            let first = &self.muons[self.i];
            let second = &self.muons[self.j];
            self.j += 1;
            if first.is_opposite_sign(second) {
                return Some(DimuonPair { first, second });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.muons.len();
        if self.i + 1 >= n {
            return (0, Some(0));
        }
        // Remaining (i, j) combinations bound the pairs still to come
        let rest_of_row = n.saturating_sub(self.j);
        let later_rows = (n - self.i - 1) * (n - self.i - 2) / 2;
        (0, Some(rest_of_row + later_rows))
    }
}
