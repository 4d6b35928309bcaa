//! Core types for dimuon event analysis
//!
//! This crate provides the vocabulary shared by the zpeak crates: relativistic
//! four-momenta, reconstructed muon candidates, the metrics an analysis fills,
//! and the traits at the boundary with the host framework.
//!
//! # Example
//!
//! ```rust
//! use zpeak_core::{Charge, MuonCandidate};
//!
//! let mu_plus = MuonCandidate::with_muon_mass(45.0, 0.0, 0.0, Charge::Positive);
//! let mu_minus = MuonCandidate::with_muon_mass(45.0, 0.0, std::f64::consts::PI, Charge::Negative);
//!
//! let mass = (mu_plus.p4() + mu_minus.p4()).mass();
//! assert!((mass - 90.0).abs() < 1e-3);
//! ```

pub mod error;
pub mod kinematics;
pub mod metric;
pub mod muon;
pub mod traits;

pub use error::{Error, Result};
pub use kinematics::FourMomentum;
pub use metric::{Binning, Metric};
pub use muon::{Charge, MuonCandidate, MuonKinematics, MUON_MASS};
pub use traits::{HistogramSink, MuonSource, NullSink};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
