//! Error types for dimuon event analysis
//!
//! Provides a unified error type for all zpeak crates.

use thiserror::Error;

/// Core error type for event analysis operations
#[derive(Error, Debug)]
pub enum Error {
    /// The upstream provider has no muon collection under the requested label
    #[error("Missing input: no muon collection labelled '{label}'")]
    MissingInput { label: String },

    /// Negative invariant mass squared (E² < |p|²)
    #[error("Numeric domain error: invariant mass squared is negative ({mass_squared})")]
    NumericDomain { mass_squared: f64 },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Fill requested for a histogram that was never booked
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Two histograms with different binning cannot be combined
    #[error("Binning mismatch for '{name}': {expected} vs {actual}")]
    BinningMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// Threading or locking error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an absent input collection
    pub fn missing_input(label: impl Into<String>) -> Self {
        Self::MissingInput {
            label: label.into(),
        }
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidParameter(format!("{context} must be finite"))
    }

    /// Whether the error aborts only the current event
    pub fn is_event_local(&self) -> bool {
        matches!(self, Self::MissingInput { .. } | Self::NumericDomain { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::missing_input("slimmedMuons");
        assert_eq!(
            err.to_string(),
            "Missing input: no muon collection labelled 'slimmedMuons'"
        );

        let err = Error::NumericDomain { mass_squared: -0.5 };
        assert_eq!(
            err.to_string(),
            "Numeric domain error: invariant mass squared is negative (-0.5)"
        );

        let err = Error::UnknownMetric("jetPt".to_string());
        assert_eq!(err.to_string(), "Unknown metric: jetPt");

        let err = Error::BinningMismatch {
            name: "muonPt".to_string(),
            expected: "200 bins [0, 200)".to_string(),
            actual: "100 bins [0, 200)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Binning mismatch for 'muonPt': 200 bins [0, 200) vs 100 bins [0, 200)"
        );

        let err = Error::non_finite("pt threshold");
        assert_eq!(err.to_string(), "Invalid parameter: pt threshold must be finite");
    }

    #[test]
    fn test_event_local_errors() {
        assert!(Error::missing_input("muons").is_event_local());
        assert!(Error::NumericDomain { mass_squared: -1.0 }.is_event_local());
        assert!(!Error::UnknownMetric("x".to_string()).is_event_local());
        assert!(!Error::Execution("poisoned".to_string()).is_event_local());
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }
}
