//! Seams between the event analysis and its collaborators

use crate::error::Result;
use crate::metric::Metric;
use crate::muon::MuonCandidate;

/// Destination for per-event observations
///
/// Implementations must tolerate concurrent `append` calls from several
/// workers without losing updates.
pub trait HistogramSink: Send + Sync {
    /// Record one value under the named metric
    fn append(&self, metric: &str, value: f64) -> Result<()>;

    /// Record one value for a well-known metric
    fn append_metric(&self, metric: Metric, value: f64) -> Result<()> {
        self.append(metric.name(), value)
    }
}

impl<S: HistogramSink + ?Sized> HistogramSink for &S {
    fn append(&self, metric: &str, value: f64) -> Result<()> {
        (**self).append(metric, value)
    }
}

impl<S: HistogramSink + ?Sized> HistogramSink for std::sync::Arc<S> {
    fn append(&self, metric: &str, value: f64) -> Result<()> {
        (**self).append(metric, value)
    }
}

/// Upstream provider of muon collections for one event
pub trait MuonSource {
    /// Resolve the collection stored under `label`
    ///
    /// Returns `Error::MissingInput` when no such collection exists; an empty
    /// collection is a valid answer and is never substituted for a missing one.
    fn muons(&self, label: &str) -> Result<&[MuonCandidate]>;
}

/// A sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl HistogramSink for NullSink {
    fn append(&self, _metric: &str, _value: f64) -> Result<()> {
        Ok(())
    }
}
