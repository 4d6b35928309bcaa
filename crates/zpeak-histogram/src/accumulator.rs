//! Concurrent accumulator of named histograms
//!
//! `HistogramAccumulator` is the sink the event analysis fills. Histograms
//! are booked up front under a name; `append` then routes each value to the
//! matching histogram. Appends from several threads are serialized per
//! histogram, so no update is lost. Per-worker accumulators can instead be
//! filled independently and combined afterwards with [`HistogramAccumulator::merge`].

use crate::types::Histogram;
use dashmap::DashMap;
use std::collections::BTreeMap;
use tracing::debug;
use zpeak_core::{Binning, Error, HistogramSink, Metric, Result};

/// A set of booked histograms keyed by metric name
#[derive(Debug, Clone, Default)]
pub struct HistogramAccumulator {
    histograms: DashMap<String, Histogram>,
}

impl HistogramAccumulator {
    /// Create an accumulator with nothing booked
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator with the given metrics booked
    pub fn with_metrics(metrics: &[Metric]) -> Self {
        let accumulator = Self::new();
        for &metric in metrics {
            accumulator.book_metric(metric);
        }
        accumulator
    }

    /// Book a histogram under `name`, replacing any previous booking
    pub fn book(&self, name: &str, title: &str, n_bins: usize, low: f64, high: f64) -> Result<()> {
        let histogram = Histogram::new(name, title, n_bins, low, high)?;
        debug!("Booked histogram {}", histogram);
        self.histograms.insert(name.to_string(), histogram);
        Ok(())
    }

    /// Book a well-known metric with its suggested binning
    pub fn book_metric(&self, metric: Metric) {
        let histogram = crate::book_metric(metric);
        debug!("Booked histogram {}", histogram);
        self.histograms.insert(metric.name().to_string(), histogram);
    }

    /// Whether a histogram is booked under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.histograms.contains_key(name)
    }

    /// Binning of the histogram booked under `name`
    pub fn binning(&self, name: &str) -> Option<Binning> {
        self.histograms.get(name).map(|h| h.binning())
    }

    /// Number of booked histograms
    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }

    /// Booked names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.histograms.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Snapshot of the histogram booked under `name`
    pub fn get(&self, name: &str) -> Option<Histogram> {
        self.histograms.get(name).map(|h| h.value().clone())
    }

    /// Snapshot of a well-known metric's histogram
    pub fn get_metric(&self, metric: Metric) -> Option<Histogram> {
        self.get(metric.name())
    }

    /// Snapshot of every histogram, ordered by name
    pub fn snapshot(&self) -> BTreeMap<String, Histogram> {
        self.histograms
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    /// Add the contents of `other` into this accumulator
    ///
    /// Histograms booked only in `other` are adopted. A histogram booked in
    /// both must have identical binning; on a mismatch nothing further is
    /// merged and an error is returned.
    pub fn merge(&self, other: &HistogramAccumulator) -> Result<()> {
        if std::ptr::eq(self, other) {
            return Err(Error::InvalidInput(
                "cannot merge an accumulator into itself".to_string(),
            ));
        }
        for entry in other.histograms.iter() {
            if let Some(expected) = self.binning(entry.key()) {
                if expected != entry.value().binning() {
                    return Err(Error::BinningMismatch {
                        name: entry.key().clone(),
                        expected: expected.to_string(),
                        actual: entry.value().binning().to_string(),
                    });
                }
            }
        }
        for entry in other.histograms.iter() {
            match self.histograms.get_mut(entry.key()) {
                Some(mut mine) => mine.merge(entry.value())?,
                None => {
                    self.histograms.insert(entry.key().clone(), entry.value().clone());
                }
            }
        }
        Ok(())
    }

    /// Clear every histogram's contents, keeping the bookings
    pub fn reset(&self) {
        for mut entry in self.histograms.iter_mut() {
            entry.value_mut().reset();
        }
    }
}

impl HistogramSink for HistogramAccumulator {
    fn append(&self, metric: &str, value: f64) -> Result<()> {
        let mut histogram = self
            .histograms
            .get_mut(metric)
            .ok_or_else(|| Error::UnknownMetric(metric.to_string()))?;
        histogram.fill(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_routes_by_name() {
        let acc = HistogramAccumulator::with_metrics(&Metric::ALL);
        assert_eq!(acc.len(), 5);

        acc.append("muonPt", 25.0).unwrap();
        acc.append_metric(Metric::MuonPt, 30.0).unwrap();
        acc.append("dimuonMass", 91.2).unwrap();

        let pt = acc.get_metric(Metric::MuonPt).unwrap();
        assert_eq!(pt.entries(), 2);
        assert_eq!(pt.bin_count(25), Some(1));
        assert_eq!(acc.get("dimuonMass").unwrap().entries(), 1);
        assert!(acc.get("nMuon").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_metric() {
        let acc = HistogramAccumulator::new();
        assert!(acc.is_empty());
        assert!(matches!(acc.append("jetPt", 1.0), Err(Error::UnknownMetric(name)) if name == "jetPt"));
    }

    #[test]
    fn test_custom_booking() {
        let acc = HistogramAccumulator::new();
        acc.book("leadPt", "Leading muon p_{T}", 50, 0.0, 100.0).unwrap();
        assert!(acc.contains("leadPt"));
        assert!(acc.book("bad", "", 0, 0.0, 1.0).is_err());
        assert!(!acc.contains("bad"));
        assert_eq!(acc.names(), vec!["leadPt".to_string()]);
    }

    #[test]
    fn test_merge() {
        let total = HistogramAccumulator::with_metrics(&[Metric::NMuon]);
        let worker = HistogramAccumulator::with_metrics(&[Metric::NMuon, Metric::DimuonMass]);
        total.append("nMuon", 2.0).unwrap();
        worker.append("nMuon", 2.0).unwrap();
        worker.append("nMuon", 0.0).unwrap();
        worker.append("dimuonMass", 90.0).unwrap();

        total.merge(&worker).unwrap();
        let n_muon = total.get("nMuon").unwrap();
        assert_eq!(n_muon.counts()[2], 2);
        assert_eq!(n_muon.counts()[0], 1);
        assert_eq!(total.get("dimuonMass").unwrap().entries(), 1);

        assert!(total.merge(&total).is_err());
    }

    #[test]
    fn test_merge_rejects_mismatched_binning_without_partial_update() {
        let total = HistogramAccumulator::with_metrics(&[Metric::MuonPt]);
        total.append("muonPt", 10.0).unwrap();

        let worker = HistogramAccumulator::new();
        worker.book("muonPt", "", 10, 0.0, 100.0).unwrap();
        worker.book("extra", "", 10, 0.0, 100.0).unwrap();

        assert!(matches!(total.merge(&worker), Err(Error::BinningMismatch { .. })));
        assert_eq!(total.get("muonPt").unwrap().entries(), 1);
        assert!(!total.contains("extra"));
    }

    #[test]
    fn test_reset_and_snapshot() {
        let acc = HistogramAccumulator::with_metrics(&Metric::ALL);
        acc.append("muonEta", 0.3).unwrap();
        let snapshot = acc.snapshot();
        assert_eq!(
            snapshot.keys().cloned().collect::<Vec<_>>(),
            vec!["dimuonMass", "muonEta", "muonPhi", "muonPt", "nMuon"]
        );
        acc.reset();
        assert!(acc.get("muonEta").unwrap().is_empty());
        assert_eq!(snapshot["muonEta"].entries(), 1);
        assert_eq!(acc.len(), 5);
    }
}
