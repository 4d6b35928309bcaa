//! Job lifecycle for the Z-peak analysis
//!
//! The host calls [`ZPeakAnalyzer::begin_job`] once, [`ZPeakAnalyzer::analyze`]
//! for every event, and [`ZPeakAnalyzer::end_job`] to collect the filled
//! histograms. `analyze` takes `&self`, so events may be analyzed from
//! several threads at once; the accumulator serializes the fills.

use crate::config::AnalyzerConfig;
use crate::processor::{EventSummary, MuonEventProcessor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, instrument, warn};
use zpeak_core::{Error, HistogramSink, Metric, MuonSource, Result};
use zpeak_histogram::{Histogram, HistogramAccumulator, HistogramOps};

/// Totals over the events of a job or batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatistics {
    /// Events handed to the analyzer, failed ones included
    pub events_processed: u64,
    pub events_failed: u64,
    pub muons_selected: u64,
    pub dimuon_pairs: u64,
}

impl JobStatistics {
    fn record(&mut self, summary: &EventSummary) {
        self.events_processed += 1;
        self.muons_selected += summary.n_selected as u64;
        self.dimuon_pairs += summary.n_pairs as u64;
    }

    fn record_failure(&mut self) {
        self.events_processed += 1;
        self.events_failed += 1;
    }

    #[cfg(feature = "parallel")]
    fn merge(&mut self, other: &JobStatistics) {
        self.events_processed += other.events_processed;
        self.events_failed += other.events_failed;
        self.muons_selected += other.muons_selected;
        self.dimuon_pairs += other.dimuon_pairs;
    }
}

#[derive(Debug, Default)]
struct JobCounters {
    events: AtomicU64,
    failed: AtomicU64,
    selected_muons: AtomicU64,
    dimuon_pairs: AtomicU64,
}

impl JobCounters {
    /// Add a batch's totals, returning the event count before it
    #[cfg(feature = "parallel")]
    fn add(&self, stats: &JobStatistics) -> u64 {
        let before = self.events.fetch_add(stats.events_processed, Ordering::Relaxed);
        self.failed.fetch_add(stats.events_failed, Ordering::Relaxed);
        self.selected_muons.fetch_add(stats.muons_selected, Ordering::Relaxed);
        self.dimuon_pairs.fetch_add(stats.dimuon_pairs, Ordering::Relaxed);
        before
    }

    fn snapshot(&self) -> JobStatistics {
        JobStatistics {
            events_processed: self.events.load(Ordering::Relaxed),
            events_failed: self.failed.load(Ordering::Relaxed),
            muons_selected: self.selected_muons.load(Ordering::Relaxed),
            dimuon_pairs: self.dimuon_pairs.load(Ordering::Relaxed),
        }
    }
}

/// What a finished job hands back to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub statistics: JobStatistics,
    pub histograms: BTreeMap<String, Histogram>,
}

impl JobReport {
    pub fn histogram(&self, metric: Metric) -> Option<&Histogram> {
        self.histograms.get(metric.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobState {
    Idle,
    Running,
}

/// Dimuon analysis driven explicitly by the host application
#[derive(Debug)]
pub struct ZPeakAnalyzer {
    config: AnalyzerConfig,
    processor: MuonEventProcessor,
    histograms: HistogramAccumulator,
    counters: JobCounters,
    state: JobState,
}

impl ZPeakAnalyzer {
    /// Create an analyzer from a validated configuration
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            processor: MuonEventProcessor::from_config(&config),
            config,
            histograms: HistogramAccumulator::new(),
            counters: JobCounters::default(),
            state: JobState::Idle,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn processor(&self) -> &MuonEventProcessor {
        &self.processor
    }

    /// The job's accumulated histograms
    pub fn histograms(&self) -> &HistogramAccumulator {
        &self.histograms
    }

    /// Totals so far in the current (or last) job
    pub fn statistics(&self) -> JobStatistics {
        self.counters.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.state == JobState::Running
    }

    /// Book the histograms and reset the counters
    #[instrument(skip(self), fields(label = %self.config.muon_source_label, eta_cut = self.config.eta_cut.name()))]
    pub fn begin_job(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(Error::Execution(
                "begin_job called while a job is already running".to_string(),
            ));
        }
        self.histograms = HistogramAccumulator::with_metrics(&Metric::ALL);
        self.counters = JobCounters::default();
        self.state = JobState::Running;
        info!(
            pt_threshold = self.config.pt_threshold,
            eta_threshold = self.config.eta_threshold,
            "booked {} histograms",
            self.histograms.len()
        );
        Ok(())
    }

    /// Analyze one event
    ///
    /// A missing muon collection aborts this event only: it is counted as
    /// failed, nothing is filled, and the error is returned to the caller.
    pub fn analyze<S: MuonSource + ?Sized>(&self, source: &S) -> Result<EventSummary> {
        self.ensure_running()?;
        let n = self.counters.events.fetch_add(1, Ordering::Relaxed) + 1;
        self.report_progress(n - 1, n);

        match self.analyze_into(source, &self.histograms) {
            Ok(summary) => {
                self.counters.selected_muons.fetch_add(summary.n_selected as u64, Ordering::Relaxed);
                self.counters.dimuon_pairs.fetch_add(summary.n_pairs as u64, Ordering::Relaxed);
                Ok(summary)
            }
            Err(err) => {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(record = n, %err, "event aborted");
                Err(err)
            }
        }
    }

    /// Analyze a sequence of events, skipping those with missing input
    ///
    /// Any other error stops the sequence and is returned.
    pub fn analyze_events<'a, S, I>(&self, events: I) -> Result<JobStatistics>
    where
        S: MuonSource + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        let mut stats = JobStatistics::default();
        for event in events {
            match self.analyze(event) {
                Ok(summary) => stats.record(&summary),
                Err(err) if err.is_event_local() => stats.record_failure(),
                Err(err) => return Err(err),
            }
        }
        Ok(stats)
    }

    /// Analyze a slice of events on the rayon thread pool
    ///
    /// Each worker fills its own accumulator; the partial results are merged
    /// into the job only once the whole batch succeeded.
    #[cfg(feature = "parallel")]
    #[instrument(skip(self, events), fields(n_events = events.len()))]
    pub fn analyze_batch<S: MuonSource + Sync>(&self, events: &[S]) -> Result<JobStatistics> {
        use rayon::prelude::*;

        self.ensure_running()?;
        let (partial, stats) = events
            .par_iter()
            .try_fold(
                || (HistogramAccumulator::with_metrics(&Metric::ALL), JobStatistics::default()),
                |(sink, mut stats), event| {
                    match self.analyze_into(event, &sink) {
                        Ok(summary) => stats.record(&summary),
                        Err(err) if err.is_event_local() => {
                            warn!(%err, "event aborted");
                            stats.record_failure();
                        }
                        Err(err) => return Err(err),
                    }
                    Ok((sink, stats))
                },
            )
            .try_reduce(
                || (HistogramAccumulator::new(), JobStatistics::default()),
                |(sink, mut stats), (other_sink, other_stats)| {
                    sink.merge(&other_sink)?;
                    stats.merge(&other_stats);
                    Ok((sink, stats))
                },
            )?;

        self.histograms.merge(&partial)?;
        let before = self.counters.add(&stats);
        self.report_progress(before, before + stats.events_processed);
        info!(
            events = stats.events_processed,
            failed = stats.events_failed,
            total = self.counters.events.load(Ordering::Relaxed),
            "batch merged"
        );
        Ok(stats)
    }

    /// Finish the job and hand back the histograms
    #[instrument(skip(self))]
    pub fn end_job(&mut self) -> Result<JobReport> {
        self.ensure_running()?;
        self.state = JobState::Idle;

        let statistics = self.counters.snapshot();
        info!(
            events = statistics.events_processed,
            failed = statistics.events_failed,
            muons = statistics.muons_selected,
            pairs = statistics.dimuon_pairs,
            "job finished"
        );
        if let Some(peak) = self
            .histograms
            .get_metric(Metric::DimuonMass)
            .and_then(|mass| mass.peak_position())
        {
            info!(peak, "dimuon mass peak");
        }

        Ok(JobReport {
            statistics,
            histograms: self.histograms.snapshot(),
        })
    }

    /// Log the last `report_every` multiple passed when the event count
    /// moved from `before` to `after`
    fn report_progress(&self, before: u64, after: u64) {
        if let Some(record) = progress_mark(before, after, self.config.report_every) {
            info!(record, "Begin processing record {record}");
        }
    }

    fn ensure_running(&self) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(Error::Execution(
                "analyzer used outside begin_job/end_job".to_string(),
            ))
        }
    }

    fn analyze_into<S: MuonSource + ?Sized>(
        &self,
        source: &S,
        sink: &dyn HistogramSink,
    ) -> Result<EventSummary> {
        let muons = source.muons(&self.config.muon_source_label)?;
        self.processor.process(muons, sink)
    }
}

/// Largest multiple of `every` in `(before, after]`
fn progress_mark(before: u64, after: u64, every: u64) -> Option<u64> {
    let mark = after - after % every;
    (mark > before).then_some(mark)
}
