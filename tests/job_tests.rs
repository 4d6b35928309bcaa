//! End-to-end analysis jobs over generated Z→μμ events

use approx::assert_abs_diff_eq;
use zpeak::analysis::test_data::{ZBosonEventGenerator, Z_MASS};
use zpeak::prelude::*;

const LABEL: &str = "slimmedMuons";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_full_job_finds_z_peak() -> anyhow::Result<()> {
    init_tracing();
    let events = ZBosonEventGenerator::new(2024).events(2_000, LABEL);

    let mut analyzer = ZPeakAnalyzer::new(AnalyzerConfig::default().with_report_every(500))?;
    analyzer.begin_job()?;
    let stats = analyzer.analyze_events(&events)?;
    let report = analyzer.end_job()?;

    assert_eq!(stats, report.statistics);
    assert_eq!(report.statistics.events_processed, 2_000);
    assert_eq!(report.statistics.events_failed, 0);

    let n_muon = report.histogram(Metric::NMuon).unwrap();
    let pt = report.histogram(Metric::MuonPt).unwrap();
    let eta = report.histogram(Metric::MuonEta).unwrap();
    let phi = report.histogram(Metric::MuonPhi).unwrap();
    let mass = report.histogram(Metric::DimuonMass).unwrap();

    // One multiplicity entry per event, one kinematic entry per selected muon
    assert_eq!(n_muon.entries(), 2_000);
    assert_eq!(pt.entries(), report.statistics.muons_selected);
    assert_eq!(eta.entries(), report.statistics.muons_selected);
    assert_eq!(phi.entries(), report.statistics.muons_selected);
    assert_eq!(mass.entries(), report.statistics.dimuon_pairs);
    assert!(report.statistics.dimuon_pairs > 500);

    let peak = mass.peak_position().unwrap();
    assert_abs_diff_eq!(peak, Z_MASS, epsilon = 3.0);
    Ok(())
}

#[test]
fn test_missing_collection_is_counted_not_fatal() -> anyhow::Result<()> {
    init_tracing();
    let mut events = ZBosonEventGenerator::new(5).events(10, LABEL);
    events.push(Event::new(EventId::new(1, 1, 11)).with_muons("otherMuons", Vec::new()));

    let mut analyzer = ZPeakAnalyzer::new(AnalyzerConfig::default())?;
    analyzer.begin_job()?;
    let stats = analyzer.analyze_events(&events)?;
    assert_eq!(stats.events_processed, 11);
    assert_eq!(stats.events_failed, 1);

    let report = analyzer.end_job()?;
    assert_eq!(report.statistics.events_failed, 1);
    assert_eq!(report.histogram(Metric::NMuon).unwrap().entries(), 10);
    Ok(())
}

#[test]
fn test_report_serializes_histograms_by_name() -> anyhow::Result<()> {
    let events = ZBosonEventGenerator::new(9).events(50, LABEL);
    let mut analyzer = ZPeakAnalyzer::new(AnalyzerConfig::default())?;
    analyzer.begin_job()?;
    analyzer.analyze_events(&events)?;
    let report = analyzer.end_job()?;

    let names: Vec<&str> = report.histograms.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["dimuonMass", "muonEta", "muonPhi", "muonPt", "nMuon"]);
    for metric in Metric::ALL {
        let histogram = report.histogram(metric).unwrap();
        assert_eq!(histogram.title(), metric.title());
        assert_eq!(histogram.binning(), metric.binning());
    }
    Ok(())
}

#[test]
fn test_second_job_starts_from_empty_histograms() -> anyhow::Result<()> {
    let mut generator = ZBosonEventGenerator::new(11);
    let mut analyzer = ZPeakAnalyzer::new(AnalyzerConfig::default())?;

    analyzer.begin_job()?;
    analyzer.analyze_events(&generator.events(30, LABEL))?;
    let first = analyzer.end_job()?;

    analyzer.begin_job()?;
    analyzer.analyze_events(&generator.events(5, LABEL))?;
    let second = analyzer.end_job()?;

    assert_eq!(first.statistics.events_processed, 30);
    assert_eq!(second.statistics.events_processed, 5);
    assert_eq!(second.histogram(Metric::NMuon).unwrap().entries(), 5);
    Ok(())
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_batch_matches_sequential() -> anyhow::Result<()> {
    init_tracing();
    let events = ZBosonEventGenerator::new(77).events(1_000, LABEL);

    let mut sequential = ZPeakAnalyzer::new(AnalyzerConfig::default())?;
    sequential.begin_job()?;
    sequential.analyze_events(&events)?;
    let expected = sequential.end_job()?;

    let mut parallel = ZPeakAnalyzer::new(AnalyzerConfig::default())?;
    parallel.begin_job()?;
    parallel.analyze_batch(&events)?;
    let actual = parallel.end_job()?;

    assert_eq!(actual.statistics, expected.statistics);
    for metric in Metric::ALL {
        let a = actual.histogram(metric).unwrap();
        let e = expected.histogram(metric).unwrap();
        assert_eq!(a.counts(), e.counts(), "{metric}");
        assert_eq!(a.underflow(), e.underflow());
        assert_eq!(a.overflow(), e.overflow());
    }
    Ok(())
}

#[test]
fn test_workspace_modules_are_reachable() {
    use zpeak::histogram::FixedWidthBuilder;
    use zpeak::types::{Binning, FourMomentum};

    let binning = Binning::new(120, 30.0, 150.0).unwrap();
    assert_eq!(binning, Metric::DimuonMass.binning());

    let mut mass = zpeak::histogram::HistogramBuilder::book(
        &FixedWidthBuilder::for_metric(Metric::DimuonMass),
        "dimuonMass",
        "mass",
    )
    .unwrap();
    let z = FourMomentum::new(Z_MASS, 0.0, 0.0, 0.0);
    mass.fill(z.mass());
    assert_eq!(mass.bin_count(61), Some(1));
}
