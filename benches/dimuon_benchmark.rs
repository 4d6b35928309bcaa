use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zpeak::analysis::test_data::ZBosonEventGenerator;
use zpeak::prelude::*;

const LABEL: &str = "slimmedMuons";

fn bench_event_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("MuonEventProcessor");
    let processor = MuonEventProcessor::default();

    // Busy events: a Z decay plus a handful of background muons
    for mean_background in [0.5, 4.0, 16.0] {
        let mut generator = ZBosonEventGenerator::new(42).with_mean_background(mean_background);
        let events: Vec<Vec<MuonCandidate>> = (0..1_000).map(|_| generator.next_muons()).collect();
        let sink = HistogramAccumulator::with_metrics(&Metric::ALL);

        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("process", mean_background),
            &events,
            |b, events| {
                b.iter(|| {
                    for muons in events {
                        processor.process(black_box(muons), &sink).unwrap();
                    }
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("summarize", mean_background),
            &events,
            |b, events| {
                b.iter(|| {
                    for muons in events {
                        black_box(processor.summarize(black_box(muons)));
                    }
                })
            },
        );
    }
    group.finish();
}

fn bench_job(c: &mut Criterion) {
    let mut group = c.benchmark_group("ZPeakAnalyzer");
    let sizes = [1_000, 10_000];

    for &size in &sizes {
        let events = ZBosonEventGenerator::new(7).events(size, LABEL);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &events, |b, events| {
            b.iter(|| {
                let mut analyzer = ZPeakAnalyzer::new(AnalyzerConfig::default()).unwrap();
                analyzer.begin_job().unwrap();
                analyzer.analyze_events(events).unwrap();
                black_box(analyzer.end_job().unwrap())
            })
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), &events, |b, events| {
            b.iter(|| {
                let mut analyzer = ZPeakAnalyzer::new(AnalyzerConfig::default()).unwrap();
                analyzer.begin_job().unwrap();
                analyzer.analyze_batch(events).unwrap();
                black_box(analyzer.end_job().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_event_processing, bench_job);
criterion_main!(benches);
