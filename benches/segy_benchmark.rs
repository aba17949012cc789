// benches/segy_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use segy_rs::processing::{apply_agc, AgcSettings, WindowCache, WindowRequest};
use segy_rs::*;

fn build_file(traces: usize, samples: usize, format: SampleFormat) -> SegyFile {
    let mut binary = BinaryHeader::default();
    binary.sample_interval = 2000;
    binary.samples_per_trace = samples as i16;
    binary.set_sample_format(format);

    let mut dataset = SegyDataset::with_capacity(samples, traces).unwrap();
    for t in 0..traces {
        let trace: Vec<f32> = (0..samples).map(|s| ((s + t) as f32 * 0.05).sin() * 500.0).collect();
        dataset.push_trace(TraceHeader::default(), &trace).unwrap();
    }
    SegyFile::new(TextHeader::default(), binary, dataset).unwrap()
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for format in [SampleFormat::IeeeFloat, SampleFormat::IbmFloat, SampleFormat::Int16] {
        let bytes = SegyWriter::to_bytes(&build_file(1000, 1500, format)).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format.name()), &bytes, |b, bytes| {
            b.iter(|| SegyReader::parse(black_box(bytes)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    let file = build_file(1000, 1500, SampleFormat::IbmFloat);
    group.throughput(Throughput::Elements(file.dataset.samples().len() as u64));
    group.bench_function("ibm", |b| {
        b.iter(|| SegyWriter::to_bytes(black_box(&file)).unwrap());
    });
    group.finish();
}

fn benchmark_agc(c: &mut Criterion) {
    let mut group = c.benchmark_group("agc");
    let trace: Vec<f32> = (0..4000).map(|s| (s as f32 * 0.05).sin()).collect();

    // cost should stay flat as the window grows
    for window_ms in [50.0f32, 500.0, 5000.0] {
        group.throughput(Throughput::Elements(trace.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(window_ms), &window_ms, |b, &window_ms| {
            b.iter(|| apply_agc(black_box(&trace), 2.0, window_ms));
        });
    }

    group.finish();
}

fn benchmark_window_cache(c: &mut Criterion) {
    let file = build_file(2000, 1000, SampleFormat::IeeeFloat);
    let request = WindowRequest::new(500..700).with_agc(AgcSettings::enabled(500.0));

    c.bench_function("window_cold", |b| {
        b.iter(|| {
            let mut cache = WindowCache::default();
            cache.file_window(&file, &request).unwrap().len()
        });
    });

    let mut cache = WindowCache::default();
    c.bench_function("window_cached", |b| {
        b.iter(|| cache.file_window(&file, black_box(&request)).unwrap().len());
    });
}

criterion_group!(benches, benchmark_parse, benchmark_write, benchmark_agc, benchmark_window_cache);
criterion_main!(benches);
