// tests/processing_tests.rs
use segy_rs::processing::*;
use segy_rs::*;

fn section(traces: usize, samples: usize) -> SegyFile {
    let mut binary = BinaryHeader::default();
    binary.sample_interval = 4000;
    binary.samples_per_trace = samples as i16;
    binary.set_sample_format(SampleFormat::IeeeFloat);

    let mut dataset = SegyDataset::new(samples).unwrap();
    for t in 0..traces {
        // amplitude decays with time, as a real shot record does
        let trace: Vec<f32> = (0..samples)
            .map(|s| (s as f32 * 0.3 + t as f32).sin() * 1000.0 * (-(s as f32) / 40.0).exp())
            .collect();
        dataset.push_trace(TraceHeader::default(), &trace).unwrap();
    }
    SegyFile::new(TextHeader::default(), binary, dataset).unwrap()
}

fn rms(values: &[f32]) -> f32 {
    (values.iter().map(|v| v * v).sum::<f32>() / values.len() as f32).sqrt()
}

#[test]
fn test_agc_balances_decaying_trace() {
    let file = section(1, 400);
    let raw = file.dataset.trace(0).unwrap();
    let gained = apply_agc(raw, file.binary_header.sample_interval_ms(), 100.0);

    assert_eq!(gained.len(), raw.len());
    // raw energy collapses with depth; after AGC both halves sit near unit RMS
    assert!(rms(&raw[..100]) > 100.0 * rms(&raw[300..]));
    let early = rms(&gained[20..100]);
    let late = rms(&gained[300..380]);
    assert!((early - late).abs() < 0.5, "{} vs {}", early, late);
}

#[test]
fn test_window_from_file_uses_header_interval() {
    let file = section(10, 64);
    let mut cache = WindowCache::default();
    let request = WindowRequest::new(3..6).with_agc(AgcSettings::enabled(40.0));

    let expected = apply_agc(file.dataset.trace(4).unwrap(), 4.0, 40.0);
    let window = cache.file_window(&file, &request).unwrap();
    assert!(window.is_processed());
    assert_eq!(window.trace(1), Some(&expected[..]));
}

#[test]
fn test_scroll_with_margin_reuses_window() {
    let file = section(100, 32);
    let mut cache = WindowCache::new(WindowCacheConfig {
        capacity: 4,
        margin: 10,
    });
    let agc = AgcSettings::enabled(20.0);

    for start in 40..50 {
        let request = WindowRequest::new(start..start + 5).with_agc(agc);
        let window = cache.file_window(&file, &request).unwrap();
        assert_eq!(window.len(), 5);
    }
    // 40..45 computed 30..55; every later scroll position fits inside it
    assert_eq!(cache.recompute_count(), 1);

    let far = WindowRequest::new(90..100).with_agc(agc);
    cache.file_window(&file, &far).unwrap();
    assert_eq!(cache.recompute_count(), 2);
}

#[test]
fn test_reverse_order_window() {
    let file = section(6, 16);
    let mut cache = WindowCache::default();

    let raw = cache
        .file_window(&file, &WindowRequest::new(0..6).reversed(true))
        .unwrap();
    let order: Vec<&[f32]> = raw.iter().collect();
    for (t, trace) in order.iter().enumerate() {
        assert_eq!(*trace, file.dataset.trace(5 - t).unwrap());
    }
}

#[test]
fn test_agc_toggle_and_edit() {
    let mut file = section(8, 16);
    let mut cache = WindowCache::default();
    let on = WindowRequest::new(0..8).with_agc(AgcSettings::enabled(16.0));
    let off = WindowRequest::new(0..8);

    cache.file_window(&file, &on).unwrap();
    assert!(!cache.file_window(&file, &off).unwrap().is_processed());
    cache.file_window(&file, &on).unwrap();
    assert_eq!(cache.recompute_count(), 1);

    file.dataset.trace_mut(2).unwrap().fill(0.0);
    let window = cache.file_window(&file, &on).unwrap();
    assert!(window.trace(2).unwrap().iter().all(|&x| x == 0.0));
    assert_eq!(cache.recompute_count(), 2);

    // a sample interval edit changes the window length in samples
    file.binary_header.sample_interval = 2000;
    cache.file_window(&file, &on).unwrap();
    assert_eq!(cache.recompute_count(), 3);
}

#[test]
fn test_out_of_range_request() {
    let file = section(4, 8);
    let mut cache = WindowCache::default();
    assert!(matches!(
        cache.file_window(&file, &WindowRequest::new(2..9)),
        Err(SegyError::InvalidTraceRange { available: 4, .. })
    ));
}
