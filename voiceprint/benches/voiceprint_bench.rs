use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voicegate_voiceprint::{extract_features, FeatureConfig, MatchPolicy};

fn make_sine(freq_hz: f64, n_samples: usize, sample_rate: usize) -> Vec<i16> {
    (0..n_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (16000.0 * (freq_hz * 2.0 * std::f64::consts::PI * t).sin()) as i16
        })
        .collect()
}

fn bench_extract_1s(c: &mut Criterion) {
    let cfg = FeatureConfig::default();
    let audio = make_sine(440.0, 16000, 16000); // 1s

    c.bench_function("voiceprint_extract_1s", |b| {
        b.iter(|| {
            let _ = black_box(extract_features(black_box(&audio), &cfg));
        });
    });
}

fn bench_extract_5s(c: &mut Criterion) {
    let cfg = FeatureConfig::default();
    let audio = make_sine(440.0, 80000, 16000); // 5s

    c.bench_function("voiceprint_extract_5s", |b| {
        b.iter(|| {
            let _ = black_box(extract_features(black_box(&audio), &cfg));
        });
    });
}

fn bench_compare_5s(c: &mut Criterion) {
    let cfg = FeatureConfig::default();
    let policy = MatchPolicy::default();
    let a = extract_features(&make_sine(440.0, 80000, 16000), &cfg);
    let b_vec = extract_features(&make_sine(523.0, 80000, 16000), &cfg);

    c.bench_function("voiceprint_compare_5s", |b| {
        b.iter(|| {
            let _ = black_box(policy.compare(black_box(&a), black_box(&b_vec)));
        });
    });
}

criterion_group!(benches, bench_extract_1s, bench_extract_5s, bench_compare_5s);
criterion_main!(benches);
