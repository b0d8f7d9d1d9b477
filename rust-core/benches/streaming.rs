use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sensor_dsp::filters::{design_fir, BandType, StreamingFilter, WindowKind};
use sensor_dsp::signal::sine_frames;
use sensor_dsp::SpectralAnalyzer;

fn bench_streaming_filter(c: &mut Criterion) {
    let coeffs =
        design_fir(5.0, 0.0, 200.0, WindowKind::BlackmanHarris, BandType::LowPass, 40).unwrap();
    let mut filter = StreamingFilter::<3>::new(coeffs).unwrap();
    let frames = sine_frames([1.0, 0.5, 0.25], 12.5, 200.0, 1024);

    c.bench_function("fir_3ch_41taps_1024_frames", |b| {
        b.iter(|| {
            for &frame in &frames {
                black_box(filter.process(black_box(frame)));
            }
        })
    });
}

fn bench_spectrum(c: &mut Criterion) {
    let mut analyzer = SpectralAnalyzer::<3>::new(1024).unwrap();
    for frame in sine_frames([1.0, 0.5, 0.25], 12.5, 200.0, 1024) {
        analyzer.push_frame(frame);
    }

    c.bench_function("spectrum_3ch_1024", |b| {
        b.iter(|| black_box(analyzer.compute_magnitude_spectrum().unwrap()))
    });
}

criterion_group!(benches, bench_streaming_filter, bench_spectrum);
criterion_main!(benches);
