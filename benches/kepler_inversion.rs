use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lightcurve::diagnostics::Diagnostics;
use lightcurve::eclipse::find_eclipse_events;
use lightcurve::kepler::true_anomaly_from_phase;
use lightcurve::params::OrbitalParameters;

/// Typical regime: e ∈ [0.0, 0.7]
fn bench_typical(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let samples = 10_000usize;

    c.bench_function("true_anomaly_from_phase/typical_e<=0.7", |b| {
        b.iter_batched(
            || {
                // Pre-generate inputs to avoid RNG cost in the timed section
                (0..samples)
                    .map(|_| (rng.random::<f64>(), rng.random_range(0.0..=0.7)))
                    .collect::<Vec<_>>()
            },
            |cases| {
                let mut diagnostics = Diagnostics::new();
                for (phase, e) in cases {
                    let v = true_anomaly_from_phase(black_box(phase), black_box(e), &mut diagnostics);
                    black_box(v);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.9]
fn bench_high_e(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);
    let samples = 10_000usize;

    c.bench_function("true_anomaly_from_phase/high_e_0.7..0.9", |b| {
        b.iter_batched(
            || {
                (0..samples)
                    .map(|_| (rng.random::<f64>(), rng.random_range(0.7..0.9)))
                    .collect::<Vec<_>>()
            },
            |cases| {
                let mut diagnostics = Diagnostics::new();
                for (phase, e) in cases {
                    let v = true_anomaly_from_phase(black_box(phase), black_box(e), &mut diagnostics);
                    black_box(v);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Full eclipse-event solve on randomized detached systems.
fn bench_eclipse_events(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);
    let samples = 100usize;

    c.bench_function("find_eclipse_events/detached_systems", |b| {
        b.iter_batched(
            || {
                (0..samples)
                    .map(|_| {
                        let e = rng.random_range(0.0..0.5);
                        let w = rng.random::<f64>() * std::f64::consts::TAU;
                        let i = rng.random_range(1.2..std::f64::consts::FRAC_PI_2);
                        OrbitalParameters::new(10., e, w, i, None, None, 1., 0.8, 6000., 5000.)
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            },
            |cases| {
                let mut diagnostics = Diagnostics::new();
                for params in &cases {
                    let events = find_eclipse_events(black_box(params), &mut diagnostics);
                    black_box(events.ok());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_eclipse_events
);
criterion_main!(benches);
