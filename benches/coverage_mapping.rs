use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use skytrack::coverage::{map_coverage, GridResolution, UnitVectorMean};
use skytrack::ephemeris::{parser::EphemerisRecord, ObjectTrack, TrackDefinition};

/// A track drifting from a random start position, one point every 0.5 day
fn random_track(rng: &mut StdRng, object_id: &str, days: usize) -> ObjectTrack {
    let jd_start = 2459000.5;
    let jd_end = jd_start + days as f64;
    let definition: TrackDefinition = format!("{object_id},{jd_start},{jd_end}")
        .parse()
        .unwrap();

    let mut ra = rng.random::<f64>() * std::f64::consts::TAU;
    let mut dec = rng.random_range(-1.2..1.2_f64);
    let records = (0..=2 * days)
        .map(|i| {
            ra = (ra + rng.random_range(0.0..0.01)).rem_euclid(std::f64::consts::TAU);
            dec = (dec + rng.random_range(-0.004..0.004_f64)).clamp(-1.5, 1.5);
            EphemerisRecord {
                jd: jd_start + 0.5 * i as f64,
                ra,
                dec,
            }
        })
        .collect();

    ObjectTrack::from_records(definition, records)
}

fn bench_map_coverage(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5EED_CAFE);

    c.bench_function("map_coverage/8_tracks_1y", |b| {
        b.iter_batched(
            || {
                (0..8)
                    .map(|i| random_track(&mut rng, &format!("body{i}"), 365))
                    .collect::<Vec<_>>()
            },
            |tracks| {
                black_box(
                    map_coverage(&tracks, GridResolution::default(), &UnitVectorMean).unwrap(),
                )
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_map_coverage);
criterion_main!(benches);
