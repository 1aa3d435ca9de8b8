use collinear_detect::sort::merge_sort_by;
use collinear_detect::{CollinearDetector, DetectorKind, Point};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

const FAST_COUNTS: [usize; 3] = [100, 400, 1600];
const BRUTE_COUNTS: [usize; 2] = [50, 100];

/// Distinct points on a grid, with enough density for collinear runs.
fn grid_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let side = (count * 4).isqrt().max(4);
    index::sample(&mut rng, side * side, count)
        .into_iter()
        .map(|cell| {
            let x = i32::try_from(cell % side).unwrap_or(i32::MAX);
            let y = i32::try_from(cell / side).unwrap_or(i32::MAX);
            Point::new(x, y)
        })
        .collect()
}

fn benchmark_fast(c: &mut Criterion) {
    for count in FAST_COUNTS {
        let points = grid_points(count, 1);
        c.bench_function(format!("fast detect {count}").as_str(), |b| {
            b.iter(|| DetectorKind::Fast.detect(black_box(&points)));
        });
    }
}

fn benchmark_brute(c: &mut Criterion) {
    for count in BRUTE_COUNTS {
        let points = grid_points(count, 2);
        c.bench_function(format!("brute detect {count}").as_str(), |b| {
            b.iter(|| DetectorKind::BruteForce.detect(black_box(&points)));
        });
    }
}

fn benchmark_slope_sort(c: &mut Criterion) {
    let points = grid_points(1600, 3);
    let mut rng = StdRng::seed_from_u64(4);
    let pivot = points[rng.gen_range(0..points.len())];
    let order = pivot.slope_order();

    c.bench_function("merge sort by slope 1600", |b| {
        b.iter_batched(
            || points.clone(),
            |mut items| merge_sort_by(&mut items, |a, p| order.compare(a, p)),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("std sort by slope 1600", |b| {
        b.iter_batched(
            || points.clone(),
            |mut items| items.sort_by(|a, p| order.compare(a, p)),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, benchmark_fast, benchmark_brute, benchmark_slope_sort);
criterion_main!(benches);
