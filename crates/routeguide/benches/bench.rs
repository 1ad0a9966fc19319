use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use routeguide::{Feature, FeatureStore, Point, Rectangle, RouteNote, distance_meters};

/// Builds a synthetic grid of features spanning roughly 40..42N, 73..75W.
fn grid_store(side: i32) -> FeatureStore {
    let step = 20_000_000 / side;
    (0..side)
        .flat_map(|i| {
            (0..side).map(move |j| {
                Feature::new(
                    format!("feature {i}/{j}"),
                    Point::new(400_000_000 + i * step, -750_000_000 + j * step),
                )
            })
        })
        .collect()
}

fn bench_distance(c: &mut Criterion) {
    let a = Point::new(407838351, -746143763);
    let b = Point::new(408122808, -743999179);

    c.bench_function("geo/distance_meters", |bench| {
        bench.iter(|| distance_meters(black_box(a), black_box(b)))
    });
}

fn bench_store(c: &mut Criterion) {
    for side in [10, 100, 300] {
        let store = grid_store(side);
        let mut group = c.benchmark_group("store");
        group.throughput(Throughput::Elements(store.len() as u64));

        let quarter = Rectangle::new(
            Point::new(400_000_000, -750_000_000),
            Point::new(410_000_000, -740_000_000),
        );
        group.bench_function(format!("within/{}", store.len()), |bench| {
            bench.iter(|| store.within(black_box(&quarter)).count())
        });

        let missing = Point::new(1, 1);
        group.bench_function(format!("lookup_miss/{}", store.len()), |bench| {
            bench.iter(|| store.lookup(black_box(missing)).is_some())
        });
        group.finish();
    }
}

fn bench_chat(c: &mut Criterion) {
    c.bench_function("chat/receive_1000_notes_4_locations", |bench| {
        bench.iter(|| {
            let mut session = routeguide::ChatSession::new();
            let mut echoed = 0;
            for i in 0..1000 {
                let location = Point::new(i % 2, (i / 2) % 2);
                echoed += session.receive(RouteNote::new(location, "ping")).len();
            }
            black_box(echoed)
        })
    });
}

criterion_group!(benches, bench_distance, bench_store, bench_chat);
criterion_main!(benches);
