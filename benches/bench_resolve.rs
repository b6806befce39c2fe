use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use objectgraph::{
    Direction, LayerStack, MemoryStore, ZeroOrMoreLayer,
    bench_utils::{QueryDataset, generate_dataset, star_query},
    layers::subclass_of_matcher,
    load_terms, resolve, transitive_lookup,
    vocab::rdfs_sub_class_of,
};

const DATA_SEED: u64 = 0x5EED;
const CLASS_DEPTH: usize = 8;
const GROUPS: usize = 16;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn bench_scale() -> usize {
    #[cfg(feature = "bench-ci")]
    {
        2_000
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        20_000
    }
}

fn prepared() -> (QueryDataset, MemoryStore) {
    let dataset = generate_dataset(bench_scale(), CLASS_DEPTH, GROUPS, DATA_SEED);
    let store = dataset.memory_store();
    (dataset, store)
}

fn bench_star_query(c: &mut Criterion) {
    let (dataset, store) = prepared();
    let class = &dataset.classes[CLASS_DEPTH - 1];
    let (graph, start) = star_query(class, &dataset.groups[0], 20, 80).expect("query graph");

    let mut group = c.benchmark_group("star_query");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    group.bench_function("direct", |b| {
        b.iter(|| resolve(&graph, start, &store, None).expect("resolve"));
    });
    let root = &dataset.classes[0];
    let (graph, start) = star_query(root, &dataset.groups[0], 20, 80).expect("query graph");
    group.bench_function("subclass_closure", |b| {
        b.iter(|| load_terms(&store, &graph, start, root).expect("load_terms"));
    });
    group.finish();
}

fn bench_closure(c: &mut Criterion) {
    let (dataset, store) = prepared();
    let mut group = c.benchmark_group("closure");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    group.bench_function("transitive_lookup", |b| {
        b.iter(|| {
            transitive_lookup(
                &store,
                &dataset.classes[0],
                &rdfs_sub_class_of(),
                None,
                Direction::Up,
                None,
            )
            .expect("lookup")
        });
    });
    let (graph, start) =
        star_query(&dataset.classes[0], &dataset.groups[1], 0, 100).expect("query graph");
    let layered = LayerStack::new(&store).with(ZeroOrMoreLayer::new(subclass_of_matcher()));
    group.bench_function("layered_resolve", |b| {
        b.iter(|| resolve(&graph, start, &layered, None).expect("resolve"));
    });
    group.finish();
}

criterion_group!(benches, bench_star_query, bench_closure);
criterion_main!(benches);
