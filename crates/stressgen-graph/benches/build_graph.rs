use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stressgen_core::rng::RngHandle;
use stressgen_graph::{generate, GenerationConfig, GraphFlags, Topology};

fn build_graph_bench(c: &mut Criterion) {
    c.bench_function("random_tree_5k", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            let tree =
                generate(&Topology::RandomTree, &GenerationConfig::new(5_000), &mut rng).unwrap();
            black_box(tree.to_text(&mut rng));
        });
    });

    let flags = GraphFlags {
        m: 20_000,
        connected: true,
        ..GraphFlags::default()
    };
    c.bench_function("connected_graph_5k", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            let graph = generate(
                &Topology::ConstrainedGraph(flags),
                &GenerationConfig::new(5_000),
                &mut rng,
            )
            .unwrap();
            black_box(graph);
        });
    });
}

criterion_group!(benches, build_graph_bench);
criterion_main!(benches);
