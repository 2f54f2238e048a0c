mod common;

use stressgen_core::rng::RngHandle;
use stressgen_graph::{generate, GenerationConfig, GraphFlags, Instance, InstanceKind, Topology};

use common::{assert_spanning_tree, canonical_pairs, reachable_from_one, render_and_parse};

fn constrained(n: usize, flags: GraphFlags, seed: u64) -> Instance {
    let mut rng = RngHandle::from_seed(seed);
    generate(
        &Topology::ConstrainedGraph(flags),
        &GenerationConfig::new(n),
        &mut rng,
    )
    .unwrap()
}

#[test]
fn directed_acyclic_edges_follow_canonical_order() {
    for (seed, multi_edges) in [(1u64, false), (2, true)] {
        let flags = GraphFlags {
            m: 60,
            directed: true,
            acyclic: true,
            multi_edges,
            self_loops: true,
            ..GraphFlags::default()
        };
        let dag = constrained(15, flags, seed);
        assert_eq!(dag.kind(), InstanceKind::Graph { directed: true });
        assert_eq!(dag.m(), 60);
        for (key, _) in dag.edges().iter() {
            assert!(key.u < key.v, "{key} breaks the order");
        }
        if !multi_edges {
            assert_eq!(dag.edges().distinct_len(), 60);
        }
    }
}

#[test]
fn printed_dag_edges_keep_their_direction() {
    let flags = GraphFlags {
        m: 40,
        directed: true,
        acyclic: true,
        connected: true,
        ..GraphFlags::default()
    };
    let dag = constrained(20, flags, 5);
    let mut rng = RngHandle::from_seed(6);
    let parsed = render_and_parse(&dag, &mut rng);
    let pairs = canonical_pairs(&dag, &parsed);
    assert!(pairs.iter().all(|&(u, v)| u < v));
    assert_eq!(reachable_from_one(20, &pairs), 20);
}

#[test]
fn complete_dag_uses_every_ordered_pair() {
    let flags = GraphFlags {
        m: 45,
        directed: true,
        acyclic: true,
        ..GraphFlags::default()
    };
    let dag = constrained(10, flags, 8);
    for u in 1..=10 {
        for v in u + 1..=10 {
            assert!(dag.edges().contains(u, v));
        }
    }
}

#[test]
fn five_vertex_connected_acyclic_graph_is_a_spanning_tree() {
    let flags = GraphFlags {
        m: 4,
        acyclic: true,
        connected: true,
        ..GraphFlags::default()
    };
    let tree = constrained(5, flags, 9);
    assert_eq!(tree.kind(), InstanceKind::Graph { directed: false });
    let mut rng = RngHandle::from_seed(10);
    assert!(tree.to_text(&mut rng).starts_with("5 4\n"));
    assert_spanning_tree(&tree, &mut rng);
}

#[test]
fn connected_acyclic_overrides_requested_edge_count() {
    for requested in [0usize, 2, 30] {
        let flags = GraphFlags {
            m: requested,
            acyclic: true,
            connected: true,
            ..GraphFlags::default()
        };
        let tree = constrained(12, flags, requested as u64);
        assert_eq!(tree.m(), 11);
    }
}

#[test]
fn forest_keeps_requested_edge_count() {
    for m in 0..=9 {
        let flags = GraphFlags {
            m,
            acyclic: true,
            ..GraphFlags::default()
        };
        let forest = constrained(10, flags, 100 + m as u64);
        assert_eq!(forest.m(), m);
        assert!(forest.edges().iter().all(|(key, record)| !key.is_loop() && record.count == 1));
    }
}
