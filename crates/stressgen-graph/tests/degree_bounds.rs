mod common;

use stressgen_core::rng::RngHandle;
use stressgen_graph::{generate, GenerationConfig, Topology, NOISE};

use common::{canonical_pairs, degrees, reachable_from_one, render_and_parse};

#[test]
fn seven_vertex_binary_tree() {
    let mut rng = RngHandle::from_seed(7);
    let tree = generate(&Topology::Binary, &GenerationConfig::new(7), &mut rng).unwrap();
    let parsed = render_and_parse(&tree, &mut rng);
    assert_eq!(parsed.edges.len(), 6);
    let pairs = canonical_pairs(&tree, &parsed);
    let degree = degrees(7, &pairs);
    assert_eq!(degree.iter().max(), Some(&3));
    assert_eq!(reachable_from_one(7, &pairs), 7);
}

#[test]
fn binary_tree_degrees_are_bounded() {
    let mut rng = RngHandle::from_seed(11);
    for n in 1..=300 {
        let tree = generate(&Topology::Binary, &GenerationConfig::new(n), &mut rng).unwrap();
        let parsed = render_and_parse(&tree, &mut rng);
        let degree = degrees(n, &canonical_pairs(&tree, &parsed));
        assert!(degree[1] <= 2, "root degree {} for n = {n}", degree[1]);
        assert!(degree.iter().all(|&d| d <= 3));
    }
}

#[test]
fn star_leaves_hang_off_centers() {
    let mut rng = RngHandle::from_seed(13);
    for n in 1..=200 {
        let tree = generate(&Topology::Star, &GenerationConfig::new(n), &mut rng).unwrap();
        let parsed = render_and_parse(&tree, &mut rng);
        let pairs = canonical_pairs(&tree, &parsed);
        // Centers are canonical ids 1..=c with c <= NOISE; everything above is a leaf.
        let degree = degrees(n, &pairs);
        for vertex in NOISE + 1..=n {
            assert_eq!(degree[vertex], 1, "vertex {vertex} of n = {n}");
        }
        assert!(pairs.iter().all(|&(u, v)| u.min(v) <= NOISE));
    }
}

#[test]
fn removing_star_path_centers_isolates_the_rest() {
    let mut rng = RngHandle::from_seed(17);
    for (n, centers) in [(10usize, 3usize), (50, 1), (50, 50), (120, 11)] {
        let tree = generate(
            &Topology::StarPath { centers },
            &GenerationConfig::new(n),
            &mut rng,
        )
        .unwrap();
        let parsed = render_and_parse(&tree, &mut rng);
        let pairs = canonical_pairs(&tree, &parsed);
        let remainder: Vec<_> = pairs
            .iter()
            .filter(|&&(u, v)| u > centers && v > centers)
            .collect();
        assert!(remainder.is_empty(), "n = {n}, centers = {centers}");
    }
}

#[test]
fn caterpillar_legs_are_leaves() {
    let mut rng = RngHandle::from_seed(19);
    let n = 400;
    let tree = generate(&Topology::Caterpillar, &GenerationConfig::new(n), &mut rng).unwrap();
    let parsed = render_and_parse(&tree, &mut rng);
    let pairs = canonical_pairs(&tree, &parsed);
    let degree = degrees(n, &pairs);
    // Vertices beyond the trunk only ever receive their single attaching edge.
    let trunk_len = (2..=n)
        .take_while(|&vertex| tree.edges().contains(vertex, vertex - 1))
        .count()
        + 1;
    assert!(trunk_len >= n / 2);
    for vertex in trunk_len + 1..=n {
        assert_eq!(degree[vertex], 1);
    }
}
