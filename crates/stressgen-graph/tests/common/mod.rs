#![allow(dead_code)]

use std::collections::VecDeque;

use stressgen_core::rng::RngHandle;
use stressgen_graph::{parse_text, Instance, InstanceKind, ParsedInstance, TextKind};

/// Renders the instance and parses the text back.
pub fn render_and_parse(instance: &Instance, rng: &mut RngHandle) -> ParsedInstance {
    let kind = match instance.kind() {
        InstanceKind::Tree => TextKind::Tree,
        InstanceKind::Graph { .. } => TextKind::Graph,
    };
    parse_text(&instance.to_text(rng), kind).expect("rendered text parses")
}

/// Edges of a parsed instance mapped back to canonical vertex ids.
pub fn canonical_pairs(instance: &Instance, parsed: &ParsedInstance) -> Vec<(usize, usize)> {
    let inverse = instance.permutation().inverse();
    parsed
        .edges
        .iter()
        .map(|edge| (inverse.apply(edge.u), inverse.apply(edge.v)))
        .collect()
}

/// Breadth-first search from vertex 1 over the undirected view of `edges`.
pub fn reachable_from_one(n: usize, edges: &[(usize, usize)]) -> usize {
    let mut adjacency = vec![Vec::new(); n + 1];
    for &(u, v) in edges {
        adjacency[u].push(v);
        adjacency[v].push(u);
    }
    let mut seen = vec![false; n + 1];
    let mut queue = VecDeque::from([1usize]);
    seen[1] = true;
    let mut visited = 0;
    while let Some(vertex) = queue.pop_front() {
        visited += 1;
        for &next in &adjacency[vertex] {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Returns whether the undirected view of `edges` contains a cycle
/// (self-loops and parallel edges count as cycles).
pub fn has_undirected_cycle(n: usize, edges: &[(usize, usize)]) -> bool {
    let mut parent: Vec<usize> = (0..=n).collect();
    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }
    for &(u, v) in edges {
        let (a, b) = (find(&mut parent, u), find(&mut parent, v));
        if a == b {
            return true;
        }
        parent[a] = b;
    }
    false
}

/// Undirected degree of every vertex, index 0 unused.
pub fn degrees(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut degree = vec![0; n + 1];
    for &(u, v) in edges {
        degree[u] += 1;
        degree[v] += 1;
    }
    degree
}

/// Asserts the spanning-tree invariants on a rendered instance.
pub fn assert_spanning_tree(instance: &Instance, rng: &mut RngHandle) {
    let parsed = render_and_parse(instance, rng);
    assert_eq!(parsed.n, instance.n());
    assert_eq!(parsed.edges.len(), instance.n() - 1);
    let pairs = canonical_pairs(instance, &parsed);
    assert_eq!(reachable_from_one(instance.n(), &pairs), instance.n());
    assert!(!has_undirected_cycle(instance.n(), &pairs));
}
