//! Random graphs under structural constraints.
//!
//! Connected graphs start from a uniformly random spanning tree and then
//! receive extra random edges. Undirected acyclic graphs that need not be
//! connected are obtained by cutting edges out of a random tree. Directed
//! acyclic graphs only ever use edges `u -> v` with `u < v`, so `1..=n` is a
//! topological order.
//!
//! Feasibility is checked up front by [`plan_graph`]; the builders below
//! assume a validated request and never fail halfway.

use rand::seq::SliceRandom;
use rand::Rng;
use stressgen_core::errors::{ErrorInfo, GenError};
use stressgen_core::rng::RngHandle;
use tracing::warn;

use crate::flags::GraphFlags;
use crate::generators::EdgeBuilder;
use crate::ids::EdgeKey;
use crate::prufer::random_tree_edges;

/// A validated constrained-graph request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GraphPlan {
    pub(crate) n: usize,
    pub(crate) flags: GraphFlags,
    /// Edge count the assembled graph will have.
    pub(crate) m: usize,
}

/// Checks that `flags` can be satisfied on `n` vertices and fixes the final
/// edge count.
pub(crate) fn plan_graph(n: usize, flags: &GraphFlags) -> Result<GraphPlan, GenError> {
    let tree_edges = n - 1;
    let mut m = flags.m;

    if flags.acyclic && !flags.directed {
        if flags.connected {
            if m != tree_edges {
                warn!(
                    requested = m,
                    forced = tree_edges,
                    "acyclic connected graph is a tree; overriding edge count"
                );
            }
            m = tree_edges;
        } else if m > tree_edges {
            return Err(GenError::InvalidParameters(
                ErrorInfo::new("forest-too-dense", "an undirected forest has at most n - 1 edges")
                    .with_context("n", n)
                    .with_context("m", m),
            )
            .with_hint("drop `acyclic` or lower m"));
        }
        return Ok(GraphPlan {
            n,
            flags: *flags,
            m,
        });
    }

    if flags.connected && m < tree_edges {
        return Err(GenError::InvalidParameters(
            ErrorInfo::new("too-few-edges", "a connected graph needs at least n - 1 edges")
                .with_context("n", n)
                .with_context("m", m),
        )
        .with_hint("raise m or drop `connected`"));
    }

    let capacity = distinct_capacity(n, flags);
    let exceeds = if flags.multi_edges {
        m > 0 && capacity == 0
    } else {
        m as u128 > capacity
    };
    if exceeds {
        return Err(
            GenError::insufficient_domain("too-many-edges", "not enough distinct admissible edges")
                .with_context("n", n)
                .with_context("m", m)
                .with_context("capacity", capacity)
                .with_hint("enable `multi_edges` or `self_loops`, or lower m"),
        );
    }

    Ok(GraphPlan {
        n,
        flags: *flags,
        m,
    })
}

/// Number of distinct keys a graph with these flags may use.
pub(crate) fn distinct_capacity(n: usize, flags: &GraphFlags) -> u128 {
    let n = n as u128;
    let pairs = n * n.saturating_sub(1) / 2;
    if flags.acyclic {
        return pairs;
    }
    let loops = if flags.self_loops { n } else { 0 };
    if flags.directed {
        2 * pairs + loops
    } else {
        pairs + loops
    }
}

/// Fills the builder according to a validated plan.
pub(crate) fn assemble(builder: &mut EdgeBuilder<'_>, plan: &GraphPlan) -> Result<(), GenError> {
    let GraphPlan { n, flags, m } = *plan;
    match (flags.acyclic, flags.directed) {
        (true, false) => {
            for (u, v) in random_tree_edges(n, builder.rng())? {
                builder.connect(u, v);
            }
            if !flags.connected {
                cut_edges(builder, (n - 1) - m);
            }
        }
        (true, true) => {
            if flags.connected {
                for (u, v) in random_tree_edges(n, builder.rng())? {
                    builder.connect(u.min(v), u.max(v));
                }
            }
            let extra = m - builder.store().total_len();
            add_random_edges(builder, plan, extra);
        }
        (false, directed) => {
            if flags.connected {
                for (u, v) in random_tree_edges(n, builder.rng())? {
                    if directed && builder.rng().gen_bool(0.5) {
                        builder.connect(v, u);
                    } else {
                        builder.connect(u, v);
                    }
                }
            }
            let extra = m - builder.store().total_len();
            add_random_edges(builder, plan, extra);
        }
    }
    Ok(())
}

/// Removes `count` occurrences chosen uniformly from the current multiset.
fn cut_edges(builder: &mut EdgeBuilder<'_>, count: usize) {
    if count == 0 {
        return;
    }
    let occurrences = builder.store().expanded();
    let doomed: Vec<EdgeKey> = occurrences
        .choose_multiple(builder.rng(), count)
        .copied()
        .collect();
    for key in doomed {
        builder.store_mut().remove_one(&key);
    }
}

/// Adds `count` random edges obeying the self-loop, multi-edge and
/// acyclicity discipline of the plan.
fn add_random_edges(builder: &mut EdgeBuilder<'_>, plan: &GraphPlan, count: usize) {
    if count == 0 {
        return;
    }
    let flags = plan.flags;
    if flags.multi_edges {
        for _ in 0..count {
            let (u, v) = draw_pair(plan.n, &flags, builder.rng());
            builder.connect(u, v);
        }
        return;
    }

    let free = distinct_capacity(plan.n, &flags) - builder.store().distinct_len() as u128;
    if (count as u128) * 2 > free {
        // Dense request: rejection sampling would stall near saturation, so
        // sample directly from the keys that are still free.
        let candidates: Vec<(usize, usize)> = candidate_pairs(plan.n, &flags)
            .filter(|&(u, v)| !builder.store().contains(u, v))
            .collect();
        let chosen: Vec<(usize, usize)> = candidates
            .choose_multiple(builder.rng(), count)
            .copied()
            .collect();
        for (u, v) in chosen {
            builder.connect(u, v);
        }
        return;
    }

    let mut added = 0;
    while added < count {
        let (u, v) = draw_pair(plan.n, &flags, builder.rng());
        if builder.store().contains(u, v) {
            continue;
        }
        builder.connect(u, v);
        added += 1;
    }
}

/// Draws one admissible endpoint pair uniformly.
fn draw_pair(n: usize, flags: &GraphFlags, rng: &mut RngHandle) -> (usize, usize) {
    if flags.acyclic {
        let (a, b) = distinct_pair(n, rng);
        return (a.min(b), a.max(b));
    }
    if flags.self_loops {
        (rng.gen_range(1..=n), rng.gen_range(1..=n))
    } else {
        distinct_pair(n, rng)
    }
}

/// Two different vertices, each uniform in `1..=n`. Requires `n >= 2`.
fn distinct_pair(n: usize, rng: &mut RngHandle) -> (usize, usize) {
    let u = rng.gen_range(1..=n);
    let mut v = rng.gen_range(1..n);
    if v >= u {
        v += 1;
    }
    (u, v)
}

/// Every admissible key as an endpoint pair, in lexicographic order.
fn candidate_pairs(n: usize, flags: &GraphFlags) -> impl Iterator<Item = (usize, usize)> {
    let flags = *flags;
    (1..=n).flat_map(move |u| {
        (1..=n).filter_map(move |v| {
            let admissible = if u == v {
                flags.self_loops && !flags.acyclic
            } else if flags.directed && !flags.acyclic {
                true
            } else {
                u < v
            };
            admissible.then_some((u, v))
        })
    })
}
