use serde::{Deserialize, Serialize};
use stressgen_core::errors::GenError;
use stressgen_core::rng::RngHandle;
use tracing::debug;

use crate::assembler::{assemble, plan_graph};
use crate::flags::{GenerationConfig, Topology, WeightSource, WeightSpec};
use crate::generators::{
    binary, caterpillar, check_star_centers, comb, random_tree, star, star_path, EdgeBuilder,
};
use crate::ids::EdgeKey;
use crate::permutation::Permutation;
use crate::serialization::render_text;
use crate::store::EdgeStore;

/// Whether an instance renders as a tree or as a graph.
///
/// Externally tagged so the binary encoding can round-trip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceKind {
    /// Header `n`, then `n - 1` edges.
    Tree,
    /// Header `n m`, then `m` edges.
    Graph {
        /// Whether edges are printed in stored orientation.
        directed: bool,
    },
}

/// A generated structure, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub(crate) kind: InstanceKind,
    pub(crate) n: usize,
    pub(crate) weighted: bool,
    pub(crate) permutation: Permutation,
    pub(crate) edges: EdgeStore,
}

impl Instance {
    /// Tree or graph.
    pub fn kind(&self) -> InstanceKind {
        self.kind
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of edges, counting parallel copies.
    pub fn m(&self) -> usize {
        self.edges.total_len()
    }

    /// Whether rendered edges carry weights.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Whether edges are ordered pairs.
    pub fn is_directed(&self) -> bool {
        self.edges.is_directed()
    }

    /// Labelling applied when rendering.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Edges over canonical vertex ids.
    pub fn edges(&self) -> &EdgeStore {
        &self.edges
    }

    /// Every edge occurrence over printed labels, as `(u, v, weight)`.
    ///
    /// Undirected pairs are normalized to `u <= v` after relabelling; the list
    /// is sorted.
    pub fn labelled_edges(&self) -> Vec<(usize, usize, i64)> {
        let mut labelled = Vec::with_capacity(self.m());
        for (key, record) in self.edges.iter() {
            let (u, v) = (self.permutation.apply(key.u), self.permutation.apply(key.v));
            let key = if self.is_directed() {
                EdgeKey::directed(u, v)
            } else {
                EdgeKey::undirected(u, v)
            };
            for _ in 0..record.count {
                labelled.push((key.u, key.v, record.weight));
            }
        }
        labelled.sort_unstable();
        labelled
    }

    /// Renders the instance in the line-oriented text format.
    ///
    /// Edge order and the printed orientation of undirected edges are drawn
    /// from `rng`, so the same instance renders differently under different
    /// streams.
    pub fn to_text(&self, rng: &mut RngHandle) -> String {
        render_text(self, rng)
    }
}

/// Generates an instance with the weight distribution from `config`.
pub fn generate(
    topology: &Topology,
    config: &GenerationConfig,
    rng: &mut RngHandle,
) -> Result<Instance, GenError> {
    let mut weights = config.weights;
    generate_with(topology, config, &mut weights, rng)
}

/// Generates an instance, drawing weights from `weights` when
/// `config.weighted` is set.
///
/// All parameters are validated before anything is drawn from `rng`.
pub fn generate_with(
    topology: &Topology,
    config: &GenerationConfig,
    weights: &mut impl WeightSource,
    rng: &mut RngHandle,
) -> Result<Instance, GenError> {
    config.validate()?;
    let n = config.n;
    let plan = match topology {
        Topology::ConstrainedGraph(flags) => Some(plan_graph(n, flags)?),
        _ => None,
    };
    if let Topology::StarPath { centers } = topology {
        check_star_centers(n, *centers)?;
    }

    let permutation = Permutation::random(n, rng);
    let directed = plan.map_or(false, |plan| plan.flags.directed);
    let store = if directed {
        EdgeStore::directed()
    } else {
        EdgeStore::undirected()
    };

    let mut unit = WeightSpec::default();
    let source: &mut dyn WeightSource = if config.weighted { weights } else { &mut unit };
    let mut builder = EdgeBuilder::new(store, source, rng);
    match topology {
        Topology::RandomTree => random_tree(&mut builder, n)?,
        Topology::Caterpillar => caterpillar(&mut builder, n),
        Topology::Star => star(&mut builder, n),
        Topology::StarPath { centers } => star_path(&mut builder, n, *centers)?,
        Topology::Comb => comb(&mut builder, n),
        Topology::Binary => binary(&mut builder, n),
        Topology::ConstrainedGraph(_) => {
            if let Some(plan) = &plan {
                assemble(&mut builder, plan)?;
            }
        }
    }
    let edges = builder.finish();

    let kind = if topology.is_tree() {
        InstanceKind::Tree
    } else {
        InstanceKind::Graph { directed }
    };
    debug!(
        topology = topology.name(),
        n,
        m = edges.total_len(),
        distinct = edges.distinct_len(),
        weighted = config.weighted,
        "generated instance"
    );
    Ok(Instance {
        kind,
        n,
        weighted: config.weighted,
        permutation,
        edges,
    })
}
