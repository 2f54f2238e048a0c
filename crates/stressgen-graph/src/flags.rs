use rand::Rng;
use serde::{Deserialize, Serialize};
use stressgen_core::errors::{ErrorInfo, GenError};
use stressgen_core::rng::RngHandle;

/// Upper bound on random structural jitter (star centers, comb offsets).
pub const NOISE: usize = 4;

/// Structure requested from [`generate`](crate::generate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Topology {
    /// Uniformly random labeled tree decoded from a Prüfer sequence.
    RandomTree,
    /// Long trunk with short branches hanging off it.
    Caterpillar,
    /// A few path-connected centers, everything else attached to one of them.
    Star,
    /// Star with a caller-chosen number of centers.
    StarPath {
        /// Number of centers, `1 <= centers <= n`.
        centers: usize,
    },
    /// Trunk of about `sqrt(n)` vertices, each carrying a path of about `sqrt(n)`.
    Comb,
    /// Heap-shaped binary tree: vertex `i` hangs off `i / 2`.
    Binary,
    /// Random graph satisfying the given flags.
    ConstrainedGraph(GraphFlags),
}

impl Topology {
    /// Every tree-shaped topology that needs no extra parameter.
    pub const TREES: [Topology; 5] = [
        Topology::RandomTree,
        Topology::Caterpillar,
        Topology::Star,
        Topology::Comb,
        Topology::Binary,
    ];

    /// Short stable name used in logs and file names.
    pub fn name(&self) -> &'static str {
        match self {
            Topology::RandomTree => "random-tree",
            Topology::Caterpillar => "caterpillar",
            Topology::Star => "star",
            Topology::StarPath { .. } => "star-path",
            Topology::Comb => "comb",
            Topology::Binary => "binary",
            Topology::ConstrainedGraph(_) => "constrained-graph",
        }
    }

    /// Returns whether the topology produces a tree.
    pub fn is_tree(&self) -> bool {
        !matches!(self, Topology::ConstrainedGraph(_))
    }
}

/// Structural requirements for [`Topology::ConstrainedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphFlags {
    /// Requested number of edges, counting parallel copies.
    pub m: usize,
    /// Edges are ordered pairs.
    pub directed: bool,
    /// No cycles. Directed graphs follow the topological order `1..=n`.
    pub acyclic: bool,
    /// The underlying undirected graph is connected.
    pub connected: bool,
    /// Edges `(v, v)` may appear. Ignored for acyclic graphs.
    pub self_loops: bool,
    /// The same key may appear more than once.
    pub multi_edges: bool,
}

/// Per-instance generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of vertices.
    pub n: usize,
    /// Whether rendered edges carry their weight.
    #[serde(default)]
    pub weighted: bool,
    /// Weight distribution used when `weighted` is set.
    #[serde(default)]
    pub weights: WeightSpec,
}

impl GenerationConfig {
    /// Unweighted configuration for `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            weighted: false,
            weights: WeightSpec::default(),
        }
    }

    /// Enables weights drawn from `weights`.
    pub fn with_weights(mut self, weights: WeightSpec) -> Self {
        self.weighted = true;
        self.weights = weights;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), GenError> {
        if self.n == 0 {
            return Err(GenError::InvalidSize(
                ErrorInfo::new("empty-structure", "structures need at least one vertex")
                    .with_context("n", self.n),
            ));
        }
        self.weights.validate()
    }
}

/// Serializable weight distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WeightSpec {
    /// Every edge gets `value`.
    Constant {
        /// Weight assigned to each edge.
        value: i64,
    },
    /// Uniform integer in `min..=max`.
    Uniform {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
}

impl Default for WeightSpec {
    fn default() -> Self {
        WeightSpec::Constant { value: 1 }
    }
}

impl WeightSpec {
    fn validate(&self) -> Result<(), GenError> {
        match *self {
            WeightSpec::Uniform { min, max } if min > max => Err(GenError::InvalidParameters(
                ErrorInfo::new("empty-weight-range", "weight range is empty")
                    .with_context("min", min)
                    .with_context("max", max),
            )),
            _ => Ok(()),
        }
    }
}

/// Source of edge weights, invoked once per distinct edge key.
pub trait WeightSource {
    /// Draws the weight for a newly inserted edge.
    fn draw(&mut self, rng: &mut RngHandle) -> i64;
}

impl WeightSource for WeightSpec {
    fn draw(&mut self, rng: &mut RngHandle) -> i64 {
        match *self {
            WeightSpec::Constant { value } => value,
            WeightSpec::Uniform { min, max } => rng.gen_range(min..=max),
        }
    }
}

impl<F> WeightSource for F
where
    F: FnMut(&mut RngHandle) -> i64,
{
    fn draw(&mut self, rng: &mut RngHandle) -> i64 {
        self(rng)
    }
}
