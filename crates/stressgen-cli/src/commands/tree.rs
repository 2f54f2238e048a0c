use std::error::Error;

use clap::{Args, ValueEnum};
use stressgen_cli::CaseBatch;
use stressgen_graph::Topology;

use super::{emit, OutputArgs, WeightArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TreeShape {
    /// Uniformly random labeled tree.
    Random,
    /// Long trunk with leaves hanging off it.
    Caterpillar,
    /// Up to four path-connected centers, all other vertices attached to them.
    Star,
    /// Star with `--centers` centers.
    StarPath,
    /// Trunk of about sqrt(n) vertices, each carrying a path.
    Comb,
    /// Vertex i hangs off i / 2.
    Binary,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Tree shape to generate.
    #[arg(long, value_enum, default_value_t = TreeShape::Random)]
    pub shape: TreeShape,
    /// Number of vertices.
    #[arg(long)]
    pub n: usize,
    /// Number of centers for `star-path`.
    #[arg(long, required_if_eq("shape", "star-path"))]
    pub centers: Option<usize>,
    #[command(flatten)]
    pub weights: WeightArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

impl TreeArgs {
    fn topology(&self) -> Topology {
        match self.shape {
            TreeShape::Random => Topology::RandomTree,
            TreeShape::Caterpillar => Topology::Caterpillar,
            TreeShape::Star => Topology::Star,
            TreeShape::StarPath => Topology::StarPath {
                centers: self.centers.unwrap_or(1),
            },
            TreeShape::Comb => Topology::Comb,
            TreeShape::Binary => Topology::Binary,
        }
    }
}

pub fn run(args: &TreeArgs) -> Result<(), Box<dyn Error>> {
    let topology = args.topology();
    let batch = CaseBatch {
        name: topology.name().to_string(),
        topology,
        config: args.weights.config(args.n),
        count: args.output.count,
    };
    emit(&batch, &args.output)
}
