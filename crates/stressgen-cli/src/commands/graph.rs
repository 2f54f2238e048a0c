use std::error::Error;

use clap::Args;
use stressgen_cli::CaseBatch;
use stressgen_graph::{GraphFlags, Topology};

use super::{emit, OutputArgs, WeightArgs};

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Number of vertices.
    #[arg(long)]
    pub n: usize,
    /// Number of edges.
    #[arg(long)]
    pub m: usize,
    /// Edges are ordered pairs.
    #[arg(long)]
    pub directed: bool,
    /// No cycles; directed edges follow the order 1..=n.
    #[arg(long)]
    pub acyclic: bool,
    /// The underlying undirected graph is connected.
    #[arg(long)]
    pub connected: bool,
    /// Allow edges from a vertex to itself.
    #[arg(long)]
    pub self_loops: bool,
    /// Allow parallel copies of an edge.
    #[arg(long)]
    pub multi_edges: bool,
    #[command(flatten)]
    pub weights: WeightArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: &GraphArgs) -> Result<(), Box<dyn Error>> {
    let flags = GraphFlags {
        m: args.m,
        directed: args.directed,
        acyclic: args.acyclic,
        connected: args.connected,
        self_loops: args.self_loops,
        multi_edges: args.multi_edges,
    };
    let batch = CaseBatch {
        name: "graph".to_string(),
        topology: Topology::ConstrainedGraph(flags),
        config: args.weights.config(args.n),
        count: args.output.count,
    };
    emit(&batch, &args.output)
}
