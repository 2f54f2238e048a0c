pub mod graph;
pub mod plan;
pub mod tree;

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Args;
use stressgen_cli::batch::{print_cases, write_cases, write_manifest};
use stressgen_cli::{BatchManifest, CaseBatch, OutputFormat};
use stressgen_core::rng::RngHandle;
use stressgen_graph::{GenerationConfig, WeightSpec};
use tracing::info;

const DEFAULT_WEIGHT_MIN: i64 = 1;
const DEFAULT_WEIGHT_MAX: i64 = 1_000_000_000;

#[derive(Args, Debug)]
pub struct WeightArgs {
    /// Attach a uniformly drawn weight to every edge.
    #[arg(long)]
    pub weighted: bool,
    /// Smallest weight (implies --weighted).
    #[arg(long, allow_hyphen_values = true)]
    pub weight_min: Option<i64>,
    /// Largest weight (implies --weighted).
    #[arg(long, allow_hyphen_values = true)]
    pub weight_max: Option<i64>,
}

impl WeightArgs {
    pub fn config(&self, n: usize) -> GenerationConfig {
        if !self.weighted && self.weight_min.is_none() && self.weight_max.is_none() {
            return GenerationConfig::new(n);
        }
        GenerationConfig::new(n).with_weights(WeightSpec::Uniform {
            min: self.weight_min.unwrap_or(DEFAULT_WEIGHT_MIN),
            max: self.weight_max.unwrap_or(DEFAULT_WEIGHT_MAX),
        })
    }
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Master seed; drawn from the clock when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Rebuild the single case whose seed a manifest recorded.
    #[arg(long, conflicts_with_all = ["seed", "count"])]
    pub case_seed: Option<u64>,
    /// Number of cases to generate.
    #[arg(long, default_value_t = 1)]
    pub count: u64,
    /// Directory for `<name>_<index>` files and `manifest.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Judge input text, or the full instance as JSON.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Generates `batch` and either prints it or writes it under `--out`.
pub fn emit(batch: &CaseBatch, output: &OutputArgs) -> Result<(), Box<dyn Error>> {
    let (master_seed, cases) = match output.case_seed {
        Some(seed) => {
            info!(case = %batch.name, seed, "replaying case");
            (seed, vec![batch.replay(seed)?])
        }
        None => {
            let master = RngHandle::initialize(output.seed);
            info!(
                case = %batch.name,
                master_seed = master.seed(),
                count = batch.count,
                "generating"
            );
            (master.seed(), batch.generate(&master, master.seed())?)
        }
    };
    match &output.out {
        Some(out) => {
            let mut manifest = BatchManifest::new(master_seed, output.format);
            write_cases(out, &cases, output.format, &mut manifest)?;
            write_manifest(out, &manifest)?;
        }
        None => print_cases(io::stdout().lock(), &cases, output.format)?,
    }
    Ok(())
}
