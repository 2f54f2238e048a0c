use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use stressgen_cli::BatchPlan;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// YAML plan listing the cases to generate.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory for case files and `manifest.json`.
    #[arg(long)]
    pub out: PathBuf,
    /// Overrides the plan's master seed.
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: &PlanArgs) -> Result<(), Box<dyn Error>> {
    let mut plan = BatchPlan::load(&args.config)?;
    if args.seed.is_some() {
        plan.seed = args.seed;
    }
    plan.run(&args.out)?;
    Ok(())
}
