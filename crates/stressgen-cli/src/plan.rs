//! YAML batch plans.
//!
//! ```yaml
//! seed: 42
//! cases:
//!   - name: small-trees
//!     topology: { kind: random-tree }
//!     n: 10
//!     count: 3
//!   - name: dags
//!     topology: { kind: constrained-graph, m: 40, directed: true, acyclic: true }
//!     n: 12
//!     weights: { kind: uniform, min: -5, max: 5 }
//! ```
//!
//! Entry `i` draws its cases from substream `i` of the master seed, so adding
//! an entry at the end never changes the earlier ones.

use std::collections::BTreeSet;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stressgen_core::errors::GenError;
use stressgen_core::rng::RngHandle;
use stressgen_graph::{GenerationConfig, Topology, WeightSpec};
use tracing::info;

use crate::batch::{write_cases, write_manifest, BatchManifest, CaseBatch, OutputFormat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPlan {
    /// Master seed; drawn from the clock when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub format: OutputFormat,
    pub cases: Vec<PlanCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCase {
    pub name: String,
    pub topology: Topology,
    pub n: usize,
    /// Edges are weighted exactly when a distribution is given.
    #[serde(default)]
    pub weights: Option<WeightSpec>,
    #[serde(default = "default_count")]
    pub count: u64,
}

fn default_count() -> u64 {
    1
}

impl PlanCase {
    fn to_batch(&self) -> CaseBatch {
        let config = match self.weights {
            Some(weights) => GenerationConfig::new(self.n).with_weights(weights),
            None => GenerationConfig::new(self.n),
        };
        CaseBatch {
            name: self.name.clone(),
            topology: self.topology.clone(),
            config,
            count: self.count,
        }
    }
}

impl BatchPlan {
    pub fn from_yaml(text: &str) -> Result<Self, Box<dyn Error>> {
        let plan: BatchPlan = serde_yaml::from_str(text)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Case names become file name prefixes, so they must be unique and
    /// free of path separators.
    pub fn validate(&self) -> Result<(), GenError> {
        let mut names = BTreeSet::new();
        for case in &self.cases {
            let name = case.name.as_str();
            if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(GenError::invalid_parameters(
                    "plan-case-name",
                    "case names must be plain file name prefixes",
                )
                .with_context("name", name));
            }
            if !names.insert(name) {
                return Err(
                    GenError::invalid_parameters("plan-duplicate-case", "case names must be unique")
                        .with_context("name", name),
                );
            }
        }
        Ok(())
    }

    /// Generates every case, writes it under `out` and returns the manifest
    /// that was written alongside.
    ///
    /// Nothing is written unless every entry generates successfully.
    pub fn run(&self, out: &Path) -> Result<BatchManifest, Box<dyn Error>> {
        self.validate()?;
        let master = RngHandle::initialize(self.seed);
        info!(master_seed = master.seed(), entries = self.cases.len(), "running plan");

        let mut generated = Vec::with_capacity(self.cases.len());
        for (entry, case) in self.cases.iter().enumerate() {
            let stream = master.substream(entry as u64);
            generated.push(case.to_batch().generate(&stream, master.seed())?);
        }

        fs::create_dir_all(out)?;
        let mut manifest = BatchManifest::new(master.seed(), self.format);
        for cases in &generated {
            write_cases(out, cases, self.format, &mut manifest)?;
        }
        write_manifest(out, &manifest)?;
        Ok(manifest)
    }
}
