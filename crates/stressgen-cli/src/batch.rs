use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use stressgen_core::errors::GenError;
use stressgen_core::provenance::{CaseProvenance, SchemaVersion};
use stressgen_core::rng::RngHandle;
use stressgen_graph::{
    canonical_hash, generate, instance_to_json, GenerationConfig, Instance, Topology,
};
use tracing::{debug, info};

/// How generated cases are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Line-oriented judge input.
    #[default]
    Text,
    /// Full instance payload, permutation included.
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// `count` instances of one topology, each on its own substream.
#[derive(Debug, Clone)]
pub struct CaseBatch {
    /// Prefix of every file name in the batch.
    pub name: String,
    pub topology: Topology,
    pub config: GenerationConfig,
    pub count: u64,
}

/// One generated case together with its rendering and provenance.
#[derive(Debug, Clone)]
pub struct GeneratedCase {
    pub provenance: CaseProvenance,
    pub instance: Instance,
    pub text: String,
}

impl GeneratedCase {
    /// File name under the output directory, e.g. `trees_3.txt`.
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!(
            "{}_{}.{}",
            self.provenance.case,
            self.provenance.index,
            format.extension()
        )
    }

    fn payload(&self, format: OutputFormat) -> Result<String, GenError> {
        match format {
            OutputFormat::Text => Ok(self.text.clone()),
            OutputFormat::Json => instance_to_json(&self.instance),
        }
    }
}

impl CaseBatch {
    /// Generates every case of the batch.
    ///
    /// Case `i` is built and rendered from `stream.substream(i)`, so its seed
    /// alone reproduces it through [`CaseBatch::replay`]. `master_seed` is
    /// only recorded.
    pub fn generate(
        &self,
        stream: &RngHandle,
        master_seed: u64,
    ) -> Result<Vec<GeneratedCase>, GenError> {
        let mut cases = Vec::with_capacity(self.count as usize);
        for index in 0..self.count {
            cases.push(self.build(index, stream.substream(index), master_seed)?);
        }
        Ok(cases)
    }

    /// Rebuilds a single case from the per-case seed recorded in a manifest.
    pub fn replay(&self, seed: u64) -> Result<GeneratedCase, GenError> {
        self.build(0, RngHandle::from_seed(seed), seed)
    }

    fn build(
        &self,
        index: u64,
        mut rng: RngHandle,
        master_seed: u64,
    ) -> Result<GeneratedCase, GenError> {
        let seed = rng.seed();
        let instance = generate(&self.topology, &self.config, &mut rng)?;
        let text = instance.to_text(&mut rng);
        let provenance = CaseProvenance {
            case: self.name.clone(),
            index,
            master_seed,
            seed,
            instance_hash: canonical_hash(&instance),
            tool_versions: tool_versions(),
        };
        debug!(case = %self.name, index, seed, m = instance.m(), "generated case");
        Ok(GeneratedCase {
            provenance,
            instance,
            text,
        })
    }
}

/// Provenance for a set of generated cases, written as `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchManifest {
    pub schema_version: SchemaVersion,
    pub master_seed: u64,
    pub format: OutputFormat,
    /// One entry per written case, in write order.
    pub cases: Vec<CaseProvenance>,
}

impl BatchManifest {
    pub fn new(master_seed: u64, format: OutputFormat) -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            master_seed,
            format,
            cases: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let manifest = serde_json::from_str(&fs::read_to_string(path)?)?;
        Ok(manifest)
    }
}

/// Writes each case to its own file under `out` and records it in `manifest`.
pub fn write_cases(
    out: &Path,
    cases: &[GeneratedCase],
    format: OutputFormat,
    manifest: &mut BatchManifest,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    fs::create_dir_all(out)?;
    let mut written = Vec::with_capacity(cases.len());
    for case in cases {
        let path = out.join(case.file_name(format));
        fs::write(&path, case.payload(format)?)?;
        manifest.cases.push(case.provenance.clone());
        written.push(path);
    }
    Ok(written)
}

/// Prints cases separated by a blank line.
pub fn print_cases<W: Write>(
    mut writer: W,
    cases: &[GeneratedCase],
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    for (idx, case) in cases.iter().enumerate() {
        if idx > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "{}", case.payload(format)?)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_manifest(out: &Path, manifest: &BatchManifest) -> Result<PathBuf, Box<dyn Error>> {
    let path = out.join("manifest.json");
    fs::write(&path, serde_json::to_string_pretty(manifest)?)?;
    info!(
        path = %path.display(),
        cases = manifest.cases.len(),
        master_seed = manifest.master_seed,
        "wrote manifest"
    );
    Ok(path)
}

fn tool_versions() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "stressgen".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    )])
}
