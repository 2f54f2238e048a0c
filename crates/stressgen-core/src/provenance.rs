//! Provenance and schema descriptors shared across stressgen artifacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance recorded for every generated test case.
///
/// Replaying `seed` through the same generator and topology reproduces the
/// case byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CaseProvenance {
    /// Label of the case (plan entry name or CLI subcommand).
    pub case: String,
    /// Zero-based index of the case within its batch.
    pub index: u64,
    /// Master seed of the batch.
    pub master_seed: u64,
    /// Seed actually used for this case.
    pub seed: u64,
    /// Canonical content hash of the generated instance.
    pub instance_hash: String,
    /// Version map for all tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
