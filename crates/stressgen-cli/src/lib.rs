//! Batch generation and on-disk layout behind the `stressgen` binary.

pub mod batch;
pub mod plan;

pub use batch::{BatchManifest, CaseBatch, GeneratedCase, OutputFormat};
pub use plan::{BatchPlan, PlanCase};
