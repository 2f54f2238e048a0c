#![deny(missing_docs)]
#![doc = "Shared error taxonomy, seeding policy and provenance types for stressgen."]

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, GenError};
pub use provenance::{CaseProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
