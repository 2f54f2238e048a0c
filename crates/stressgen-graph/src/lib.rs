#![deny(missing_docs)]

//! Randomized trees and graphs for stress-testing algorithm implementations.
//!
//! A [`Topology`] and a [`GenerationConfig`] describe what to build;
//! [`generate`] draws everything from a caller-owned [`RngHandle`] and returns
//! an [`Instance`] that renders to the usual competitive-programming text
//! format:
//!
//! ```
//! use stressgen_core::RngHandle;
//! use stressgen_graph::{generate, GenerationConfig, Topology};
//!
//! let mut rng = RngHandle::from_seed(7);
//! let tree = generate(&Topology::Binary, &GenerationConfig::new(7), &mut rng).unwrap();
//! let text = tree.to_text(&mut rng);
//! assert_eq!(text.lines().count(), 7);
//! ```
//!
//! [`RngHandle`]: stressgen_core::RngHandle

mod assembler;
mod flags;
mod generators;
mod hash;
mod ids;
mod instance;
mod permutation;
mod prufer;
mod serialization;
mod store;

pub use flags::{GenerationConfig, GraphFlags, Topology, WeightSource, WeightSpec, NOISE};
pub use hash::canonical_hash;
pub use ids::EdgeKey;
pub use instance::{generate, generate_with, Instance, InstanceKind};
pub use permutation::Permutation;
pub use prufer::{decode_prufer, random_code};
pub use store::{EdgeRecord, EdgeStore};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{
    instance_from_bytes, instance_from_json, instance_to_bytes, instance_to_json, parse_text,
    ParsedEdge, ParsedInstance, TextKind, INSTANCE_SCHEMA,
};
