use sha2::{Digest, Sha256};

use crate::instance::{Instance, InstanceKind};

/// Computes the canonical content hash of an instance.
///
/// The digest covers the kind, size, weighting and the sorted multiset of
/// relabelled edges. It does not depend on render order, so two renders of the
/// same instance share one hash while two seeds almost never do.
pub fn canonical_hash(instance: &Instance) -> String {
    let mut hasher = Sha256::new();
    match instance.kind() {
        InstanceKind::Tree => hasher.update(b"tree"),
        InstanceKind::Graph { directed: true } => hasher.update(b"graph:directed"),
        InstanceKind::Graph { directed: false } => hasher.update(b"graph:undirected"),
    }
    hasher.update((instance.n() as u64).to_le_bytes());
    if instance.is_weighted() {
        hasher.update(b"weighted");
    } else {
        hasher.update(b"unweighted");
    }

    let edges = instance.labelled_edges();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (u, v, weight) in edges {
        hasher.update((u as u64).to_le_bytes());
        hasher.update((v as u64).to_le_bytes());
        if instance.is_weighted() {
            hasher.update(weight.to_le_bytes());
        }
    }

    format!("{:x}", hasher.finalize())
}
