use rand::seq::SliceRandom;
use stressgen_core::errors::{ErrorInfo, GenError};
use stressgen_core::rng::RngHandle;

/// Bijection from canonical vertex ids `1..=n` to the labels that get printed.
///
/// Slot 0 is a sentinel mapping to 0 so canonical ids index the table directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    labels: Vec<usize>,
}

impl Permutation {
    /// Identity labelling.
    pub fn identity(n: usize) -> Self {
        Self {
            labels: (0..=n).collect(),
        }
    }

    /// Uniformly random labelling obtained by shuffling the identity.
    pub fn random(n: usize, rng: &mut RngHandle) -> Self {
        let mut labels: Vec<usize> = (1..=n).collect();
        labels.shuffle(rng);
        labels.insert(0, 0);
        Self { labels }
    }

    /// Rebuilds a permutation from its label table (sentinel included).
    pub fn from_labels(labels: Vec<usize>) -> Result<Self, GenError> {
        let candidate = Self { labels };
        if !candidate.is_bijection() {
            return Err(GenError::Serde(
                ErrorInfo::new("invalid-permutation", "labels are not a bijection on 1..=n")
                    .with_context("len", candidate.labels.len()),
            ));
        }
        Ok(candidate)
    }

    /// Number of permuted vertices.
    pub fn len(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    /// Returns whether the permutation covers no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label printed for canonical vertex `vertex`.
    ///
    /// # Panics
    ///
    /// Panics when `vertex > n`.
    pub fn apply(&self, vertex: usize) -> usize {
        self.labels[vertex]
    }

    /// Inverse mapping, from printed labels back to canonical ids.
    pub fn inverse(&self) -> Self {
        let mut labels = vec![0; self.labels.len()];
        for (vertex, label) in self.labels.iter().enumerate() {
            labels[*label] = vertex;
        }
        Self { labels }
    }

    /// Label table including the sentinel slot.
    pub fn as_slice(&self) -> &[usize] {
        &self.labels
    }

    /// Checks that slot 0 is the sentinel and slots `1..=n` hold each of
    /// `1..=n` exactly once.
    pub fn is_bijection(&self) -> bool {
        let Some((&sentinel, rest)) = self.labels.split_first() else {
            return false;
        };
        if sentinel != 0 {
            return false;
        }
        let mut seen = vec![false; rest.len() + 1];
        for &label in rest {
            if label == 0 || label > rest.len() || seen[label] {
                return false;
            }
            seen[label] = true;
        }
        true
    }
}
