use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of an edge in an [`EdgeStore`](crate::EdgeStore).
///
/// Undirected keys are always stored with `u <= v`; directed keys keep the
/// orientation they were inserted with. Vertices are canonical ids in `1..=n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    /// First endpoint (the source for directed keys).
    pub u: usize,
    /// Second endpoint (the target for directed keys).
    pub v: usize,
}

impl EdgeKey {
    /// Canonical undirected key `(min(a, b), max(a, b))`.
    pub fn undirected(a: usize, b: usize) -> Self {
        if a <= b {
            Self { u: a, v: b }
        } else {
            Self { u: b, v: a }
        }
    }

    /// Directed key `a -> b`.
    pub fn directed(a: usize, b: usize) -> Self {
        Self { u: a, v: b }
    }

    /// Returns whether both endpoints coincide.
    pub fn is_loop(&self) -> bool {
        self.u == self.v
    }

    /// Returns the endpoint opposite to `vertex`, if `vertex` is incident.
    pub fn other(&self, vertex: usize) -> Option<usize> {
        if self.u == vertex {
            Some(self.v)
        } else if self.v == vertex {
            Some(self.u)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

/// Returns whether `vertex` is a canonical id for a structure of size `n`.
pub(crate) fn in_range(vertex: usize, n: usize) -> bool {
    (1..=n).contains(&vertex)
}
