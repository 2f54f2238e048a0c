use rand::Rng;
use stressgen_core::errors::{ErrorInfo, GenError};
use stressgen_core::rng::RngHandle;

use crate::flags::{WeightSource, NOISE};
use crate::prufer::random_tree_edges;
use crate::store::EdgeStore;

/// Mutable state shared by every topology strategy: the store being filled,
/// the weight source and the randomness stream.
pub(crate) struct EdgeBuilder<'a> {
    store: EdgeStore,
    weights: &'a mut dyn WeightSource,
    rng: &'a mut RngHandle,
}

impl<'a> EdgeBuilder<'a> {
    pub(crate) fn new(
        store: EdgeStore,
        weights: &'a mut dyn WeightSource,
        rng: &'a mut RngHandle,
    ) -> Self {
        Self {
            store,
            weights,
            rng,
        }
    }

    /// Inserts `(u, v)`, drawing a weight if the key is new.
    pub(crate) fn connect(&mut self, u: usize, v: usize) {
        let weights = &mut *self.weights;
        let rng = &mut *self.rng;
        self.store.add_edge(u, v, || weights.draw(rng));
    }

    pub(crate) fn rng(&mut self) -> &mut RngHandle {
        &mut *self.rng
    }

    pub(crate) fn store(&self) -> &EdgeStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut EdgeStore {
        &mut self.store
    }

    pub(crate) fn finish(self) -> EdgeStore {
        self.store
    }
}

/// Uniformly random labeled tree.
pub(crate) fn random_tree(builder: &mut EdgeBuilder<'_>, n: usize) -> Result<(), GenError> {
    for (u, v) in random_tree_edges(n, builder.rng())? {
        builder.connect(u, v);
    }
    Ok(())
}

/// Trunk `1..=t` with `t` uniform in `[ceil(n / 2), n]`; the rest hang off
/// uniformly chosen trunk vertices.
pub(crate) fn caterpillar(builder: &mut EdgeBuilder<'_>, n: usize) {
    let trunk_len = builder.rng().gen_range((n + 1) / 2..=n);
    path(builder, trunk_len);
    for vertex in trunk_len + 1..=n {
        let anchor = builder.rng().gen_range(1..=trunk_len);
        builder.connect(vertex, anchor);
    }
}

/// Between one and [`NOISE`] centers.
pub(crate) fn star(builder: &mut EdgeBuilder<'_>, n: usize) {
    let centers = builder.rng().gen_range(1..=n.min(NOISE));
    attach_to_centers(builder, n, centers);
}

/// Star with an explicit number of centers.
pub(crate) fn star_path(
    builder: &mut EdgeBuilder<'_>,
    n: usize,
    centers: usize,
) -> Result<(), GenError> {
    check_star_centers(n, centers)?;
    attach_to_centers(builder, n, centers);
    Ok(())
}

pub(crate) fn check_star_centers(n: usize, centers: usize) -> Result<(), GenError> {
    if centers == 0 || centers > n {
        return Err(GenError::InvalidSize(
            ErrorInfo::new("star-centers", "center count must lie in 1..=n")
                .with_context("centers", centers)
                .with_context("n", n),
        ));
    }
    Ok(())
}

fn attach_to_centers(builder: &mut EdgeBuilder<'_>, n: usize, centers: usize) {
    path(builder, centers);
    for vertex in centers + 1..=n {
        let center = builder.rng().gen_range(1..=centers);
        builder.connect(vertex, center);
    }
}

/// Trunk of about `sqrt(n)` vertices; the remaining vertices are laid out as
/// one path per trunk vertex, each of about `sqrt(n)` vertices. The last trunk
/// vertex takes whatever is left.
pub(crate) fn comb(builder: &mut EdgeBuilder<'_>, n: usize) {
    let trunk_len = approx_sqrt(n, builder.rng()).clamp(1, n);
    path(builder, trunk_len);

    let mut branch_node = 1;
    let mut branch_len = 0;
    let mut target = approx_sqrt(n, builder.rng()).max(1);
    for vertex in trunk_len + 1..=n {
        if branch_len >= target && branch_node < trunk_len {
            branch_node += 1;
            branch_len = 0;
            target = approx_sqrt(n, builder.rng()).max(1);
        }
        if branch_len == 0 {
            builder.connect(branch_node, vertex);
        } else {
            builder.connect(vertex - 1, vertex);
        }
        branch_len += 1;
    }
}

/// Vertex `i` hangs off `i / 2`, giving depth `O(log n)`.
pub(crate) fn binary(builder: &mut EdgeBuilder<'_>, n: usize) {
    for vertex in 2..=n {
        builder.connect(vertex, vertex / 2);
    }
}

/// Connects `1..=len` as a path.
fn path(builder: &mut EdgeBuilder<'_>, len: usize) {
    for vertex in 2..=len {
        builder.connect(vertex, vertex - 1);
    }
}

/// `floor(sqrt(n))`, shifted by up to [`NOISE`] in either direction when the
/// shifted value is guaranteed to stay within `1..n`.
pub(crate) fn approx_sqrt(n: usize, rng: &mut RngHandle) -> usize {
    let root = isqrt(n);
    if root > NOISE && root + NOISE < n {
        let low = root - NOISE;
        let high = root + NOISE;
        rng.gen_range(low..=high)
    } else {
        root
    }
}

fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
