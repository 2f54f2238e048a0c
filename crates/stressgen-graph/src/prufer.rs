//! Prüfer-sequence decoding into labeled trees.

use rand::Rng;
use stressgen_core::errors::{ErrorInfo, GenError};
use stressgen_core::rng::RngHandle;

/// Decodes a Prüfer code over indices `0..n` into the `n - 1` edges of the
/// tree it encodes, using 1-based vertex ids.
///
/// Runs in `O(n)`: instead of searching for the smallest leaf after every
/// step, a scan pointer only moves forward, and a vertex that becomes a leaf
/// below the pointer is consumed immediately.
pub fn decode_prufer(code: &[usize], n: usize) -> Result<Vec<(usize, usize)>, GenError> {
    if n == 0 {
        return Err(GenError::invalid_size(
            "empty-structure",
            "a tree needs at least one vertex",
        ));
    }
    if n == 1 {
        if !code.is_empty() {
            return Err(code_length_error(code.len(), n));
        }
        return Ok(Vec::new());
    }
    if code.len() != n - 2 {
        return Err(code_length_error(code.len(), n));
    }
    if let Some(&bad) = code.iter().find(|&&value| value >= n) {
        return Err(GenError::InvalidParameters(
            ErrorInfo::new("prufer-value-out-of-range", "code value is not a vertex index")
                .with_context("value", bad)
                .with_context("n", n),
        ));
    }

    let mut degree = vec![1usize; n];
    for &value in code {
        degree[value] += 1;
    }

    let mut ptr = 0;
    while degree[ptr] != 1 {
        ptr += 1;
    }
    let mut leaf = ptr;

    let mut edges = Vec::with_capacity(n - 1);
    for &value in code {
        edges.push((leaf + 1, value + 1));
        degree[value] -= 1;
        if degree[value] == 1 && value < ptr {
            leaf = value;
        } else {
            ptr += 1;
            while degree[ptr] != 1 {
                ptr += 1;
            }
            leaf = ptr;
        }
    }
    edges.push((leaf + 1, n));
    Ok(edges)
}

/// Draws a uniformly random Prüfer code for a tree on `n` vertices.
pub fn random_code(n: usize, rng: &mut RngHandle) -> Vec<usize> {
    (0..n.saturating_sub(2)).map(|_| rng.gen_range(0..n)).collect()
}

/// Edges of a uniformly random labeled tree on `1..=n`.
pub(crate) fn random_tree_edges(
    n: usize,
    rng: &mut RngHandle,
) -> Result<Vec<(usize, usize)>, GenError> {
    let code = random_code(n, rng);
    decode_prufer(&code, n)
}

fn code_length_error(len: usize, n: usize) -> GenError {
    GenError::InvalidParameters(
        ErrorInfo::new("prufer-length", "code length must be n - 2")
            .with_context("len", len)
            .with_context("n", n),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_vertex_has_no_edges() {
        assert!(decode_prufer(&[], 1).unwrap().is_empty());
    }

    #[test]
    fn two_vertices_share_one_edge() {
        assert_eq!(decode_prufer(&[], 2).unwrap(), vec![(1, 2)]);
    }

    #[test]
    fn decodes_textbook_example() {
        // Code (4, 4, 4, 5) over vertices 1..=6, written 0-based.
        let edges = decode_prufer(&[3, 3, 3, 4], 6).unwrap();
        assert_eq!(edges, vec![(1, 4), (2, 4), (3, 4), (4, 5), (5, 6)]);
    }

    #[test]
    fn reuses_leaf_below_pointer() {
        // Vertex 1 (index 0) becomes a leaf after its single appearance and is
        // smaller than the scan pointer, so it is consumed next.
        let edges = decode_prufer(&[0, 2], 4).unwrap();
        assert_eq!(edges, vec![(2, 1), (1, 3), (3, 4)]);
    }

    #[test]
    fn star_code_produces_star() {
        let edges = decode_prufer(&[0, 0, 0], 5).unwrap();
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|&(a, b)| a == 1 || b == 1));
    }

    #[test]
    fn rejects_malformed_codes() {
        assert_eq!(decode_prufer(&[0], 4).unwrap_err().code(), "prufer-length");
        assert_eq!(
            decode_prufer(&[4, 0], 4).unwrap_err().code(),
            "prufer-value-out-of-range"
        );
        assert!(matches!(
            decode_prufer(&[], 0).unwrap_err(),
            GenError::InvalidSize(_)
        ));
    }

    #[test]
    fn random_codes_have_expected_shape() {
        let mut rng = RngHandle::from_seed(5);
        assert!(random_code(1, &mut rng).is_empty());
        assert!(random_code(2, &mut rng).is_empty());
        let code = random_code(40, &mut rng);
        assert_eq!(code.len(), 38);
        assert!(code.iter().all(|&value| value < 40));
    }
}
