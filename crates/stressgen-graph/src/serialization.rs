use std::fmt::Write as _;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use stressgen_core::errors::{ErrorInfo, GenError};
use stressgen_core::provenance::SchemaVersion;
use stressgen_core::rng::RngHandle;

use crate::ids::{in_range, EdgeKey};
use crate::instance::{Instance, InstanceKind};
use crate::permutation::Permutation;
use crate::store::{EdgeRecord, EdgeStore};

/// Schema version written into JSON and binary payloads.
pub const INSTANCE_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

pub(crate) fn render_text(instance: &Instance, rng: &mut RngHandle) -> String {
    let mut out = match instance.kind {
        InstanceKind::Tree => format!("{}", instance.n),
        InstanceKind::Graph { .. } => format!("{} {}", instance.n, instance.m()),
    };

    let mut occurrences: Vec<(EdgeKey, i64)> = instance
        .edges
        .iter()
        .flat_map(|(key, record)| std::iter::repeat((key, record.weight)).take(record.count))
        .collect();
    occurrences.shuffle(rng);
    let directed = instance.is_directed();
    for (key, weight) in occurrences {
        let (u, v) = if !directed && rng.gen_bool(0.5) {
            (key.v, key.u)
        } else {
            (key.u, key.v)
        };
        let _ = write!(
            out,
            "\n{} {}",
            instance.permutation.apply(u),
            instance.permutation.apply(v)
        );
        if instance.weighted {
            let _ = write!(out, " {weight}");
        }
    }
    out
}

/// Which header layout [`parse_text`] expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Header `n`, followed by exactly `n - 1` edges.
    Tree,
    /// Header `n m`, followed by exactly `m` edges.
    Graph,
}

/// One edge line of a parsed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedEdge {
    /// First printed endpoint.
    pub u: usize,
    /// Second printed endpoint.
    pub v: usize,
    /// Trailing weight, present on every line or on none.
    pub weight: Option<i64>,
}

/// Structure recovered from the text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInstance {
    /// Number of vertices.
    pub n: usize,
    /// Number of edges announced by the header (`n - 1` for trees).
    pub m: usize,
    /// Edge lines in file order.
    pub edges: Vec<ParsedEdge>,
}

impl ParsedInstance {
    /// Returns whether the edges carry weights.
    pub fn is_weighted(&self) -> bool {
        self.edges.first().is_some_and(|edge| edge.weight.is_some())
    }
}

/// Parses the text format produced by [`Instance::to_text`].
pub fn parse_text(text: &str, kind: TextKind) -> Result<ParsedInstance, GenError> {
    let mut lines = text.lines().enumerate().filter(|(_, line)| !line.trim().is_empty());
    let (_, header) = lines
        .next()
        .ok_or_else(|| parse_error("missing-header", "input is empty", 0))?;
    let header: Vec<&str> = header.split_whitespace().collect();
    let (n, m) = match (kind, header.as_slice()) {
        (TextKind::Tree, [n]) => {
            let n = parse_usize(n, 1)?;
            (n, n.saturating_sub(1))
        }
        (TextKind::Graph, [n, m]) => (parse_usize(n, 1)?, parse_usize(m, 1)?),
        _ => {
            return Err(parse_error("bad-header", "header has the wrong arity", 1)
                .with_context("tokens", header.len()))
        }
    };
    if n == 0 {
        return Err(parse_error("bad-header", "vertex count must be positive", 1));
    }

    let mut edges = Vec::with_capacity(m);
    let mut weighted = None;
    for (idx, line) in lines {
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let edge = match tokens.as_slice() {
            [u, v] => ParsedEdge {
                u: parse_usize(u, line_no)?,
                v: parse_usize(v, line_no)?,
                weight: None,
            },
            [u, v, w] => ParsedEdge {
                u: parse_usize(u, line_no)?,
                v: parse_usize(v, line_no)?,
                weight: Some(w.parse::<i64>().map_err(|err| {
                    parse_error("bad-weight", err.to_string(), line_no).with_context("token", w)
                })?),
            },
            _ => {
                return Err(parse_error("bad-edge", "edge lines hold two or three tokens", line_no))
            }
        };
        if !in_range(edge.u, n) || !in_range(edge.v, n) {
            return Err(parse_error("label-out-of-range", "endpoint is not in 1..=n", line_no)
                .with_context("n", n));
        }
        let has_weight = edge.weight.is_some();
        if *weighted.get_or_insert(has_weight) != has_weight {
            return Err(parse_error(
                "mixed-weights",
                "either every edge carries a weight or none does",
                line_no,
            ));
        }
        edges.push(edge);
    }

    if edges.len() != m {
        return Err(GenError::Serde(
            ErrorInfo::new("edge-count-mismatch", "number of edge lines differs from header")
                .with_context("expected", m)
                .with_context("found", edges.len()),
        ));
    }
    Ok(ParsedInstance { n, m, edges })
}

fn parse_usize(token: &str, line: usize) -> Result<usize, GenError> {
    token.parse::<usize>().map_err(|err| {
        parse_error("bad-integer", err.to_string(), line).with_context("token", token)
    })
}

fn parse_error(code: &str, message: impl Into<String>, line: usize) -> GenError {
    GenError::serde(code, message).with_context("line", line)
}

/// Serializes the instance to a compact binary representation using `bincode`.
pub fn instance_to_bytes(instance: &Instance) -> Result<Vec<u8>, GenError> {
    let serializable = SerializableInstance::from_instance(instance);
    bincode::serialize(&serializable)
        .map_err(|err| GenError::serde("serialize-bytes", err.to_string()))
}

/// Restores an instance from its binary representation.
pub fn instance_from_bytes(bytes: &[u8]) -> Result<Instance, GenError> {
    let serializable: SerializableInstance = bincode::deserialize(bytes)
        .map_err(|err| GenError::serde("deserialize-bytes", err.to_string()))?;
    serializable.into_instance()
}

/// Serializes the instance to a JSON string.
pub fn instance_to_json(instance: &Instance) -> Result<String, GenError> {
    let serializable = SerializableInstance::from_instance(instance);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| GenError::serde("serialize-json", err.to_string()))
}

/// Restores an instance from a JSON string.
pub fn instance_from_json(json: &str) -> Result<Instance, GenError> {
    let serializable: SerializableInstance = serde_json::from_str(json)
        .map_err(|err| GenError::serde("deserialize-json", err.to_string()))?;
    serializable.into_instance()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableInstance {
    schema_version: SchemaVersion,
    kind: InstanceKind,
    n: usize,
    weighted: bool,
    permutation: Vec<usize>,
    edges: Vec<SerializableEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableEdge {
    u: usize,
    v: usize,
    count: usize,
    weight: i64,
}

impl SerializableInstance {
    fn from_instance(instance: &Instance) -> Self {
        let edges = instance
            .edges
            .iter()
            .map(|(key, record)| SerializableEdge {
                u: key.u,
                v: key.v,
                count: record.count,
                weight: record.weight,
            })
            .collect();
        Self {
            schema_version: INSTANCE_SCHEMA,
            kind: instance.kind,
            n: instance.n,
            weighted: instance.weighted,
            permutation: instance.permutation.as_slice().to_vec(),
            edges,
        }
    }

    fn into_instance(self) -> Result<Instance, GenError> {
        if self.schema_version.major != INSTANCE_SCHEMA.major {
            return Err(GenError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported instance schema")
                    .with_context("found", self.schema_version.major)
                    .with_context("expected", INSTANCE_SCHEMA.major),
            ));
        }
        let permutation = Permutation::from_labels(self.permutation)?;
        if permutation.len() != self.n {
            return Err(GenError::Serde(
                ErrorInfo::new("permutation-size", "permutation does not cover n vertices")
                    .with_context("n", self.n)
                    .with_context("len", permutation.len()),
            ));
        }
        let directed = matches!(self.kind, InstanceKind::Graph { directed: true });
        let mut edges = if directed {
            EdgeStore::directed()
        } else {
            EdgeStore::undirected()
        };
        for edge in self.edges {
            if !in_range(edge.u, self.n) || !in_range(edge.v, self.n) || edge.count == 0 {
                return Err(GenError::Serde(
                    ErrorInfo::new("invalid-edge", "edge endpoints or count are out of range")
                        .with_context("edge", EdgeKey::directed(edge.u, edge.v))
                        .with_context("count", edge.count),
                ));
            }
            let key = edges.key(edge.u, edge.v);
            if edges.get(&key).is_some() {
                return Err(GenError::serde("duplicate-edge", "edge key is listed twice")
                    .with_context("edge", key));
            }
            edges.insert_record(
                key,
                EdgeRecord {
                    count: edge.count,
                    weight: edge.weight,
                },
            );
        }
        if self.kind == InstanceKind::Tree {
            check_tree(self.n, &edges)?;
        }
        Ok(Instance {
            kind: self.kind,
            n: self.n,
            weighted: self.weighted,
            permutation,
            edges,
        })
    }
}

/// A tree payload must hold `n - 1` simple edges without a cycle, which also
/// makes it connected.
fn check_tree(n: usize, edges: &EdgeStore) -> Result<(), GenError> {
    if n == 0 || edges.total_len() != n - 1 {
        return Err(GenError::serde("tree-edge-count", "a tree has exactly n - 1 edges")
            .with_context("n", n)
            .with_context("edges", edges.total_len()));
    }
    let mut parent: Vec<usize> = (0..=n).collect();
    for (key, record) in edges.iter() {
        if key.is_loop() || record.count != 1 {
            return Err(GenError::serde("tree-not-simple", "tree edges are loop-free and unique")
                .with_context("edge", key)
                .with_context("count", record.count));
        }
        let (a, b) = (find_root(&mut parent, key.u), find_root(&mut parent, key.v));
        if a == b {
            return Err(GenError::serde("tree-cycle", "tree edges close a cycle")
                .with_context("edge", key));
        }
        parent[a] = b;
    }
    Ok(())
}

fn find_root(parent: &mut [usize], mut vertex: usize) -> usize {
    while parent[vertex] != vertex {
        parent[vertex] = parent[parent[vertex]];
        vertex = parent[vertex];
    }
    vertex
}
