//! Schema-agnostic nodes and edges read back from JSONL.

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AggregateError, Error, Result};

/// A record with an `id` plus any other fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericNode {
    /// Node identity; the node is valid only when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Every other field, ordered by name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl GenericNode {
    /// Carries a non-null `id`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.id.as_ref().is_some_and(|v| !v.is_null())
    }

    /// The id as display text.
    #[must_use]
    pub fn id_text(&self) -> Option<String> {
        self.id.as_ref().filter(|v| !v.is_null()).map(scalar_text)
    }
}

/// A record with `from` and `to` plus any other fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericEdge {
    /// Source identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    /// Target identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
    /// Every other field, ordered by name.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl GenericEdge {
    /// Carries both endpoints.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let present = |v: &Option<Value>| v.as_ref().is_some_and(|v| !v.is_null());
        present(&self.from) && present(&self.to)
    }

    /// Endpoints as display text.
    #[must_use]
    pub fn endpoints(&self) -> Option<(String, String)> {
        if !self.is_valid() {
            return None;
        }
        Some((scalar_text(self.from.as_ref()?), scalar_text(self.to.as_ref()?)))
    }
}

/// Nodes and edges in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericGraph {
    /// Valid nodes.
    pub nodes: Vec<GenericNode>,
    /// Valid edges.
    pub edges: Vec<GenericEdge>,
}

/// Strings verbatim, anything else as JSON text.
pub(crate) fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Classifies each line as a node, an edge, both, or neither.
///
/// Blank lines are skipped. A line that is neither, including one that is
/// not valid UTF-8, contributes exactly one error and the scan continues.
///
/// # Errors
///
/// Only a failure to read from `reader` is fatal.
pub fn parse_jsonl<R: BufRead>(reader: R) -> Result<(GenericGraph, AggregateError)> {
    let mut graph = GenericGraph::default();
    let mut errors = AggregateError::new();

    for (idx, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let what = format!("JSONL line {}", idx + 1);

        // Bytes, not `str`: invalid UTF-8 is a parse error for this line only.
        let node = serde_json::from_slice::<GenericNode>(&line);
        let edge = serde_json::from_slice::<GenericEdge>(&line);
        let mut matched = false;

        if let Ok(node) = &node {
            if node.is_valid() {
                graph.nodes.push(node.clone());
                matched = true;
            }
        }
        if let Ok(edge) = edge {
            if edge.is_valid() {
                graph.edges.push(edge);
                matched = true;
            }
        }

        if !matched {
            let err = match node {
                Err(e) => Error::parse(what, e),
                Ok(_) => Error::parse(what, "record has neither id nor from/to"),
            };
            errors.push(err);
        }
    }
    Ok((graph, errors))
}
