//! Graph data models and their line-delimited JSON form.
//!
//! [`Graph`] is the typed output of collection. [`generic::GenericGraph`] is
//! the schema-agnostic view the renderers consume.

pub mod generic;
pub mod input;

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::collector::ModuleStats;
use crate::error::Result;

pub use generic::{parse_jsonl, GenericEdge, GenericGraph, GenericNode};
pub use input::{parse_mod_graph, ModGraph};

/// Directed dependency between two module identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Dependent module.
    pub from: String,
    /// Dependency.
    pub to: String,
}

/// Enriched modules in input order, followed by edges in input order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// One record per input node.
    pub modules: Vec<ModuleStats>,
    /// Edges copied from the input.
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Writes nodes, then edges, one JSON object per line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_jsonl<W: Write>(&self, w: &mut W) -> Result<()> {
        for module in &self.modules {
            write_record(w, module)?;
        }
        for edge in &self.edges {
            write_record(w, edge)?;
        }
        Ok(())
    }
}

/// Writes one JSONL record. Every writer path goes through here so streamed
/// and materialized output are byte-identical.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_record<W: Write, T: Serialize>(w: &mut W, record: &T) -> Result<()> {
    serde_json::to_writer(&mut *w, record)?;
    w.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn edge(from: &str, to: &str) -> Edge {
        Edge { from: from.into(), to: to.into() }
    }

    fn sample_graph() -> Graph {
        let mut a = ModuleStats::new("example.com/a");
        a.github = Some(crate::sources::GitHubStats { repo_stars: 7 });
        let b = ModuleStats::new("example.com/b");
        Graph {
            modules: vec![a, b],
            edges: vec![edge("example.com/a", "example.com/b"), edge("example.com/a", "gone.org/x")],
        }
    }

    #[test]
    fn nodes_precede_edges() {
        let mut out = Vec::new();
        sample_graph().write_jsonl(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(r#"{"id":"example.com/a""#));
        assert_eq!(lines[3], r#"{"from":"example.com/a","to":"gone.org/x"}"#);
    }

    #[test]
    fn serialize_then_parse_keeps_nodes_and_edges() {
        let graph = sample_graph();
        let mut out = Vec::new();
        graph.write_jsonl(&mut out).unwrap();

        let (parsed, errors) = parse_jsonl(out.as_slice()).unwrap();
        assert!(errors.is_empty(), "{errors}");

        let ids: BTreeSet<String> = parsed.nodes.iter().filter_map(GenericNode::id_text).collect();
        let want: BTreeSet<String> = graph.modules.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, want);

        let pairs: BTreeSet<(String, String)> =
            parsed.edges.iter().filter_map(GenericEdge::endpoints).collect();
        let want: BTreeSet<(String, String)> =
            graph.edges.iter().map(|e| (e.from.clone(), e.to.clone())).collect();
        assert_eq!(pairs, want);
    }
}
