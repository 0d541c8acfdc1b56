//! `go mod graph` text input.

use std::io::BufRead;

use super::Edge;
use crate::error::{Error, Result};

/// Module names in first-sighting order plus edges in line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModGraph {
    /// Distinct module names.
    pub modules: Vec<String>,
    /// Dependencies.
    pub edges: Vec<Edge>,
}

/// Parses lines of `from@version to@version`. Versions are dropped.
///
/// # Errors
///
/// A line with fewer than two fields, or a read failure, rejects the whole
/// input.
pub fn parse_mod_graph<R: BufRead>(reader: R) -> Result<ModGraph> {
    let mut graph = ModGraph::default();
    let mut seen = std::collections::HashSet::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(from), Some(to)) = (fields.next(), fields.next()) else {
            return Err(Error::parse(
                "module graph",
                format!("line {}: expected two modules, got {line:?}", idx + 1),
            ));
        };
        let from = module_name(from);
        let to = module_name(to);

        for name in [from, to] {
            if seen.insert(name.to_string()) {
                graph.modules.push(name.to_string());
            }
        }
        graph.edges.push(Edge { from: from.to_string(), to: to.to_string() });
    }
    Ok(graph)
}

fn module_name(field: &str) -> &str {
    field.split_once('@').map_or(field, |(name, _)| name)
}
