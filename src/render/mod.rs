//! Graphviz projection of a [`GenericGraph`].
//!
//! Both variants share the row reduction in [`label_rows`]: every field but
//! `id` becomes a row, ordered by field name, and `*_url` fields are left out.

pub mod basic;
pub mod color;

use std::io::Write;

use serde_json::Value;

use crate::error::Result;
use crate::graph::{GenericGraph, GenericNode};

pub use basic::BasicRenderer;
pub use color::{ColorConfig, ColorConfigVal, ColorRenderer, Rgba};

const URL_SUFFIX: &str = "_url";

/// Builds the `label` attribute for one node.
pub trait NodeLabeler {
    /// Extra attributes for the `node [...]` default statement.
    fn node_defaults(&self) -> &'static str;

    /// The complete label value, including its quoting.
    fn label(&self, node: &GenericNode) -> String;
}

/// Writes `graph` as a `digraph`, nodes first, then edges, both in input order.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn render_dot<W: Write>(graph: &GenericGraph, labeler: &dyn NodeLabeler, w: &mut W) -> Result<()> {
    writeln!(w, "digraph G {{")?;
    writeln!(w, "    rankdir=LR")?;
    writeln!(w, "    node [{}]", labeler.node_defaults())?;
    writeln!(w)?;
    for node in &graph.nodes {
        let Some(id) = node.id_text() else { continue };
        writeln!(w, "    \"{}\" [label={}]", escape_quoted(&id), labeler.label(node))?;
    }
    writeln!(w)?;
    for edge in &graph.edges {
        let Some((from, to)) = edge.endpoints() else { continue };
        writeln!(w, "    \"{}\" -> \"{}\"", escape_quoted(&from), escape_quoted(&to))?;
    }
    writeln!(w, "}}")?;
    Ok(())
}

/// Rendered fields of `node`, ordered by name, without `id` and `*_url`.
pub fn label_rows(node: &GenericNode) -> impl Iterator<Item = (&str, &Value)> {
    node.fields
        .iter()
        .filter(|(k, _)| k.as_str() != "id" && !k.ends_with(URL_SUFFIX))
        .map(|(k, v)| (k.as_str(), v))
}

/// Integral numbers without decimals, other numbers with two, strings verbatim.
#[must_use]
pub fn render_value(v: &Value) -> String {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f.fract() == 0.0 {
                    format!("{f:.0}")
                } else {
                    format!("{f:.2}")
                }
            }
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Escapes text for a double-quoted DOT string.
pub(crate) fn escape_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escapes text for a cell of a `shape=record` label.
pub(crate) fn escape_record(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escapes text for an HTML-like label.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(v: Value) -> GenericNode {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn rows_are_sorted_and_skip_urls() {
        let n = node(json!({
            "id": "a",
            "zeta": 1,
            "git_url": "https://x",
            "alpha": true,
            "github_url": "https://y",
        }));
        let keys: Vec<&str> = label_rows(&n).map(|(k, _)| k).collect();
        assert_eq!(keys, ["alpha", "zeta"]);
    }

    #[test]
    fn numbers_drop_spurious_decimals() {
        assert_eq!(render_value(&json!(12)), "12");
        assert_eq!(render_value(&json!(12.0)), "12");
        assert_eq!(render_value(&json!(38.95)), "38.95");
        assert_eq!(render_value(&json!(77.912)), "77.91");
        assert_eq!(render_value(&json!(-3)), "-3");
        assert_eq!(render_value(&json!(1e20)), "100000000000000000000");
        assert_eq!(render_value(&json!(-2.5e16)), "-25000000000000000");
        assert_eq!(render_value(&json!("A+")), "A+");
        assert_eq!(render_value(&json!(false)), "false");
    }

    #[test]
    fn escapes() {
        assert_eq!(escape_quoted(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_record("x|{y}"), r"x\|\{y\}");
        assert_eq!(escape_html("<a&b>"), "&lt;a&amp;b&gt;");
    }

    #[test]
    fn dot_lists_nodes_then_edges() {
        let graph = GenericGraph {
            nodes: vec![node(json!({"id": "a", "n": 1})), node(json!({"id": "b"}))],
            edges: vec![serde_json::from_value(json!({"from": "a", "to": "b"})).unwrap()],
        };
        let mut out = Vec::new();
        render_dot(&graph, &BasicRenderer, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("digraph G {\n"));
        assert!(out.trim_end().ends_with('}'));
        let a = out.find("\"a\" [label=").unwrap();
        let b = out.find("\"b\" [label=").unwrap();
        let e = out.find("\"a\" -> \"b\"").unwrap();
        assert!(a < b && b < e);
    }
}
