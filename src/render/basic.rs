//! Plain record-shaped labels.

use super::{escape_record, label_rows, render_value, NodeLabeler};
use crate::graph::GenericNode;

/// Renders `{ id | {key\l | value\r} | ... }` record labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicRenderer;

impl NodeLabeler for BasicRenderer {
    fn node_defaults(&self) -> &'static str {
        "shape=record, style=rounded, fontname=\"Helvetica\""
    }

    fn label(&self, node: &GenericNode) -> String {
        let id = escape_record(&node.id_text().unwrap_or_default());
        let rows: Vec<String> = label_rows(node)
            .map(|(k, v)| format!("{{{}\\l | {}\\r}}", escape_record(k), escape_record(&render_value(v))))
            .collect();
        let label = if rows.is_empty() {
            format!("{{ {id} }}")
        } else {
            format!("{{ {id} | {} }}", rows.join(" | "))
        };
        // Record escapes already cover quotes and backslashes.
        format!("\"{label}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(v: serde_json::Value) -> GenericNode {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn record_label_layout() {
        let n = node(json!({
            "id": "github.com/acme/widget",
            "git_num_contributors": 3,
            "can_get_git": true,
            "gotest_package_coverage_avg": 38.95,
            "git_url": "https://github.com/acme/widget",
        }));
        assert_eq!(
            BasicRenderer.label(&n),
            r#""{ github.com/acme/widget | {can_get_git\l | true\r} | {git_num_contributors\l | 3\r} | {gotest_package_coverage_avg\l | 38.95\r} }""#
        );
    }

    #[test]
    fn node_without_rows() {
        assert_eq!(BasicRenderer.label(&node(json!({"id": "x"}))), r#""{ x }""#);
    }

    #[test]
    fn special_characters_are_escaped() {
        let n = node(json!({"id": "a", "grade": "A|B"}));
        assert!(BasicRenderer.label(&n).contains(r"A\|B"));
    }
}
