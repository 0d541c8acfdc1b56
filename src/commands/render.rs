//! `import-graph render` command.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::graph::parse_jsonl;
use crate::render::{render_dot, BasicRenderer, ColorConfig, ColorRenderer, NodeLabeler};

/// Renders JSONL from `input` as Graphviz.
///
/// A color scheme or `color` selects the colored variant. Lines that are
/// neither node nor edge are logged and skipped.
///
/// # Errors
///
/// Returns an error if the color scheme cannot be loaded or a read or write
/// fails.
pub fn run<R: BufRead, W: Write>(
    color_scheme: Option<&str>,
    color: bool,
    input: R,
    out: &mut W,
) -> Result<()> {
    let labeler: Box<dyn NodeLabeler> = match (color_scheme, color) {
        (Some(location), _) => Box::new(ColorRenderer::new(ColorConfig::load(location)?)),
        (None, true) => Box::new(ColorRenderer::new(ColorConfig::bundled()?)),
        (None, false) => Box::new(BasicRenderer),
    };

    let (graph, errors) = parse_jsonl(input)?;
    for err in errors.iter() {
        tracing::warn!("{err}");
    }
    tracing::debug!(nodes = graph.nodes.len(), edges = graph.edges.len(), "parsed graph");
    render_dot(&graph, labeler.as_ref(), out)
}
