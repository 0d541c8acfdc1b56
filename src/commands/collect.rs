//! `import-graph collect` command.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::collector::{GraphStatsCollector, ModuleStatsCollector};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{AggregateError, Result};
use crate::graph::{parse_jsonl, parse_mod_graph};
use crate::render::{render_dot, BasicRenderer, ColorConfig, ColorRenderer, NodeLabeler};
use crate::resolver::{CachedResolver, GoModuleUrlResolver};

/// Flags of the `collect` command.
#[derive(Debug, Clone, Copy)]
pub struct CollectOptions<'a> {
    /// Output format.
    pub output: OutputFormat,
    /// Force the test stage on.
    pub test: bool,
    /// Color scheme for `dot-color`; the bundled one when `None`.
    pub color_scheme: Option<&'a str>,
    /// YAML configuration file.
    pub config: Option<&'a Path>,
}

/// Reads `go mod graph` text from `input` and writes the enriched graph.
///
/// Configuration, the color scheme and the input graph are all checked
/// before the first module is collected.
///
/// # Errors
///
/// Returns an error for unreadable configuration or color scheme, an
/// unparseable input graph, or a failed write. Everything else ends up in the
/// returned aggregate.
pub fn run_with_context<R: BufRead, W: Write>(
    ctx: &ServiceContext,
    options: &CollectOptions<'_>,
    input: R,
    out: &mut W,
) -> Result<AggregateError> {
    let mut config = Config::load(options.config)?.with_env();
    if options.test {
        config.sources.tests = true;
    }
    if let Some(source) = &config.source {
        tracing::debug!(path = %source.display(), "loaded configuration");
    }

    let labeler: Option<Box<dyn NodeLabeler>> = match options.output {
        OutputFormat::Jsonl => None,
        OutputFormat::Dot => Some(Box::new(BasicRenderer)),
        OutputFormat::DotColor => {
            let scheme = match options.color_scheme {
                Some(location) => ColorConfig::load(location)?,
                None => ColorConfig::bundled()?,
            };
            Some(Box::new(ColorRenderer::new(scheme)))
        }
    };

    let input = parse_mod_graph(input)?;
    tracing::info!(modules = input.modules.len(), edges = input.edges.len(), "read module graph");

    let resolver = CachedResolver::new(GoModuleUrlResolver::new(&*ctx.http));
    let modules = ModuleStatsCollector::new(ctx, &resolver, &config);
    let collector = GraphStatsCollector::new(&modules);

    let Some(labeler) = labeler else {
        return collector.collect_streaming(&input, out);
    };

    let (graph, mut errors) = collector.collect(&input);
    let mut jsonl = Vec::new();
    graph.write_jsonl(&mut jsonl)?;
    let (generic, parse_errors) = parse_jsonl(jsonl.as_slice())?;
    errors.append(parse_errors);
    render_dot(&generic, labeler.as_ref(), out)?;
    Ok(errors)
}
