//! Drives the module collector over a whole input graph.

use std::io::Write;

use super::module::ModuleStatsCollector;
use super::stats::ModuleStats;
use crate::error::{AggregateError, Result};
use crate::graph::{write_record, Graph, ModGraph};

/// Collects every node in input order; one node's failure never stops the
/// others.
pub struct GraphStatsCollector<'a> {
    modules: &'a ModuleStatsCollector<'a>,
}

impl<'a> GraphStatsCollector<'a> {
    /// Wraps a module collector.
    pub fn new(modules: &'a ModuleStatsCollector<'a>) -> Self {
        Self { modules }
    }

    /// Collects the whole graph before returning it.
    pub fn collect(&self, input: &ModGraph) -> (Graph, AggregateError) {
        let mut graph = Graph { modules: Vec::with_capacity(input.modules.len()), edges: Vec::new() };
        let errors = self.for_each_module(input, |stats| {
            graph.modules.push(stats);
            Ok(())
        });
        // The callback above never fails.
        let errors = errors.unwrap_or_else(AggregateError::from);
        graph.edges.clone_from(&input.edges);
        (graph, errors)
    }

    /// Writes each node record as soon as it is collected, then the edges.
    ///
    /// Records are byte-identical to [`Graph::write_jsonl`] output.
    ///
    /// # Errors
    ///
    /// Only a failed write is fatal; collection errors are returned in the
    /// aggregate.
    pub fn collect_streaming<W: Write>(
        &self,
        input: &ModGraph,
        out: &mut W,
    ) -> Result<AggregateError> {
        let errors = self.for_each_module(input, |stats| {
            write_record(out, &stats)?;
            out.flush()?;
            Ok(())
        })?;
        for edge in &input.edges {
            write_record(out, edge)?;
        }
        Ok(errors)
    }

    fn for_each_module(
        &self,
        input: &ModGraph,
        mut emit: impl FnMut(ModuleStats) -> Result<()>,
    ) -> Result<AggregateError> {
        let total = input.modules.len();
        let mut errors = AggregateError::new();

        for (i, name) in input.modules.iter().enumerate() {
            let (stats, module_errors) = self.modules.collect(name);
            if module_errors.is_empty() {
                tracing::info!("[{}/{total}] {name}: done", i + 1);
            } else {
                tracing::warn!("[{}/{total}] {name}: done with error: {module_errors}", i + 1);
            }
            errors.append_with_context(name, module_errors);
            emit(stats)?;
        }
        Ok(errors)
    }
}
