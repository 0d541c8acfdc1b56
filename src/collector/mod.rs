//! Per-module and whole-graph enrichment.

pub mod graph;
pub mod module;
pub mod stats;

pub use graph::GraphStatsCollector;
pub use module::ModuleStatsCollector;
pub use stats::{GitStats, ModuleStats};
