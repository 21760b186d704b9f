use crate::domain::ast::AstNode;
use crate::domain::graph::{Cluster, Graph, GraphEdge, GraphNode, Marker};
use std::path::Path;

pub mod dot_exporter;

/// Write-only target of graph construction calls.
pub trait GraphSink {
    fn add_marker(&mut self, marker: Marker);
    fn open_cluster(&mut self, cluster: Cluster);
    fn add_node(&mut self, node: GraphNode);
    fn add_edge(&mut self, edge: GraphEdge);
}

/// Source of parsed ASTs (an external C front-end's output).
pub trait AstLoader: Send + Sync {
    fn load(&self, path: &Path) -> anyhow::Result<AstNode>;
}

/// Writes a finished graph to `<base>.<extension>`.
pub trait GraphExporter: Send + Sync {
    fn extension(&self) -> &'static str;
    fn export(&self, graph: &Graph, path: &Path) -> anyhow::Result<()>;
}
