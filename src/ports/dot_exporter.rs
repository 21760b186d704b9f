//! DOT Renderer
//!
//! Renders a recorded `Graph` as Graphviz DOT text, nesting clusters and
//! grouping ordering edges in a same-rank subgraph.

use crate::domain::graph::{
    Cluster, ClusterId, ClusterStyle, Direction, EdgeGroup, Graph, GraphEdge, GraphNode, Shape,
};
use std::collections::HashMap;

/// Nodes and clusters grouped by the cluster that directly contains them.
struct Scopes<'g> {
    nodes: HashMap<Option<ClusterId>, Vec<&'g GraphNode>>,
    clusters: HashMap<Option<ClusterId>, Vec<&'g Cluster>>,
}

impl<'g> Scopes<'g> {
    fn new(graph: &'g Graph) -> Self {
        let mut nodes: HashMap<Option<ClusterId>, Vec<&GraphNode>> = HashMap::new();
        for node in &graph.nodes {
            nodes.entry(node.cluster).or_default().push(node);
        }
        let mut clusters: HashMap<Option<ClusterId>, Vec<&Cluster>> = HashMap::new();
        for cluster in &graph.clusters {
            clusters.entry(cluster.parent).or_default().push(cluster);
        }
        Self { nodes, clusters }
    }
}

pub struct DotRenderer;

impl DotRenderer {
    /// Convert a Graph to DOT source.
    pub fn to_dot(graph: &Graph) -> String {
        let mut lines = Vec::new();

        lines.push(format!("digraph {} {{", graph.name));
        if graph.global_ranks {
            lines.push("    newrank=true;".to_string());
        }

        for marker in &graph.markers {
            lines.push(format!(
                "    \"{}\" [label=\"\", style=invis, width=0];",
                marker.name()
            ));
        }

        Self::push_scope(&Scopes::new(graph), None, 1, &mut lines);

        for edge in graph.edges.iter().filter(|e| e.group == EdgeGroup::Body) {
            lines.push(format!("    {}", Self::edge_line(edge)));
        }

        let ordering: Vec<&GraphEdge> = graph.ordering_edges().collect();
        if !ordering.is_empty() {
            lines.push("    {".to_string());
            lines.push("        rank=same;".to_string());
            lines.push("        rankdir=LR;".to_string());
            for edge in ordering {
                lines.push(format!("        {}", Self::edge_line(edge)));
            }
            lines.push("    }".to_string());
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    /// Nodes placed directly in `scope`, then its nested clusters.
    fn push_scope(scopes: &Scopes<'_>, scope: Option<ClusterId>, depth: usize, lines: &mut Vec<String>) {
        let indent = "    ".repeat(depth);
        for node in scopes.nodes.get(&scope).into_iter().flatten() {
            lines.push(format!("{}{}", indent, Self::node_line(node)));
        }
        for cluster in scopes.clusters.get(&scope).into_iter().flatten() {
            lines.push(format!("{}subgraph {} {{", indent, cluster.id));
            for attr in Self::cluster_attrs(cluster) {
                lines.push(format!("{}    {};", indent, attr));
            }
            Self::push_scope(scopes, Some(cluster.id), depth + 1, lines);
            lines.push(format!("{}}}", indent));
        }
    }

    fn cluster_attrs(cluster: &Cluster) -> Vec<String> {
        let mut attrs = vec![format!("label=\"{}\"", Self::escape_label(&cluster.caption))];
        match cluster.style {
            ClusterStyle::Solid => {}
            ClusterStyle::Dashed => attrs.push("style=dashed".to_string()),
            ClusterStyle::Bold => attrs.push("style=bold".to_string()),
        }
        attrs
    }

    fn node_line(node: &GraphNode) -> String {
        let mut style = String::from("filled");
        if node.style.bold {
            style.push_str(",bold");
        }
        if node.style.dashed {
            style.push_str(",dashed");
        }
        let shape = match node.style.shape {
            Shape::Default => String::new(),
            Shape::Square => ", shape=square".to_string(),
        };
        format!(
            "\"{}\" [label=\"{}\", style=\"{}\", fillcolor={}{}];",
            node.id,
            Self::escape_label(&node.label),
            style,
            node.style.fill.name(),
            shape
        )
    }

    fn edge_line(edge: &GraphEdge) -> String {
        let mut attrs = Vec::new();
        if let Some(label) = &edge.label {
            attrs.push(format!("label=\"{}\"", Self::escape_label(label)));
        }
        if edge.direction == Direction::Back {
            attrs.push("dir=back".to_string());
        }
        if edge.invisible {
            attrs.push("style=invis".to_string());
        }
        let attrs = if attrs.is_empty() {
            String::new()
        } else {
            format!(" [{}]", attrs.join(", "))
        };
        format!("\"{}\" -> \"{}\"{};", edge.from, edge.to, attrs)
    }

    fn escape_label(label: &str) -> String {
        label
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}
