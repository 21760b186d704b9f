//! Graph Data Structures
//!
//! Nodes, edges and clusters emitted by the transducer, plus `Graph`, an
//! in-memory sink that records every construction call in order.

use crate::ports::GraphSink;
use std::fmt;

/// Per-traversal node identifier, assigned in pre-order starting at 1.
pub type NodeId = usize;

/// Clusters are named after the node that opened them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub NodeId);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster{}", self.0)
    }
}

/// Synthetic invisible anchors used to order expression clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Top anchor, aligned vertically above the chain start.
    Top,
    /// Start of the ordering chain.
    Start,
    /// End of the ordering chain.
    End,
}

impl Marker {
    pub fn name(&self) -> &'static str {
        match self {
            Marker::Top => "rank1",
            Marker::Start => "rank2",
            Marker::End => "end",
        }
    }
}

/// Either side of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Node(NodeId),
    Marker(Marker),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Node(id) => write!(f, "{}", id),
            Endpoint::Marker(m) => f.write_str(m.name()),
        }
    }
}

/// Fill colours used by the render hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Green,
    Red,
    Yellow,
    Pink,
    LightBlue,
}

impl Color {
    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Green => "green",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Pink => "pink",
            Color::LightBlue => "lightblue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    /// Renderer default (ellipse).
    #[default]
    Default,
    Square,
}

/// Fill, shape and line style of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub fill: Color,
    pub shape: Shape,
    pub bold: bool,
    pub dashed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterStyle {
    Solid,
    Dashed,
    /// Emphasised top-level expression.
    Bold,
}

/// Arrowhead placement when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Back,
}

/// Which part of the graph an edge is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeGroup {
    #[default]
    Body,
    /// Same-rank, left-to-right ordering chain.
    Ordering,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub style: NodeStyle,
    pub cluster: Option<ClusterId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub from: Endpoint,
    pub to: Endpoint,
    pub label: Option<String>,
    /// Reached under an `lvalue`/`type` role. Expression edges built with
    /// [`GraphEdge::child`] then run child -> parent; tree edges keep their
    /// parent -> child endpoints.
    pub reversed: bool,
    pub invisible: bool,
    pub direction: Direction,
    pub group: EdgeGroup,
}

impl GraphEdge {
    /// Edge between a parent and child node, swapped when `reversed`.
    pub fn child(parent: NodeId, child: NodeId, label: Option<String>, reversed: bool) -> Self {
        let (from, to) = if reversed {
            (Endpoint::Node(child), Endpoint::Node(parent))
        } else {
            (Endpoint::Node(parent), Endpoint::Node(child))
        };
        GraphEdge {
            from,
            to,
            label,
            reversed,
            invisible: false,
            direction: Direction::Forward,
            group: EdgeGroup::Body,
        }
    }

    /// Invisible, unlabeled layout edge.
    pub fn invisible(from: Endpoint, to: Endpoint, group: EdgeGroup) -> Self {
        GraphEdge {
            from,
            to,
            label: None,
            reversed: false,
            invisible: true,
            direction: Direction::Forward,
            group,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: ClusterId,
    pub parent: Option<ClusterId>,
    pub caption: String,
    pub style: ClusterStyle,
}

/// Recording sink: keeps every construction call in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub name: String,
    /// Rank constraints apply across clusters (`newrank`).
    pub global_ranks: bool,
    pub markers: Vec<Marker>,
    pub clusters: Vec<Cluster>,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Graph configured for the syntax tree view.
    pub fn tree() -> Self {
        Self::new("ast")
    }

    /// Graph configured for the expression view.
    pub fn expressions() -> Self {
        Self {
            global_ranks: true,
            ..Self::new("expressions")
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    /// Nodes placed directly in `cluster` (`None` = graph root).
    pub fn members(&self, cluster: Option<ClusterId>) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|n| n.cluster == cluster).collect()
    }

    /// Visible edges only.
    pub fn visible_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(|e| !e.invisible)
    }

    pub fn ordering_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(|e| e.group == EdgeGroup::Ordering)
    }
}

impl GraphSink for Graph {
    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn open_cluster(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }

    fn add_node(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }

    fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }
}
