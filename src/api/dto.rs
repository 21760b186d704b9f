use serde::{Deserialize, Serialize};
use crate::domain::graph::{ClusterStyle, Direction, EdgeGroup, Graph, Shape};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphDto {
    pub name: String,
    pub markers: Vec<String>,
    pub clusters: Vec<ClusterDto>,
    pub nodes: Vec<NodeDto>,
    pub edges: Vec<EdgeDto>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ClusterDto {
    pub id: String,
    pub parent: Option<String>,
    pub caption: String,
    pub style: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NodeDto {
    pub id: String,
    pub label: String,
    pub fill: String,
    pub shape: String,
    pub style: Vec<String>,
    pub cluster: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EdgeDto {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub reversed: bool,
    pub invisible: bool,
    pub back: bool,
    pub ordering: bool,
}

impl From<&Graph> for GraphDto {
    fn from(graph: &Graph) -> Self {
        let clusters = graph
            .clusters
            .iter()
            .map(|c| ClusterDto {
                id: c.id.to_string(),
                parent: c.parent.map(|p| p.to_string()),
                caption: c.caption.clone(),
                style: match c.style {
                    ClusterStyle::Solid => "solid",
                    ClusterStyle::Dashed => "dashed",
                    ClusterStyle::Bold => "bold",
                }
                .to_string(),
            })
            .collect();

        let nodes = graph
            .nodes
            .iter()
            .map(|n| {
                let mut style = vec!["filled".to_string()];
                if n.style.bold {
                    style.push("bold".to_string());
                }
                if n.style.dashed {
                    style.push("dashed".to_string());
                }
                NodeDto {
                    id: n.id.to_string(),
                    label: n.label.clone(),
                    fill: n.style.fill.name().to_string(),
                    shape: match n.style.shape {
                        Shape::Default => "ellipse",
                        Shape::Square => "square",
                    }
                    .to_string(),
                    style,
                    cluster: n.cluster.map(|c| c.to_string()),
                }
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|e| EdgeDto {
                from: e.from.to_string(),
                to: e.to.to_string(),
                label: e.label.clone(),
                reversed: e.reversed,
                invisible: e.invisible,
                back: e.direction == Direction::Back,
                ordering: e.group == EdgeGroup::Ordering,
            })
            .collect();

        GraphDto {
            name: graph.name.clone(),
            markers: graph.markers.iter().map(|m| m.name().to_string()).collect(),
            clusters,
            nodes,
            edges,
        }
    }
}
