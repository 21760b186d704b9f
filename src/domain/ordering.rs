//! Ordering Tracker
//!
//! Chains expression roots with invisible same-rank edges so the renderer
//! lays clusters out left to right in source order.

use crate::domain::graph::{EdgeGroup, Endpoint, GraphEdge, Marker, NodeId};
use crate::ports::GraphSink;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderingTracker {
    cursor: Endpoint,
    roots: Vec<NodeId>,
}

impl Default for OrderingTracker {
    fn default() -> Self {
        Self {
            cursor: Endpoint::Marker(Marker::Start),
            roots: Vec::new(),
        }
    }
}

impl OrderingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the top and start anchors, vertically aligned.
    pub fn begin<S: GraphSink + ?Sized>(&self, sink: &mut S) {
        sink.add_marker(Marker::Top);
        sink.add_marker(Marker::Start);
        sink.add_edge(GraphEdge::invisible(
            Endpoint::Marker(Marker::Top),
            Endpoint::Marker(Marker::Start),
            EdgeGroup::Body,
        ));
    }

    /// Link the previous root (or the start anchor) to `root`.
    pub fn advance<S: GraphSink + ?Sized>(&mut self, root: NodeId, sink: &mut S) {
        let next = Endpoint::Node(root);
        sink.add_edge(GraphEdge::invisible(self.cursor, next, EdgeGroup::Ordering));
        self.cursor = next;
        self.roots.push(root);
    }

    /// Close the chain at the end anchor and return the roots in order.
    pub fn finish<S: GraphSink + ?Sized>(self, sink: &mut S) -> Vec<NodeId> {
        sink.add_marker(Marker::End);
        sink.add_edge(GraphEdge::invisible(
            self.cursor,
            Endpoint::Marker(Marker::End),
            EdgeGroup::Ordering,
        ));
        self.roots
    }
}
