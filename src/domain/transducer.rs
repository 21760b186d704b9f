//! Dual-Graph Transducer
//!
//! One depth-first walk over the AST that feeds two sinks at once: the full
//! syntax tree graph and the expression graph. Both share node ids.

use crate::domain::ast::AstNode;
use crate::domain::classifier::{classify, expression_label};
use crate::domain::graph::{
    Cluster, ClusterId, ClusterStyle, Color, Direction, Graph, GraphEdge, GraphNode, NodeId,
    NodeStyle, Shape,
};
use crate::domain::ordering::OrderingTracker;
use crate::error::{GraphError, GraphResult};
use crate::ports::GraphSink;
use log::debug;

/// Roles whose expression edges are drawn child -> parent so the operand sits above.
const REVERSED_ROLES: [&str; 2] = ["lvalue", "type"];

/// Mutable state of one traversal. Never shared between traversals.
#[derive(Debug, Default)]
pub(crate) struct TraversalContext {
    last_id: NodeId,
    ordering: OrderingTracker,
}

impl TraversalContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn starting_after(last_id: NodeId) -> Self {
        Self {
            last_id,
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> GraphResult<NodeId> {
        self.last_id = self
            .last_id
            .checked_add(1)
            .ok_or(GraphError::IdSpaceExhausted(self.last_id))?;
        Ok(self.last_id)
    }
}

/// Outcome of a traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Traversal {
    pub node_count: usize,
    /// Expression roots in encounter (source) order.
    pub expression_roots: Vec<NodeId>,
}

/// Both graphs recorded in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPair {
    pub tree: Graph,
    pub expressions: Graph,
    pub traversal: Traversal,
}

/// What a node passes down to its children.
#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    parent: Option<NodeId>,
    role: Option<&'a str>,
    tree_cluster: Option<ClusterId>,
    expression: Option<ClusterId>,
    fill: Color,
}

impl Frame<'_> {
    fn root() -> Self {
        Frame {
            parent: None,
            role: None,
            tree_cluster: None,
            expression: None,
            fill: Color::White,
        }
    }
}

struct Transducer<'s, T: ?Sized, E: ?Sized> {
    ctx: TraversalContext,
    tree: &'s mut T,
    expressions: &'s mut E,
}

impl<T: GraphSink + ?Sized, E: GraphSink + ?Sized> Transducer<'_, T, E> {
    fn visit(&mut self, node: &AstNode, frame: Frame<'_>) -> GraphResult<()> {
        let id = self.ctx.next_id()?;
        let class = classify(node);
        let fill = class.hint.fill.unwrap_or(frame.fill);
        let reversed = frame.role.is_some_and(|r| REVERSED_ROLES.contains(&r));
        let tree_label = node.describe();
        debug!("{} {}", id, tree_label.replace('\n', " "));

        let mut expression = frame.expression;
        let mut opened = false;
        if class.opens_expression && expression.is_none() {
            let cluster = ClusterId(id);
            self.expressions.open_cluster(Cluster {
                id: cluster,
                parent: None,
                caption: node.caption(),
                style: ClusterStyle::Bold,
            });
            self.ctx.ordering.advance(id, &mut *self.expressions);
            expression = Some(cluster);
            opened = true;
        }
        if class.truncates_expression {
            expression = None;
        }

        if let Some(cluster) = expression {
            self.expressions.add_node(GraphNode {
                id,
                label: expression_label(node, class.category),
                style: NodeStyle {
                    fill,
                    shape: class.hint.shape,
                    bold: opened,
                    dashed: false,
                },
                cluster: Some(cluster),
            });
            if let (false, Some(parent)) = (opened, frame.parent) {
                self.expressions.add_edge(
                    GraphEdge::child(parent, id, None, reversed).with_direction(Direction::Back),
                );
            }
        }

        self.tree.add_node(GraphNode {
            id,
            label: tree_label,
            style: NodeStyle {
                fill,
                shape: Shape::Default,
                bold: false,
                dashed: expression.is_none(),
            },
            cluster: frame.tree_cluster,
        });
        if let Some(parent) = frame.parent {
            // the tree stays top-down; only the flag records the role
            self.tree.add_edge(GraphEdge {
                reversed,
                ..GraphEdge::child(parent, id, frame.role.map(str::to_string), false)
            });
        }

        let mut tree_cluster = frame.tree_cluster;
        if let Some(style) = class.tree_cluster {
            let cluster = ClusterId(id);
            self.tree.open_cluster(Cluster {
                id: cluster,
                parent: frame.tree_cluster,
                caption: node.caption(),
                style,
            });
            tree_cluster = Some(cluster);
        }

        for (role, child) in &node.children {
            self.visit(
                child,
                Frame {
                    parent: Some(id),
                    role: Some(role.as_str()),
                    tree_cluster,
                    expression,
                    fill,
                },
            )?;
        }
        Ok(())
    }
}

/// Walk `root` once, emitting the syntax tree into `tree` and the expression
/// clusters plus their ordering chain into `expressions`.
pub fn transduce<T, E>(root: &AstNode, tree: &mut T, expressions: &mut E) -> GraphResult<Traversal>
where
    T: GraphSink + ?Sized,
    E: GraphSink + ?Sized,
{
    transduce_with(TraversalContext::new(), root, tree, expressions)
}

fn transduce_with<T, E>(
    ctx: TraversalContext,
    root: &AstNode,
    tree: &mut T,
    expressions: &mut E,
) -> GraphResult<Traversal>
where
    T: GraphSink + ?Sized,
    E: GraphSink + ?Sized,
{
    ctx.ordering.begin(&mut *expressions);
    let first_id = ctx.last_id;
    let mut walker = Transducer { ctx, tree, expressions };
    walker.visit(root, Frame::root())?;

    let Transducer { ctx, expressions, .. } = walker;
    let node_count = ctx.last_id - first_id;
    let expression_roots = ctx.ordering.finish(expressions);
    Ok(Traversal {
        node_count,
        expression_roots,
    })
}

/// Convenience wrapper recording both graphs in memory.
pub fn build_graphs(root: &AstNode) -> GraphResult<GraphPair> {
    let mut tree = Graph::tree();
    let mut expressions = Graph::expressions();
    let traversal = transduce(root, &mut tree, &mut expressions)?;
    Ok(GraphPair {
        tree,
        expressions,
        traversal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ast::AstNodeKind;
    use crate::domain::graph::{EdgeGroup, Endpoint, Marker};

    fn id(name: &str) -> AstNode {
        AstNode::new(AstNodeKind::Identifier).with_attr("name", name)
    }

    fn constant(value: &str) -> AstNode {
        AstNode::new(AstNodeKind::Constant)
            .with_attr("type", "int")
            .with_attr("value", value)
    }

    fn assign(lvalue: AstNode, rvalue: AstNode) -> AstNode {
        AstNode::new(AstNodeKind::Assignment)
            .with_attr("op", "=")
            .with_child("lvalue", lvalue)
            .with_child("rvalue", rvalue)
    }

    fn compound(items: Vec<AstNode>) -> AstNode {
        items
            .into_iter()
            .enumerate()
            .fold(AstNode::new(AstNodeKind::Compound), |block, (i, item)| {
                block.with_child(&format!("block_items[{}]", i), item)
            })
    }

    #[test]
    fn test_ids_are_preorder_from_one() {
        let ast = assign(id("a"), constant("1"));
        let graphs = build_graphs(&ast).unwrap();
        let ids: Vec<NodeId> = graphs.tree.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(graphs.traversal.node_count, 3);
    }

    #[test]
    fn test_nested_assignment_stays_in_one_cluster() {
        // a = b = c
        let ast = compound(vec![assign(id("a"), assign(id("b"), id("c")))]);
        let graphs = build_graphs(&ast).unwrap();

        assert_eq!(graphs.traversal.expression_roots, vec![2]);
        assert_eq!(graphs.expressions.clusters.len(), 1);
        let members = graphs.expressions.members(Some(ClusterId(2)));
        assert_eq!(members.len(), 5);
        assert_eq!(members.iter().filter(|n| n.style.bold).count(), 1);
        // the inner assignment is an ordinary member labelled by its operator
        assert_eq!(graphs.expressions.node(4).map(|n| n.label.as_str()), Some("="));
    }

    #[test]
    fn test_identifier_type_is_cut_from_expression() {
        // int x = 1;
        let decl = AstNode::new(AstNodeKind::Decl)
            .with_attr("name", "x")
            .with_child(
                "type",
                AstNode::new(AstNodeKind::TypeDecl)
                    .with_attr("declname", "x")
                    .with_child(
                        "type",
                        AstNode::new(AstNodeKind::IdentifierType).with_attr("names", "['int']"),
                    ),
            )
            .with_child("init", constant("1"));
        let graphs = build_graphs(&decl).unwrap();

        assert!(graphs.tree.node(3).is_some());
        assert!(graphs.expressions.node(3).is_none());
        assert_eq!(graphs.expressions.node(2).map(|n| n.label.as_str()), Some("x"));
        assert_eq!(graphs.expressions.node(1).map(|n| n.label.as_str()), Some("="));
        assert!(graphs.tree.node(3).is_some_and(|n| n.style.dashed));
        assert!(graphs.tree.node(2).is_some_and(|n| !n.style.dashed));
    }

    #[test]
    fn test_tree_edges_point_from_parent() {
        let graphs = build_graphs(&assign(id("a"), id("b"))).unwrap();

        let lvalue = graphs.tree.visible_edges().next().unwrap();
        assert_eq!((lvalue.from, lvalue.to), (Endpoint::Node(1), Endpoint::Node(2)));
        assert_eq!(lvalue.direction, Direction::Forward);
        assert!(lvalue.reversed);

        let inverted = graphs.expressions.visible_edges().next().unwrap();
        assert_eq!((inverted.from, inverted.to), (Endpoint::Node(2), Endpoint::Node(1)));
        assert_eq!(inverted.direction, Direction::Back);
        assert!(inverted.reversed);
    }

    #[test]
    fn test_fill_is_inherited_by_generic_nodes() {
        let call = AstNode::new(AstNodeKind::Other("FuncCall".to_string())).with_child("name", id("f"));
        let ast = assign(id("a"), call);
        let graphs = build_graphs(&ast).unwrap();
        assert_eq!(graphs.tree.node(3).map(|n| n.style.fill), Some(Color::Green));
        assert_eq!(graphs.tree.node(4).map(|n| n.style.fill), Some(Color::LightBlue));
    }

    #[test]
    fn test_tree_clusters_nest() {
        let ast = AstNode::new(AstNodeKind::FuncDef)
            .at("src/main.c:1:5")
            .with_child("body", compound(vec![AstNode::new(AstNodeKind::Return)]));
        let graphs = build_graphs(&ast).unwrap();

        let clusters: Vec<(ClusterId, Option<ClusterId>)> =
            graphs.tree.clusters.iter().map(|c| (c.id, c.parent)).collect();
        assert_eq!(
            clusters,
            vec![
                (ClusterId(1), None),
                (ClusterId(2), Some(ClusterId(1))),
                (ClusterId(3), Some(ClusterId(2))),
            ]
        );
        assert_eq!(graphs.tree.clusters[0].caption, "main.c:1:5");
        assert_eq!(graphs.tree.clusters[1].caption, "");
        // a structured node sits in its parent's cluster, not its own
        assert_eq!(graphs.tree.node(2).and_then(|n| n.cluster), Some(ClusterId(1)));
    }

    #[test]
    fn test_empty_return_is_a_root_without_members() {
        let graphs = build_graphs(&compound(vec![AstNode::new(AstNodeKind::Return)])).unwrap();
        assert_eq!(graphs.traversal.expression_roots, vec![2]);
        assert_eq!(graphs.expressions.members(Some(ClusterId(2))).len(), 1);
        assert_eq!(graphs.expressions.visible_edges().count(), 0);
    }

    #[test]
    fn test_without_expressions_chain_is_start_to_end() {
        let graphs = build_graphs(&compound(vec![AstNode::new(AstNodeKind::Decl)])).unwrap();
        let chain: Vec<(Endpoint, Endpoint)> =
            graphs.expressions.ordering_edges().map(|e| (e.from, e.to)).collect();
        assert_eq!(
            chain,
            vec![(Endpoint::Marker(Marker::Start), Endpoint::Marker(Marker::End))]
        );
        assert!(graphs.expressions.nodes.is_empty());
        assert!(graphs
            .expressions
            .edges
            .iter()
            .any(|e| e.group == EdgeGroup::Body && e.invisible));
    }

    #[test]
    fn test_id_space_exhaustion_is_an_error() {
        let ctx = TraversalContext::starting_after(NodeId::MAX - 1);
        let ast = assign(id("a"), id("b"));
        let mut tree = Graph::tree();
        let mut expressions = Graph::expressions();
        let err = transduce_with(ctx, &ast, &mut tree, &mut expressions).unwrap_err();
        assert_eq!(err, GraphError::IdSpaceExhausted(NodeId::MAX));
    }
}
