//! Node Classifier
//!
//! Maps an AST node to its visual category, clustering behaviour and
//! expression-graph participation.

use crate::domain::ast::{AstNode, AstNodeKind};
use crate::domain::graph::{ClusterStyle, Color, Shape};

/// Visual/semantic category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Assignment,
    /// `++`/`--`, prefix or postfix.
    IncrementDecrement,
    /// Any other unary operator (`-`, `!`, `&`, `sizeof`, ...).
    UnaryOp,
    InitializedDecl,
    PlainDecl,
    ReturnStmt,
    BinaryOp,
    Constant,
    Identifier,
    TypeDecl,
    IdentifierType,
    Generic,
}

/// Fill and shape associated with a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHint {
    /// `None` inherits the parent's fill.
    pub fill: Option<Color>,
    pub shape: Shape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Becomes an expression root when no expression is active.
    pub opens_expression: bool,
    /// Excluded, with its subtree, from any active expression.
    pub truncates_expression: bool,
    /// Structured nodes get their own cluster in the tree graph.
    pub tree_cluster: Option<ClusterStyle>,
    pub hint: RenderHint,
}

const INCREMENT_OPS: [&str; 4] = ["++", "p++", "--", "p--"];

/// Marker label for return roots.
pub const RETURN_LABEL: &str = "<ret>";

pub fn is_increment(op: &str) -> bool {
    INCREMENT_OPS.contains(&op)
}

/// Classify a node by kind, and by operator/initializer where that matters.
pub fn classify(node: &AstNode) -> Classification {
    let category = match &node.kind {
        AstNodeKind::Assignment => Category::Assignment,
        AstNodeKind::UnaryOp => match node.attr("op") {
            Some(op) if is_increment(op) => Category::IncrementDecrement,
            _ => Category::UnaryOp,
        },
        AstNodeKind::Decl => {
            if node.child("init").is_some() {
                Category::InitializedDecl
            } else {
                Category::PlainDecl
            }
        }
        AstNodeKind::Return => Category::ReturnStmt,
        AstNodeKind::BinaryOp => Category::BinaryOp,
        AstNodeKind::Constant => Category::Constant,
        AstNodeKind::Identifier => Category::Identifier,
        AstNodeKind::TypeDecl => Category::TypeDecl,
        AstNodeKind::IdentifierType => Category::IdentifierType,
        AstNodeKind::Compound | AstNodeKind::FuncDef | AstNodeKind::Other(_) => Category::Generic,
    };

    let tree_cluster = match category {
        Category::Assignment
        | Category::IncrementDecrement
        | Category::InitializedDecl
        | Category::ReturnStmt => Some(ClusterStyle::Solid),
        Category::UnaryOp | Category::PlainDecl => Some(ClusterStyle::Dashed),
        _ => match node.kind {
            AstNodeKind::Compound | AstNodeKind::FuncDef => Some(ClusterStyle::Solid),
            _ => None,
        },
    };

    Classification {
        category,
        opens_expression: matches!(
            category,
            Category::Assignment
                | Category::IncrementDecrement
                | Category::InitializedDecl
                | Category::ReturnStmt
        ),
        truncates_expression: category == Category::IdentifierType,
        tree_cluster,
        hint: render_hint(category),
    }
}

fn render_hint(category: Category) -> RenderHint {
    let (fill, shape) = match category {
        Category::Assignment
        | Category::IncrementDecrement
        | Category::UnaryOp
        | Category::InitializedDecl
        | Category::PlainDecl => (Some(Color::Green), Shape::Default),
        Category::ReturnStmt => (Some(Color::Red), Shape::Square),
        Category::BinaryOp => (Some(Color::Yellow), Shape::Default),
        Category::Constant => (Some(Color::Pink), Shape::Square),
        Category::Identifier | Category::TypeDecl => (Some(Color::LightBlue), Shape::Square),
        Category::IdentifierType | Category::Generic => (None, Shape::Default),
    };
    RenderHint { fill, shape }
}

/// Label of a node inside the expression graph.
pub fn expression_label(node: &AstNode, category: Category) -> String {
    let short = match category {
        Category::Assignment
        | Category::IncrementDecrement
        | Category::UnaryOp
        | Category::BinaryOp => node.attr("op"),
        Category::InitializedDecl => Some("="),
        Category::ReturnStmt => Some(RETURN_LABEL),
        Category::Constant => node.attr("value"),
        Category::Identifier => node.attr("name"),
        Category::TypeDecl => node.attr("declname"),
        _ => None,
    };
    short.map(str::to_string).unwrap_or_else(|| node.describe())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unary(op: &str) -> AstNode {
        AstNode::new(AstNodeKind::UnaryOp).with_attr("op", op)
    }

    #[test]
    fn test_increment_opens_expression() {
        for op in ["++", "p++", "--", "p--"] {
            let c = classify(&unary(op));
            assert_eq!(c.category, Category::IncrementDecrement);
            assert!(c.opens_expression);
            assert_eq!(c.tree_cluster, Some(ClusterStyle::Solid));
        }
    }

    #[test]
    fn test_other_unary_does_not_open() {
        let c = classify(&unary("-"));
        assert_eq!(c.category, Category::UnaryOp);
        assert!(!c.opens_expression);
        assert_eq!(c.tree_cluster, Some(ClusterStyle::Dashed));
    }

    #[test]
    fn test_decl_depends_on_initializer() {
        let plain = AstNode::new(AstNodeKind::Decl).with_attr("name", "x");
        let init = plain
            .clone()
            .with_child("init", AstNode::new(AstNodeKind::Constant).with_attr("value", "1"));

        let c = classify(&plain);
        assert_eq!(c.category, Category::PlainDecl);
        assert!(!c.opens_expression);

        let c = classify(&init);
        assert_eq!(c.category, Category::InitializedDecl);
        assert!(c.opens_expression);
        assert_eq!(expression_label(&init, c.category), "=");
    }

    #[test]
    fn test_identifier_type_truncates() {
        let c = classify(&AstNode::new(AstNodeKind::IdentifierType));
        assert!(c.truncates_expression);
        assert!(!c.opens_expression);
        assert_eq!(c.hint.fill, None);
    }

    #[test]
    fn test_unknown_kind_is_generic() {
        let node = AstNode::new(AstNodeKind::Other("While".to_string()));
        let c = classify(&node);
        assert_eq!(c.category, Category::Generic);
        assert!(!c.opens_expression && !c.truncates_expression);
        assert_eq!(c.tree_cluster, None);
        assert_eq!(expression_label(&node, c.category), "While");
    }

    #[test]
    fn test_blocks_cluster_in_tree_only() {
        for kind in [AstNodeKind::Compound, AstNodeKind::FuncDef] {
            let c = classify(&AstNode::new(kind));
            assert_eq!(c.category, Category::Generic);
            assert_eq!(c.tree_cluster, Some(ClusterStyle::Solid));
        }
    }

    #[test]
    fn test_hints_and_labels() {
        let ret = classify(&AstNode::new(AstNodeKind::Return));
        assert_eq!(ret.hint.fill, Some(Color::Red));
        assert_eq!(ret.hint.shape, Shape::Square);

        let constant = AstNode::new(AstNodeKind::Constant)
            .with_attr("type", "int")
            .with_attr("value", "42");
        let c = classify(&constant);
        assert_eq!(c.hint.fill, Some(Color::Pink));
        assert_eq!(expression_label(&constant, c.category), "42");

        let type_decl = AstNode::new(AstNodeKind::TypeDecl).with_attr("quals", "[]");
        assert_eq!(
            expression_label(&type_decl, Category::TypeDecl),
            "TypeDecl\nquals: []"
        );
    }
}
