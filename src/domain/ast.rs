// AST data structures consumed by the graph builders.
// Nodes come from an external C front-end; this crate only reads them.

use std::fmt;

/// A node in the abstract syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: AstNodeKind,
    /// Scalar attributes in declaration order (operator, value, name, ...).
    pub attributes: Vec<(String, String)>,
    /// Children in program order, each reached under a role label.
    pub children: Vec<(String, AstNode)>,
    /// Source location, usually `file:line:col`.
    pub coord: Option<String>,
}

/// Syntactic categories the classifier knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AstNodeKind {
    Assignment,
    UnaryOp,
    Decl,
    Return,
    BinaryOp,
    Constant,
    Identifier,
    TypeDecl,
    IdentifierType,
    Compound,
    FuncDef,
    /// Any other front-end node type, kept by its tag.
    Other(String),
}

impl AstNodeKind {
    /// Map a front-end type tag (e.g. `"ID"`, `"FileAST"`) to a kind.
    pub fn from_tag(tag: &str) -> AstNodeKind {
        match tag {
            "Assignment" => AstNodeKind::Assignment,
            "UnaryOp" => AstNodeKind::UnaryOp,
            "Decl" => AstNodeKind::Decl,
            "Return" => AstNodeKind::Return,
            "BinaryOp" => AstNodeKind::BinaryOp,
            "Constant" => AstNodeKind::Constant,
            "ID" => AstNodeKind::Identifier,
            "TypeDecl" => AstNodeKind::TypeDecl,
            "IdentifierType" => AstNodeKind::IdentifierType,
            "Compound" => AstNodeKind::Compound,
            "FuncDef" => AstNodeKind::FuncDef,
            other => AstNodeKind::Other(other.to_string()),
        }
    }

    /// The front-end type tag, as shown in tree labels.
    pub fn tag(&self) -> &str {
        match self {
            AstNodeKind::Assignment => "Assignment",
            AstNodeKind::UnaryOp => "UnaryOp",
            AstNodeKind::Decl => "Decl",
            AstNodeKind::Return => "Return",
            AstNodeKind::BinaryOp => "BinaryOp",
            AstNodeKind::Constant => "Constant",
            AstNodeKind::Identifier => "ID",
            AstNodeKind::TypeDecl => "TypeDecl",
            AstNodeKind::IdentifierType => "IdentifierType",
            AstNodeKind::Compound => "Compound",
            AstNodeKind::FuncDef => "FuncDef",
            AstNodeKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for AstNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl AstNode {
    pub fn new(kind: AstNodeKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            children: Vec::new(),
            coord: None,
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    pub fn with_child(mut self, role: &str, child: AstNode) -> Self {
        self.children.push((role.to_string(), child));
        self
    }

    pub fn at(mut self, coord: &str) -> Self {
        self.coord = Some(coord.to_string());
        self
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child reached under `role`, if present.
    pub fn child(&self, role: &str) -> Option<&AstNode> {
        self.children
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, c)| c)
    }

    /// Multi-line description: the kind, then one `name: value` line per attribute.
    pub fn describe(&self) -> String {
        let mut label = self.kind.tag().to_string();
        for (name, value) in &self.attributes {
            label.push_str(&format!("\n{}: {}", name, value));
        }
        label
    }

    /// Cluster caption: the coordinate with any directory prefix stripped.
    pub fn caption(&self) -> String {
        self.coord
            .as_deref()
            .map(|c| c.rsplit('/').next().unwrap_or(c).to_string())
            .unwrap_or_default()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|(_, c)| c.size()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for tag in ["Assignment", "ID", "TypeDecl", "FuncDef", "FileAST", "While"] {
            assert_eq!(AstNodeKind::from_tag(tag).tag(), tag);
        }
        assert_eq!(AstNodeKind::from_tag("ID"), AstNodeKind::Identifier);
        assert_eq!(
            AstNodeKind::from_tag("For"),
            AstNodeKind::Other("For".to_string())
        );
    }

    #[test]
    fn test_describe_lists_attributes() {
        let node = AstNode::new(AstNodeKind::Constant)
            .with_attr("type", "int")
            .with_attr("value", "1");
        assert_eq!(node.describe(), "Constant\ntype: int\nvalue: 1");
        assert_eq!(AstNode::new(AstNodeKind::Compound).describe(), "Compound");
    }

    #[test]
    fn test_caption_strips_directories() {
        let node = AstNode::new(AstNodeKind::Return).at("/tmp/src/main.c:4:5");
        assert_eq!(node.caption(), "main.c:4:5");
        assert_eq!(AstNode::new(AstNodeKind::Return).caption(), "");
    }

    #[test]
    fn test_size_counts_subtree() {
        let node = AstNode::new(AstNodeKind::BinaryOp)
            .with_child("left", AstNode::new(AstNodeKind::Constant))
            .with_child("right", AstNode::new(AstNodeKind::Identifier));
        assert_eq!(node.size(), 3);
        assert_eq!(node.child("right").map(|c| &c.kind), Some(&AstNodeKind::Identifier));
    }
}
