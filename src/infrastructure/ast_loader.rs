use crate::domain::ast::{AstNode, AstNodeKind};
use crate::error::{GraphError, GraphResult};
use crate::ports::AstLoader;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Loads ASTs exported by pycparser's `c_json` module.
///
/// Every node is an object with a `_nodetype` tag and an optional `coord`.
/// Object-valued keys are children, arrays of objects are indexed children
/// (`block_items[0]`, ...) and everything else is a scalar attribute. Key
/// order is kept as written: attributes come before `coord`, children after
/// it, so a `null` before `coord` is an unset attribute (`None`) and a `null`
/// after it is an absent child.
pub struct JsonAstLoader;

impl AstLoader for JsonAstLoader {
    fn load(&self, path: &Path) -> Result<AstNode> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read AST file {}", path.display()))?;
        Self::parse_str(&content).with_context(|| format!("Failed to load AST from {}", path.display()))
    }
}

impl JsonAstLoader {
    pub fn parse_str(src: &str) -> Result<AstNode> {
        let value: Value = serde_json::from_str(src).context("AST is not valid JSON")?;
        Ok(Self::node_from_value(&value, "$")?)
    }

    fn node_from_value(value: &Value, path: &str) -> GraphResult<AstNode> {
        let object = value
            .as_object()
            .ok_or_else(|| malformed(path, "expected a node object"))?;
        let tag = object
            .get("_nodetype")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed(path, "missing string `_nodetype`"))?;

        let mut node = AstNode::new(AstNodeKind::from_tag(tag));
        let coord_at = object.keys().position(|k| k == "coord");

        for (index, (key, field)) in object.iter().enumerate() {
            match (key.as_str(), field) {
                ("_nodetype", _) => {}
                ("coord", Value::String(coord)) => node.coord = Some(coord.clone()),
                ("coord", _) => {}
                (_, Value::Null) if coord_at.is_some_and(|at| index < at) => {
                    node.attributes.push((key.clone(), render_scalar(field)));
                }
                (_, Value::Null) => {}
                (_, Value::Object(_)) => {
                    let child = Self::node_from_value(field, &format!("{}.{}", path, key))?;
                    node.children.push((key.clone(), child));
                }
                (_, Value::Array(items)) if items.iter().any(Value::is_object) => {
                    for (i, item) in items.iter().enumerate() {
                        let role = format!("{}[{}]", key, i);
                        if !item.is_object() {
                            return Err(malformed(
                                &format!("{}.{}", path, role),
                                "mixed child list",
                            ));
                        }
                        let child = Self::node_from_value(item, &format!("{}.{}", path, role))?;
                        node.children.push((role, child));
                    }
                }
                (_, scalar) => node.attributes.push((key.clone(), render_scalar(scalar))),
            }
        }

        Ok(node)
    }
}

fn malformed(path: &str, reason: &str) -> GraphError {
    GraphError::MalformedAst {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Printable form of an attribute; lists print like `['int']`.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => format!("'{}'", s),
                    other => render_scalar(other),
                })
                .collect();
            format!("[{}]", parts.join(", "))
        }
        other => other.to_string(),
    }
}
