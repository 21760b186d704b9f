// Infrastructure implementations for exprgraph.

pub mod ast_loader;
pub mod concurrency;
pub mod graphviz_runner;

pub use ast_loader::JsonAstLoader;

use crate::api::dto::GraphDto;
use crate::domain::graph::Graph;
use crate::ports::dot_exporter::DotRenderer;
use crate::ports::GraphExporter;
use anyhow::{Context, Result};
use std::path::Path;

pub struct DotExporter;
impl GraphExporter for DotExporter {
    fn extension(&self) -> &'static str {
        "dot"
    }

    fn export(&self, graph: &Graph, path: &Path) -> Result<()> {
        std::fs::write(path, DotRenderer::to_dot(graph))
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

pub struct PngExporter;
impl GraphExporter for PngExporter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn export(&self, graph: &Graph, path: &Path) -> Result<()> {
        graphviz_runner::render(&DotRenderer::to_dot(graph), "png", path)
    }
}

pub struct JsonExporter;
impl GraphExporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn export(&self, graph: &Graph, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&GraphDto::from(graph))?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}
