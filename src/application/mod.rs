use crate::domain::transducer::build_graphs;
use crate::ports::{AstLoader, GraphExporter};
use anyhow::{Context, Result};
use log::info;
use rayon::prelude::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Output base paths (without extension); `None` skips that graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTargets {
    pub ast: Option<PathBuf>,
    pub expressions: Option<PathBuf>,
}

impl OutputTargets {
    /// Per-source targets for batch runs: `<base>-<source stem>`.
    pub fn for_source(&self, source: &Path) -> OutputTargets {
        let stem = source
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| OsString::from("source"));
        let suffix = |base: &PathBuf| {
            let mut name = base.as_os_str().to_owned();
            name.push("-");
            name.push(&stem);
            PathBuf::from(name)
        };
        OutputTargets {
            ast: self.ast.as_ref().map(suffix),
            expressions: self.expressions.as_ref().map(suffix),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    pub source: PathBuf,
    pub node_count: usize,
    pub expression_count: usize,
    pub written: Vec<PathBuf>,
}

pub struct ExtractUsecase<'a> {
    pub loader: &'a dyn AstLoader,
    pub exporters: Vec<&'a dyn GraphExporter>,
}

impl<'a> ExtractUsecase<'a> {
    pub fn run(&self, source: &Path, targets: &OutputTargets) -> Result<ExtractionReport> {
        info!("Parsing file '{}'...", source.display());
        let ast = self.loader.load(source)?;

        info!("Constructing graphs...");
        let graphs = build_graphs(&ast)
            .with_context(|| format!("Failed to build graphs for {}", source.display()))?;

        let mut written = Vec::new();
        let outputs = [
            ("AST graph", &graphs.tree, &targets.ast),
            ("expression graphs", &graphs.expressions, &targets.expressions),
        ];
        for (what, graph, base) in outputs {
            let Some(base) = base else { continue };
            for exporter in &self.exporters {
                let path = with_extension(base, exporter.extension());
                info!("Outputting {} to '{}'...", what, path.display());
                exporter.export(graph, &path)?;
                written.push(path);
            }
        }

        Ok(ExtractionReport {
            source: source.to_path_buf(),
            node_count: graphs.traversal.node_count,
            expression_count: graphs.traversal.expression_roots.len(),
            written,
        })
    }

    /// Run every source on the rayon pool. Results keep the input order.
    pub fn run_all(&self, sources: &[PathBuf], targets: &OutputTargets) -> Vec<Result<ExtractionReport>> {
        if let [source] = sources {
            return vec![self.run(source, targets)];
        }
        sources
            .par_iter()
            .map(|source| self.run(source, &targets.for_source(source)))
            .collect()
    }
}

/// `out/ast` + `dot` -> `out/ast.dot`, keeping any dots already in the base.
fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
