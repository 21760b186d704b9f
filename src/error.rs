// Error types for the graph construction core.

use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The per-traversal node counter cannot hand out another id.
    #[error("node id space exhausted after {0} nodes")]
    IdSpaceExhausted(usize),

    #[error("malformed AST at {path}: {reason}")]
    MalformedAst { path: String, reason: String },
}
