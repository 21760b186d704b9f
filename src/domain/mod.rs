pub mod ast;
pub mod classifier;
pub mod graph;
pub mod ordering;
pub mod transducer;
