use crate::{Vertex, Weight};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by graph construction and the algorithms themselves
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {vertex} is out of range for a graph with {vertices} vertices")]
    VertexOutOfRange { vertex: Vertex, vertices: usize },

    #[error("edge {from} -> {to} has negative weight {weight}; Dijkstra requires non-negative weights")]
    NegativeWeight { from: Vertex, to: Vertex, weight: Weight },

    #[error("graph contains a negative-weight cycle")]
    NegativeCycle,

    #[error("source and sink must be distinct (both are {0})")]
    SourceIsSink(Vertex),

    #[error("capacity matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix { row: usize, len: usize, expected: usize },

    #[error("edge {from} -> {to} has negative capacity {capacity}")]
    NegativeCapacity { from: Vertex, to: Vertex, capacity: Weight },

    #[error("distance overflow while relaxing edge {from} -> {to}")]
    DistanceOverflow { from: Vertex, to: Vertex },

    #[error("capacity overflow on arc {from} -> {to}")]
    CapacityOverflow { from: Vertex, to: Vertex },

    #[error("cannot allocate a graph with {0} vertices")]
    TooManyVertices(usize),
}

/// Errors raised while loading an instance from text or disk
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
