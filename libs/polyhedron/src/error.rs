//! # Polyhedron Errors
//!
//! Error types for building a boundary representation. The Gauss-map kernel
//! assumes valid, closed, oriented shells; everything that can be rejected up
//! front is rejected here with an explicit error.

use thiserror::Error;

/// Errors that can occur while building or validating a polyhedron.
#[derive(Debug, Error, PartialEq)]
pub enum PolyhedronError {
    /// A facet references a point index that does not exist.
    #[error("Facet {facet} references invalid vertex index {index}")]
    InvalidIndex {
        /// Facet position in the input list
        facet: usize,
        /// Offending point index
        index: usize,
    },

    /// A facet has fewer corners than a polygon needs.
    #[error("Facet {facet} has {count} vertices (minimum {min})")]
    FacetTooSmall {
        /// Facet position in the input list
        facet: usize,
        /// Number of corners supplied
        count: usize,
        /// Required minimum
        min: usize,
    },

    /// A facet has zero area or repeats a corner consecutively.
    #[error("Facet {facet} is degenerate")]
    DegenerateFacet {
        /// Facet position in the input list
        facet: usize,
    },

    /// The same directed edge appears in more than one facet.
    #[error("Edge {source_vertex}->{target_vertex} is used by more than one facet")]
    NonManifoldEdge {
        /// Edge start point index
        source_vertex: usize,
        /// Edge end point index
        target_vertex: usize,
    },

    /// A directed edge has no opposite edge: the surface is not closed.
    #[error("Edge {source_vertex}->{target_vertex} has no twin (open boundary)")]
    OpenBoundary {
        /// Edge start point index
        source_vertex: usize,
        /// Edge end point index
        target_vertex: usize,
    },

    /// The facets around a vertex do not form a single fan.
    #[error("Vertex {0} is not manifold")]
    NonManifoldVertex(usize),

    /// A point is not used by any facet.
    #[error("Vertex {0} is not referenced by any facet")]
    UnreferencedVertex(usize),

    /// Too many points for the index type.
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices {
        /// Number of points supplied
        count: usize,
        /// Configured maximum
        max: usize,
    },

    /// No facets were supplied.
    #[error("Polyhedron has no facets")]
    Empty,

    /// A primitive was requested with unusable parameters.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for polyhedron operations.
pub type PolyhedronResult<T> = Result<T, PolyhedronError>;
