//! # Topology Errors
//!
//! Structural violations reported by [`SphereMap::validate`]. Construction
//! and overlay treat these as contract failures and assert instead; the
//! validator exists so callers and tests can check a map explicitly.
//!
//! [`SphereMap::validate`]: crate::sphere_map::SphereMap::validate

use crate::sphere_map::{SFaceId, SHalfEdgeId, SVertexId};
use thiserror::Error;

/// Topology errors of a spherical incidence map.
#[derive(Debug, Error, PartialEq)]
pub enum TopologyError {
    /// Reference to a vertex that does not exist.
    #[error("Invalid vertex reference: {0:?}")]
    InvalidVertex(SVertexId),

    /// Reference to a half-edge that does not exist.
    #[error("Invalid half-edge reference: {0:?}")]
    InvalidHalfEdge(SHalfEdgeId),

    /// Reference to a face that does not exist.
    #[error("Invalid face reference: {0:?}")]
    InvalidFace(SFaceId),

    /// `twin(twin(e)) != e` or a half-edge is its own twin.
    #[error("Twin of {0:?} does not point back")]
    TwinMismatch(SHalfEdgeId),

    /// Missing `next`/`prev` link, or `next(prev(e)) != e`.
    #[error("Half-edge {0:?} is not linked into a cycle")]
    Unlinked(SHalfEdgeId),

    /// `next(e)` does not start where `e` ends.
    #[error("Cycle broken after {0:?}: next does not start at its target")]
    BrokenCycle(SHalfEdgeId),

    /// A half-edge reports a different face than the rest of its cycle.
    #[error("Half-edge {0:?} disagrees with its cycle about the incident face")]
    FaceMismatch(SHalfEdgeId),

    /// The supporting circle was never set.
    #[error("Half-edge {0:?} has no supporting circle")]
    UndefinedCircle(SHalfEdgeId),

    /// The stored outgoing half-edge of a vertex starts elsewhere.
    #[error("Outgoing half-edge of {0:?} does not start there")]
    VertexMismatch(SVertexId),

    /// A cycle is missing from, or repeated in, the boundary lists.
    #[error("Cycle through {0:?} is not recorded exactly once as a face boundary")]
    BoundaryMismatch(SHalfEdgeId),
}

/// Result type alias for topology checks.
pub type TopologyResult<T> = Result<T, TopologyError>;
