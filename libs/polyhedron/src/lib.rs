//! # Polyhedron
//!
//! Closed polyhedral boundary representation consumed by the Gauss-map
//! kernel.
//!
//! ## Modules
//!
//! - [`mesh`]: Half-edge structure with validation and facet normals
//! - [`shell`]: Connected components and the shell visitor
//! - [`primitives`]: Boxes, platonic solids and prisms
//! - [`error`]: Construction errors
//!
//! ## Example
//!
//! ```rust
//! use polyhedron::primitives::cube;
//!
//! let poly = cube(1.0).unwrap();
//! assert_eq!(poly.vertex_count(), 8);
//! assert_eq!(poly.shell_count(), 1);
//! ```

pub mod error;
pub mod mesh;
pub mod primitives;
pub mod shell;

pub use error::{PolyhedronError, PolyhedronResult};
pub use mesh::{
    Facet, FacetCycle, FacetId, HalfEdge, HalfEdgeId, Outgoing, Polyhedron, ShellId, Vertex,
    VertexId,
};
pub use shell::{visit_all, visit_shell, Shell, ShellVisitor};
