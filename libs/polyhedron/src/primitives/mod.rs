//! # Primitives
//!
//! Closed convex solids for callers and tests: boxes, platonic solids and
//! prisms. Every primitive has outward-facing, counter-clockwise facets.

mod cuboid;
mod platonic;
mod prism;

pub use cuboid::{cube, cuboid, triangulated_cuboid};
pub use platonic::{octahedron, tetrahedron};
pub use prism::prism;
