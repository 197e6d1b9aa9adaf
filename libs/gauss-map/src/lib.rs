//! # Gauss Map
//!
//! Minkowski sums of convex polyhedra through their Gaussian maps.
//!
//! ## Architecture
//!
//! ```text
//! polyhedron (shell) → builder → SphereMap<PointMark>
//!                                   │
//!          SphereMap ⊕ SphereMap → overlay → simplify → GaussMap
//!                                                         │
//!                                  locate / to_polyhedron / Display
//! ```
//!
//! ## Modules
//!
//! - [`sphere`]: Great circles, orientation predicates, arcs
//! - [`sphere_map`]: Arena-based spherical subdivision
//! - [`builder`]: Three-pass construction from a polyhedron shell
//! - [`overlay`]: Overlay of two spherical subdivisions
//! - [`simplify`]: Removal of redundant edges and vertices
//! - [`locate`]: Extremal-element queries
//! - [`gauss_map`]: The [`GaussMap`] value and the Minkowski driver
//!
//! ## Usage
//!
//! ```rust
//! use gauss_map::{GaussMap, SObject};
//! use polyhedron::primitives::{cube, octahedron};
//!
//! let a = GaussMap::from_polyhedron(&cube(1.0).unwrap());
//! let b = GaussMap::from_polyhedron(&octahedron(1.0).unwrap());
//!
//! let mut sum = GaussMap::new();
//! sum.minkowski_sum(&a, &b);
//! assert_eq!(sum.face_count(), 24);
//! assert!(matches!(sum.locate_top(), Some(SObject::Vertex(_))));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod gauss_map;
pub mod locate;
pub mod mark;
pub mod overlay;
pub mod simplify;
pub mod sphere;
pub mod sphere_map;

pub use self::config::KernelConfig;
pub use error::{TopologyError, TopologyResult};
pub use gauss_map::GaussMap;
pub use locate::SObject;
pub use mark::PointMark;
pub use sphere_map::{SFaceId, SHalfEdgeId, SVertexId, SphereMap};
