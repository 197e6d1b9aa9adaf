//! # Config Crate
//!
//! Centralized configuration constants for the Gauss-map kernel and the
//! polyhedral boundary representation it consumes. All tolerances and safety
//! limits are defined here so the geometry crates never carry literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DIRECTION_EPSILON, MIN_FACE_CIRCLES};
//!
//! // Two unit normals closer than DIRECTION_EPSILON share a spherical vertex
//! let a = [0.0, 0.0, 1.0];
//! let b = [0.0, 1e-12, 1.0];
//! let gap = ((a[1] - b[1]) as f64).abs();
//! assert!(gap < DIRECTION_EPSILON);
//!
//! // A polyhedron vertex needs three distinct facet planes to bound a face
//! assert_eq!(MIN_FACE_CIRCLES, 3);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Overrides**: `GlobalConfig::new` rejects nonsensical values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
