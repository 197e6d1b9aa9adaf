//! # Configuration Constants
//!
//! Centralized constants for the Gauss-map kernel. Geometry predicates,
//! deduplication tolerances and structural limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Topology**: Minimum element sizes used by the degeneracy policy
//! - **Limits**: Maximum values for safety bounds

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for scalar floating-point comparisons.
///
/// Used for facet area checks and for comparing mark coordinates when the
/// caller asks for a tolerant comparison.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance below which two unit directions are the same point on the sphere.
///
/// Facet normals are computed in floating point, so coplanar facets of a
/// triangulated face produce normals that differ in the last bits. Directions
/// within this distance collapse onto one spherical vertex.
///
/// # Example
///
/// ```rust
/// use config::constants::DIRECTION_EPSILON;
///
/// let a = [0.0_f64, 0.0, 1.0];
/// let b = [1e-13_f64, 0.0, 1.0];
/// let d = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt();
/// assert!(d < DIRECTION_EPSILON);
/// ```
pub const DIRECTION_EPSILON: f64 = 1e-9;

/// Tolerance of the on-circle test `|n · p| <= CIRCLE_EPSILON` for a unit
/// circle normal `n` and a unit direction `p`.
///
/// # Example
///
/// ```rust
/// use config::constants::CIRCLE_EPSILON;
///
/// let normal = [0.0_f64, 0.0, 1.0];
/// let point = [1.0_f64, 0.0, 1e-12];
/// let dot: f64 = normal.iter().zip(point.iter()).map(|(a, b)| a * b).sum();
/// assert!(dot.abs() <= CIRCLE_EPSILON);
/// ```
pub const CIRCLE_EPSILON: f64 = 1e-9;

// =============================================================================
// TOPOLOGY CONSTANTS
// =============================================================================

/// Minimum number of distinct facet planes around a polyhedron vertex for it
/// to be represented by a spherical face.
///
/// Vertices with fewer planes lie inside a flat region (one plane) or on a
/// straight crease (two planes); their normal cone is a point or an arc.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_FACE_CIRCLES;
///
/// let planes_around_cube_corner = 3;
/// assert!(planes_around_cube_corner >= MIN_FACE_CIRCLES);
/// ```
pub const MIN_FACE_CIRCLES: usize = 3;

/// Minimum number of corners of a facet.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_FACET_VERTICES;
///
/// let triangle = [0usize, 1, 2];
/// assert!(triangle.len() >= MIN_FACET_VERTICES);
/// ```
pub const MIN_FACET_VERTICES: usize = 3;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a single polyhedron.
///
/// Safety limit to prevent memory exhaustion from extremely large inputs and
/// to keep every index representable as `u32`.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = 1000;
/// assert!(vertex_count < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

// =============================================================================
// GLOBAL CONFIGURATION
// =============================================================================

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Direction tolerance propagated into the sphere predicates.
    pub tolerance: f64,
}

impl GlobalConfig {
    /// Builds a configuration, rejecting tolerances that are not strictly
    /// positive or that are too coarse to separate directions on the sphere.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6).expect("valid config");
    /// assert_eq!(cfg.tolerance, 1.0e-6);
    /// ```
    pub fn new(tolerance: f64) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0 && tolerance < 1.0e-2) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        Ok(Self { tolerance })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: DIRECTION_EPSILON,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the tolerance is not in `(0, 1e-2)`.
    InvalidTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be in (0, 1e-2): {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
