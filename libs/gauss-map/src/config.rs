//! Tolerance configuration for the Gauss-map kernel.
//!
//! Every construction entry point has a `*_with_config` variant taking a
//! [`KernelConfig`]; the plain variants use [`KernelConfig::default`].

use config::constants::{ConfigError, GlobalConfig, CIRCLE_EPSILON, DIRECTION_EPSILON};

/// Tolerances used by the sphere predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Distance below which two unit directions are one spherical vertex
    pub direction_tolerance: f64,
    /// Bound on `|n · p|` for a point `p` to lie on the circle with normal `n`
    pub circle_tolerance: f64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            direction_tolerance: DIRECTION_EPSILON,
            circle_tolerance: CIRCLE_EPSILON,
        }
    }
}

impl KernelConfig {
    /// Uses one validated tolerance for every predicate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gauss_map::KernelConfig;
    ///
    /// let config = KernelConfig::new(1e-7).unwrap();
    /// assert_eq!(config.circle_tolerance, 1e-7);
    /// assert!(KernelConfig::new(0.0).is_err());
    /// ```
    pub fn new(tolerance: f64) -> Result<Self, ConfigError> {
        GlobalConfig::new(tolerance).map(Self::from)
    }

    /// Tighter tolerances for inputs with exact coordinates.
    pub fn high_precision() -> Self {
        Self {
            direction_tolerance: 1e-12,
            circle_tolerance: 1e-12,
        }
    }
}

impl From<GlobalConfig> for KernelConfig {
    fn from(global: GlobalConfig) -> Self {
        Self {
            direction_tolerance: global.tolerance,
            circle_tolerance: global.tolerance,
        }
    }
}
