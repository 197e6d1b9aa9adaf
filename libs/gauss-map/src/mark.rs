//! Marks carried by Gauss-map elements.
//!
//! A face of a Gauss map is marked with the position of the polyhedron
//! vertex it represents; vertices and half-edges carry the neutral origin.
//! Overlaying two Gauss maps adds the marks of the covering faces.

use glam::DVec3;
use std::fmt;
use std::ops::{Add, AddAssign};

/// Point in 3D space used as an element mark. The default is the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointMark(pub DVec3);

impl PointMark {
    /// The neutral mark.
    pub const ORIGIN: Self = Self(DVec3::ZERO);

    /// Wrapped position.
    #[inline]
    pub fn point(&self) -> DVec3 {
        self.0
    }

    /// Height of the position.
    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }
}

impl From<DVec3> for PointMark {
    fn from(point: DVec3) -> Self {
        Self(point)
    }
}

impl Add for PointMark {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for PointMark {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for PointMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.0.x, self.0.y, self.0.z)
    }
}
