//! # Sphere Geometry
//!
//! Predicates on the unit sphere: oriented great circles, orientation of
//! three directions, rotational order of tangents and arc containment.
//!
//! ## Conventions
//!
//! - An arc with supporting circle `n` travels counter-clockwise around `n`,
//!   so its tangent at `p` is `n × p` and its left side faces `n`.
//! - Rotations around a point `p` are counter-clockwise when viewed from
//!   outside the sphere, looking down `-p`.
//! - Signs of triple products come from `robust::orient3d`.

use glam::DVec3;
use robust::{orient3d, Coord3D};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::f64::consts::TAU;

// =============================================================================
// GREAT CIRCLES
// =============================================================================

/// Oriented great circle, stored as its unit normal.
///
/// The default value is the undefined circle (zero normal), used for arcs
/// whose second endpoint is not known yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphereCircle {
    normal: DVec3,
}

impl SphereCircle {
    /// Circle with the given normal, normalized.
    ///
    /// Returns `None` for a (near) zero normal.
    pub fn from_normal(normal: DVec3) -> Option<Self> {
        let length = normal.length();
        if length <= f64::EPSILON || !length.is_finite() {
            return None;
        }
        Some(Self {
            normal: normal / length,
        })
    }

    /// Circle through `p` and `q`, oriented so that the short arc from `p`
    /// to `q` runs counter-clockwise.
    ///
    /// Returns `None` when `p` and `q` are equal or antipodal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gauss_map::sphere::SphereCircle;
    /// use glam::DVec3;
    ///
    /// let circle = SphereCircle::through(DVec3::X, DVec3::Y).unwrap();
    /// assert_eq!(circle.normal(), DVec3::Z);
    /// assert!(SphereCircle::through(DVec3::X, DVec3::NEG_X).is_none());
    /// ```
    pub fn through(p: DVec3, q: DVec3) -> Option<Self> {
        Self::from_normal(p.cross(q))
    }

    /// Unit normal (zero for the undefined circle).
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Coefficient of `x` in the plane equation `ax + by + cz = 0`.
    #[inline]
    pub fn a(&self) -> f64 {
        self.normal.x
    }

    /// Coefficient of `y` in the plane equation.
    #[inline]
    pub fn b(&self) -> f64 {
        self.normal.y
    }

    /// Coefficient of `z` in the plane equation.
    #[inline]
    pub fn c(&self) -> f64 {
        self.normal.z
    }

    /// True unless this is the undefined circle.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.normal != DVec3::ZERO
    }

    /// Same circle, opposite orientation.
    #[inline]
    pub fn opposite(&self) -> Self {
        Self {
            normal: -self.normal,
        }
    }

    /// True if `p` lies on the circle within `tolerance`.
    #[inline]
    pub fn has_on(&self, p: DVec3, tolerance: f64) -> bool {
        self.normal.dot(p).abs() <= tolerance
    }

    /// Direction of travel at `p`.
    #[inline]
    pub fn tangent_at(&self, p: DVec3) -> DVec3 {
        self.normal.cross(p)
    }

    /// True if both circles are the same oriented circle.
    pub fn is_same(&self, other: &SphereCircle, tolerance: f64) -> bool {
        same_direction(self.normal, other.normal, tolerance)
    }

    /// True if both circles are the same set of points, in either orientation.
    pub fn is_coincident(&self, other: &SphereCircle, tolerance: f64) -> bool {
        self.is_same(other, tolerance) || self.is_same(&other.opposite(), tolerance)
    }

    /// Angle travelled from `p` to reach `x` along the circle, in `[0, 2π)`.
    ///
    /// Both points are expected on the circle.
    pub fn travel(&self, p: DVec3, x: DVec3) -> f64 {
        let angle = self.normal.dot(p.cross(x)).atan2(p.dot(x));
        if angle < 0.0 {
            angle + TAU
        } else {
            angle
        }
    }
}

// =============================================================================
// PREDICATES
// =============================================================================

/// Orientation of three directions as seen from the sphere center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `a · (b × c) > 0`
    CounterClockwise,
    /// `a · (b × c) < 0`
    Clockwise,
    /// The three directions lie on one great circle.
    Degenerate,
}

/// Sign of the triple product `a · (b × c)`, computed with adaptive
/// precision.
///
/// # Example
///
/// ```rust
/// use gauss_map::sphere::{orientation, Orientation};
/// use glam::DVec3;
///
/// assert_eq!(orientation(DVec3::X, DVec3::Y, DVec3::Z), Orientation::CounterClockwise);
/// assert_eq!(orientation(DVec3::Y, DVec3::X, DVec3::Z), Orientation::Clockwise);
/// ```
pub fn orientation(a: DVec3, b: DVec3, c: DVec3) -> Orientation {
    let det = orient3d(coord(a), coord(b), coord(c), coord(DVec3::ZERO));
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Degenerate
    }
}

fn coord(v: DVec3) -> Coord3D<f64> {
    Coord3D {
        x: v.x,
        y: v.y,
        z: v.z,
    }
}

/// True if two unit directions are within `tolerance` of each other.
#[inline]
pub fn same_direction(a: DVec3, b: DVec3, tolerance: f64) -> bool {
    a.distance(b) <= tolerance
}

/// Orders two tangents at `p` by counter-clockwise angle from `reference`.
///
/// Exact up to the sign predicates: tangents are first split into the
/// half-turns `[0, π)` and `[π, 2π)`, then compared by orientation.
pub fn ccw_order(p: DVec3, reference: DVec3, a: DVec3, b: DVec3) -> Ordering {
    let half = |t: DVec3| match orientation(p, reference, t) {
        Orientation::CounterClockwise => 1,
        Orientation::Clockwise => 3,
        Orientation::Degenerate if reference.dot(t) > 0.0 => 0,
        Orientation::Degenerate => 2,
    };
    match half(a).cmp(&half(b)) {
        Ordering::Equal => match orientation(p, a, b) {
            Orientation::CounterClockwise => Ordering::Less,
            Orientation::Clockwise => Ordering::Greater,
            Orientation::Degenerate => Ordering::Equal,
        },
        unequal => unequal,
    }
}

// =============================================================================
// ARCS
// =============================================================================

/// Arc from `source` to `target` travelling counter-clockwise around
/// `circle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// Start point
    pub source: DVec3,
    /// End point
    pub target: DVec3,
    /// Supporting circle
    pub circle: SphereCircle,
}

impl Arc {
    /// Angular length in `(0, 2π]`; an arc back to its start is a full turn.
    pub fn length(&self) -> f64 {
        let length = self.circle.travel(self.source, self.target);
        if length == 0.0 {
            TAU
        } else {
            length
        }
    }

    /// Travel from the source to `x`, if `x` lies on the closed arc.
    ///
    /// Endpoints are snapped: positions within `tolerance` of either end
    /// report `0` or the arc length.
    pub fn locate(&self, x: DVec3, tolerance: f64) -> Option<f64> {
        if !self.circle.has_on(x, tolerance) {
            return None;
        }
        if same_direction(x, self.source, tolerance) {
            return Some(0.0);
        }
        let length = self.length();
        if same_direction(x, self.target, tolerance) {
            return Some(length);
        }
        let t = self.circle.travel(self.source, x);
        (t < length).then_some(t)
    }

    /// Points where this arc meets `other`, excluding coincident stretches.
    ///
    /// Arcs on the same circle report nothing here; their overlap is found
    /// by locating each arc's endpoints on the other.
    pub fn crossings(&self, other: &Arc, tolerance: f64) -> Vec<DVec3> {
        if self.circle.is_coincident(&other.circle, tolerance) {
            return Vec::new();
        }
        let Some(axis) = SphereCircle::from_normal(self.circle.normal().cross(other.circle.normal()))
        else {
            return Vec::new();
        };
        let d = axis.normal();
        [d, -d]
            .into_iter()
            .filter(|&x| self.locate(x, tolerance).is_some() && other.locate(x, tolerance).is_some())
            .collect()
    }
}

// =============================================================================
// DIRECTION INDEX
// =============================================================================

/// Lookup of unit directions up to a tolerance.
///
/// Directions are bucketed on a grid with cells of the tolerance size;
/// a query inspects the 27 surrounding cells.
#[derive(Debug, Clone)]
pub struct DirectionIndex {
    tolerance: f64,
    cells: HashMap<[i64; 3], Vec<usize>>,
    points: Vec<DVec3>,
}

impl DirectionIndex {
    /// Creates an empty index.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            cells: HashMap::new(),
            points: Vec::new(),
        }
    }

    fn cell(&self, p: DVec3) -> [i64; 3] {
        let scaled = p / self.tolerance;
        [
            scaled.x.floor() as i64,
            scaled.y.floor() as i64,
            scaled.z.floor() as i64,
        ]
    }

    /// Index of a stored direction within tolerance of `p`.
    pub fn find(&self, p: DVec3) -> Option<usize> {
        let [cx, cy, cz] = self.cell(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&[cx + dx, cy + dy, cz + dz]) else {
                        continue;
                    };
                    if let Some(&i) = bucket
                        .iter()
                        .find(|&&i| same_direction(self.points[i], p, self.tolerance))
                    {
                        return Some(i);
                    }
                }
            }
        }
        None
    }

    /// Returns the index of `p`, inserting it if no stored direction
    /// matches. The flag is `true` when `p` was inserted.
    pub fn find_or_insert(&mut self, p: DVec3) -> (usize, bool) {
        if let Some(i) = self.find(p) {
            return (i, false);
        }
        let i = self.points.len();
        self.points.push(p);
        let cell = self.cell(p);
        self.cells.entry(cell).or_default().push(i);
        (i, true)
    }

    /// Number of stored directions.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests;
