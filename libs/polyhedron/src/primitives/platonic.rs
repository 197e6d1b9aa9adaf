//! # Platonic Primitives
//!
//! Regular tetrahedron and octahedron centered at the origin.

use crate::error::{PolyhedronError, PolyhedronResult};
use config::constants::approx_zero;
use crate::mesh::Polyhedron;
use glam::DVec3;

/// Creates a regular tetrahedron inscribed in the cube `[-size, size]^3`.
///
/// # Example
///
/// ```rust
/// use polyhedron::primitives::tetrahedron;
///
/// let poly = tetrahedron(1.0).unwrap();
/// assert_eq!(poly.facet_count(), 4);
/// ```
pub fn tetrahedron(size: f64) -> PolyhedronResult<Polyhedron> {
    check_positive("Tetrahedron size", size)?;
    let points = [
        DVec3::new(1.0, 1.0, 1.0) * size,
        DVec3::new(1.0, -1.0, -1.0) * size,
        DVec3::new(-1.0, 1.0, -1.0) * size,
        DVec3::new(-1.0, -1.0, 1.0) * size,
    ];
    let faces = vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]];
    Polyhedron::from_faces(&points, &faces)
}

/// Creates a regular octahedron with its vertices on the axes at `radius`.
pub fn octahedron(radius: f64) -> PolyhedronResult<Polyhedron> {
    check_positive("Octahedron radius", radius)?;
    let points = [
        DVec3::X * radius,
        DVec3::NEG_X * radius,
        DVec3::Y * radius,
        DVec3::NEG_Y * radius,
        DVec3::Z * radius,
        DVec3::NEG_Z * radius,
    ];
    let faces = vec![
        vec![0, 2, 4],
        vec![2, 1, 4],
        vec![1, 3, 4],
        vec![3, 0, 4],
        vec![2, 0, 5],
        vec![1, 2, 5],
        vec![3, 1, 5],
        vec![0, 3, 5],
    ];
    Polyhedron::from_faces(&points, &faces)
}

pub(super) fn check_positive(what: &str, value: f64) -> PolyhedronResult<()> {
    if value > 0.0 && !approx_zero(value) && value.is_finite() {
        Ok(())
    } else {
        Err(PolyhedronError::InvalidParameter(format!(
            "{what} must be positive: {value}"
        )))
    }
}
