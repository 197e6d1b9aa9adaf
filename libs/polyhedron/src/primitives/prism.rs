//! # Prism Primitive
//!
//! Right prisms over a regular polygon, standing on the z = 0 plane.

use super::platonic::check_positive;
use crate::error::{PolyhedronError, PolyhedronResult};
use crate::mesh::Polyhedron;
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a prism over a regular `sides`-gon of circumradius `radius`.
///
/// The first polygon corner lies on the positive x axis. Bottom ring
/// vertices are `0..sides`, top ring vertices `sides..2 * sides`.
///
/// # Example
///
/// ```rust
/// use polyhedron::primitives::prism;
///
/// let hex = prism(6, 1.0, 2.0).unwrap();
/// assert_eq!(hex.vertex_count(), 12);
/// assert_eq!(hex.facet_count(), 8);
/// ```
pub fn prism(sides: usize, radius: f64, height: f64) -> PolyhedronResult<Polyhedron> {
    if sides < 3 {
        return Err(PolyhedronError::InvalidParameter(format!(
            "Prism needs at least 3 sides: {sides}"
        )));
    }
    check_positive("Prism radius", radius)?;
    check_positive("Prism height", height)?;

    let ring = |z: f64| {
        (0..sides).map(move |i| {
            let angle = TAU * i as f64 / sides as f64;
            DVec3::new(radius * angle.cos(), radius * angle.sin(), z)
        })
    };
    let points: Vec<DVec3> = ring(0.0).chain(ring(height)).collect();

    let mut faces = Vec::with_capacity(sides + 2);
    faces.push((0..sides).rev().collect());
    faces.push((sides..2 * sides).collect());
    for i in 0..sides {
        let j = (i + 1) % sides;
        faces.push(vec![i, j, sides + j, sides + i]);
    }
    Polyhedron::from_faces(&points, &faces)
}
