//! # Cuboid Primitive
//!
//! Axis-aligned boxes, with quad facets or with every quad split in two.

use crate::error::{PolyhedronError, PolyhedronResult};
use crate::mesh::Polyhedron;
use config::constants::approx_equal;
use glam::DVec3;

/// Quad facets of a box over the corner layout used by [`corners`].
const QUADS: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // bottom (z = min)
    [4, 5, 6, 7], // top (z = max)
    [0, 1, 5, 4], // front (y = min)
    [2, 3, 7, 6], // back (y = max)
    [0, 4, 7, 3], // left (x = min)
    [1, 2, 6, 5], // right (x = max)
];

/// Creates an axis-aligned box with 8 vertices and 6 quad facets.
///
/// # Arguments
///
/// * `min` - Lower corner
/// * `max` - Upper corner, strictly greater than `min` on every axis
///
/// # Example
///
/// ```rust
/// use polyhedron::primitives::cuboid;
/// use glam::DVec3;
///
/// let poly = cuboid(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0)).unwrap();
/// assert_eq!(poly.vertex_count(), 8);
/// assert_eq!(poly.facet_count(), 6);
/// ```
pub fn cuboid(min: DVec3, max: DVec3) -> PolyhedronResult<Polyhedron> {
    let points = corners(min, max)?;
    let faces: Vec<Vec<usize>> = QUADS.iter().map(|q| q.to_vec()).collect();
    Polyhedron::from_faces(&points, &faces)
}

/// Creates the cube `[-half, half]^3`.
pub fn cube(half: f64) -> PolyhedronResult<Polyhedron> {
    cuboid(DVec3::splat(-half), DVec3::splat(half))
}

/// Creates an axis-aligned box whose faces are each split into two
/// triangles, giving 12 facets with pairwise coplanar neighbours.
pub fn triangulated_cuboid(min: DVec3, max: DVec3) -> PolyhedronResult<Polyhedron> {
    let points = corners(min, max)?;
    let faces: Vec<Vec<usize>> = QUADS
        .iter()
        .flat_map(|&[a, b, c, d]| [vec![a, b, c], vec![a, c, d]])
        .collect();
    Polyhedron::from_faces(&points, &faces)
}

fn corners(min: DVec3, max: DVec3) -> PolyhedronResult<Vec<DVec3>> {
    let size = max - min;
    let flat = (0..3).any(|axis| !(size[axis] > 0.0) || approx_equal(min[axis], max[axis]));
    if flat {
        return Err(PolyhedronError::InvalidParameter(format!(
            "Cuboid size must be positive: {size:?}"
        )));
    }
    Ok(vec![
        DVec3::new(min.x, min.y, min.z), // 0: left-front-bottom
        DVec3::new(max.x, min.y, min.z), // 1: right-front-bottom
        DVec3::new(max.x, max.y, min.z), // 2: right-back-bottom
        DVec3::new(min.x, max.y, min.z), // 3: left-back-bottom
        DVec3::new(min.x, min.y, max.z), // 4: left-front-top
        DVec3::new(max.x, min.y, max.z), // 5: right-front-top
        DVec3::new(max.x, max.y, max.z), // 6: right-back-top
        DVec3::new(min.x, max.y, max.z), // 7: left-back-top
    ])
}
