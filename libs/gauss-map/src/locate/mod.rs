//! # Extremal-Point Locator
//!
//! Finds the element of a Gauss map holding the highest (or lowest) mark.
//!
//! Faces are compared by the z-coordinate of their marks. A single extremal
//! face is returned as is. Two tied faces meet along an arc through the
//! pole, so the half-edge between them is returned. More ties can only meet
//! at the pole itself, which is returned as a vertex.
//!
//! The pole is the fixed direction `(0, 0, 1)` for the top and
//! `(0, 0, -1)` for the bottom.

use crate::mark::PointMark;
use crate::sphere_map::{SFaceId, SHalfEdgeId, SVertexId, SphereMap};

/// Element of a spherical map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SObject {
    /// A face
    Face(SFaceId),
    /// A half-edge
    HalfEdge(SHalfEdgeId),
    /// A vertex
    Vertex(SVertexId),
}

/// Which end of the z-axis to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// Largest z, pole `(0, 0, 1)`
    Top,
    /// Smallest z, pole `(0, 0, -1)`
    Bottom,
}

impl Extreme {
    /// True if `z` lies strictly beyond `best + tolerance` in this direction.
    fn beats(self, z: f64, best: f64, tolerance: f64) -> bool {
        match self {
            Extreme::Top => z > best + tolerance,
            Extreme::Bottom => z < best - tolerance,
        }
    }

    /// Sign of the pole's z-coordinate.
    fn pole_sign(self) -> f64 {
        match self {
            Extreme::Top => 1.0,
            Extreme::Bottom => -1.0,
        }
    }
}

/// Faces tied for one extreme, in id order.
#[derive(Debug, Default)]
struct Ties {
    best: f64,
    faces: Vec<SFaceId>,
}

impl Ties {
    fn offer(&mut self, face: SFaceId, z: f64, extreme: Extreme, tolerance: f64) {
        if self.faces.is_empty() || extreme.beats(z, self.best, tolerance) {
            self.best = z;
            self.faces.clear();
            self.faces.push(face);
        } else if (z - self.best).abs() <= tolerance {
            self.faces.push(face);
        }
    }
}

/// Highest element of `map`, or `None` if the map has no face.
pub fn locate_top(map: &SphereMap<PointMark>, tolerance: f64) -> Option<SObject> {
    locate(map, Extreme::Top, tolerance)
}

/// Lowest element of `map`, or `None` if the map has no face.
pub fn locate_bottom(map: &SphereMap<PointMark>, tolerance: f64) -> Option<SObject> {
    locate(map, Extreme::Bottom, tolerance)
}

/// Extremal element of `map` at `extreme`.
pub fn locate(map: &SphereMap<PointMark>, extreme: Extreme, tolerance: f64) -> Option<SObject> {
    let mut ties = Ties::default();
    for f in map.face_ids() {
        ties.offer(f, map.face(f).mark.z(), extreme, tolerance);
    }
    resolve(map, &ties.faces, extreme, tolerance)
}

/// Highest and lowest elements of `map` from a single scan over its faces.
pub fn locate_top_and_bottom(
    map: &SphereMap<PointMark>,
    tolerance: f64,
) -> Option<(SObject, SObject)> {
    let mut top = Ties::default();
    let mut bottom = Ties::default();
    for f in map.face_ids() {
        let z = map.face(f).mark.z();
        top.offer(f, z, Extreme::Top, tolerance);
        bottom.offer(f, z, Extreme::Bottom, tolerance);
    }
    Some((
        resolve(map, &top.faces, Extreme::Top, tolerance)?,
        resolve(map, &bottom.faces, Extreme::Bottom, tolerance)?,
    ))
}

fn resolve(
    map: &SphereMap<PointMark>,
    ties: &[SFaceId],
    extreme: Extreme,
    tolerance: f64,
) -> Option<SObject> {
    let first = *ties.first()?;
    let object = match ties.len() {
        1 => SObject::Face(first),
        2 => separating_half_edge(map, first, ties[1], tolerance)
            .map_or(SObject::Face(first), SObject::HalfEdge),
        _ => pole_vertex(map, first, extreme, tolerance)
            .map_or(SObject::Face(first), SObject::Vertex),
    };
    if object == SObject::Face(first) && ties.len() > 1 {
        log::debug!(
            "locate: {} faces tied at {extreme:?} without a matching element, using {first:?}",
            ties.len()
        );
    }
    Some(object)
}

/// Boundary half-edge of `face` bordering `other`, preferring one on a
/// circle through the poles.
fn separating_half_edge(
    map: &SphereMap<PointMark>,
    face: SFaceId,
    other: SFaceId,
    tolerance: f64,
) -> Option<SHalfEdgeId> {
    let mut fallback = None;
    for &start in &map.face(face).boundary {
        for h in map.cycle(start) {
            if map.incident_face(map.twin(h)) != Some(other) {
                continue;
            }
            if map.circle(h).c().abs() <= tolerance {
                return Some(h);
            }
            fallback.get_or_insert(h);
        }
    }
    fallback
}

/// Boundary vertex of `face` at the pole of `extreme`.
fn pole_vertex(
    map: &SphereMap<PointMark>,
    face: SFaceId,
    extreme: Extreme,
    tolerance: f64,
) -> Option<SVertexId> {
    map.face(face)
        .boundary
        .iter()
        .flat_map(|&start| map.cycle(start))
        .map(|h| map.source(h))
        .find(|&v| {
            let p = map.point(v);
            p.x.abs() <= tolerance && p.y.abs() <= tolerance && p.z * extreme.pole_sign() > 0.0
        })
}

#[cfg(test)]
mod tests;
