//! # Gauss Map
//!
//! The Gaussian map of a convex polyhedron as a value: a spherical map
//! whose faces carry the vertex positions of the solid. Minkowski sums are
//! computed by overlaying two maps, adding the marks of the covering faces
//! and simplifying the result.
//!
//! ## Example
//!
//! ```rust
//! use gauss_map::GaussMap;
//! use polyhedron::primitives::cube;
//!
//! let unit = GaussMap::from_polyhedron(&cube(1.0).unwrap());
//! let mut sum = GaussMap::new();
//! sum.minkowski_sum(&unit, &unit);
//!
//! let solid = sum.to_polyhedron().unwrap();
//! assert_eq!(solid.vertex_count(), 8);
//! assert_eq!(solid.bounding_box().1.z, 2.0);
//! ```

use crate::builder::GaussMapBuilder;
use crate::config::KernelConfig;
use crate::locate::{self, SObject};
use crate::mark::PointMark;
use crate::overlay::overlay;
use crate::simplify::simplify;
use crate::sphere_map::SphereMap;
use polyhedron::{Polyhedron, PolyhedronError, PolyhedronResult, Shell};
use std::fmt;

/// Gaussian map of a convex solid.
#[derive(Debug, Clone, Default)]
pub struct GaussMap {
    map: SphereMap<PointMark>,
    config: KernelConfig,
}

impl GaussMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map using `config` for later operations.
    pub fn with_config(config: KernelConfig) -> Self {
        Self {
            map: SphereMap::new(),
            config,
        }
    }

    /// Gauss map of the outer shell of `polyhedron`.
    pub fn from_polyhedron(polyhedron: &Polyhedron) -> Self {
        Self::from_polyhedron_with_config(polyhedron, KernelConfig::default())
    }

    /// Gauss map of the outer shell of `polyhedron`, with custom tolerances.
    ///
    /// The outer shell is the one holding the vertex of largest x. A
    /// polyhedron without vertices gives an empty map.
    pub fn from_polyhedron_with_config(polyhedron: &Polyhedron, config: KernelConfig) -> Self {
        let outer = polyhedron
            .vertex_ids()
            .max_by(|&a, &b| polyhedron.position(a).x.total_cmp(&polyhedron.position(b).x))
            .and_then(|v| polyhedron.shell(polyhedron.shell_of_vertex(v)));
        match outer {
            Some(shell) => Self::from_shell_with_config(polyhedron, &shell, config),
            None => Self::with_config(config),
        }
    }

    /// Gauss map of one shell of `polyhedron`.
    pub fn from_shell(polyhedron: &Polyhedron, shell: &Shell) -> Self {
        Self::from_shell_with_config(polyhedron, shell, KernelConfig::default())
    }

    /// Gauss map of one shell of `polyhedron`, with custom tolerances.
    pub fn from_shell_with_config(
        polyhedron: &Polyhedron,
        shell: &Shell,
        config: KernelConfig,
    ) -> Self {
        let map = GaussMapBuilder::new(polyhedron, config).build(shell);
        Self { map, config }
    }

    /// Tolerances of this map.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// The underlying spherical map.
    pub fn sphere_map(&self) -> &SphereMap<PointMark> {
        &self.map
    }

    /// Consumes the value, returning the spherical map.
    pub fn into_sphere_map(self) -> SphereMap<PointMark> {
        self.map
    }

    /// Number of spherical vertices (facet normals of the solid).
    pub fn vertex_count(&self) -> usize {
        self.map.vertex_count()
    }

    /// Number of arcs (edges of the solid).
    pub fn edge_count(&self) -> usize {
        self.map.edge_count()
    }

    /// Number of faces (vertices of the solid).
    pub fn face_count(&self) -> usize {
        self.map.face_count()
    }

    /// True if the map holds nothing.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Replaces this map with the Gauss map of the Minkowski sum of `a` and
    /// `b`.
    ///
    /// The inputs are overlaid, every face is marked with the sum of the
    /// marks of the faces covering it, and the result is simplified.
    pub fn minkowski_sum(&mut self, a: &GaussMap, b: &GaussMap) {
        let mut map = overlay(&a.map, &b.map, &self.config, |x, y| *x + *y);
        simplify(&mut map, &self.config);
        log::debug!(
            "Minkowski sum: {} + {} faces -> {} faces",
            a.face_count(),
            b.face_count(),
            map.face_count()
        );
        self.map = map;
    }

    /// Element holding the highest mark, see [`locate::locate_top`].
    pub fn locate_top(&self) -> Option<SObject> {
        locate::locate_top(&self.map, self.config.direction_tolerance)
    }

    /// Element holding the lowest mark, see [`locate::locate_bottom`].
    pub fn locate_bottom(&self) -> Option<SObject> {
        locate::locate_bottom(&self.map, self.config.direction_tolerance)
    }

    /// Highest and lowest elements from a single scan.
    pub fn top_and_bottom(&self) -> Option<(SObject, SObject)> {
        locate::locate_top_and_bottom(&self.map, self.config.direction_tolerance)
    }

    /// The solid this map represents.
    ///
    /// Every face becomes a vertex at its mark (vertex `i` is face `i`) and
    /// every spherical vertex becomes a facet through the faces around it,
    /// counter-clockwise seen from outside.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError::Empty`] when the map has no edges, and
    /// otherwise the error raised by [`Polyhedron::from_faces`] when the map
    /// does not describe a closed solid.
    pub fn to_polyhedron(&self) -> PolyhedronResult<Polyhedron> {
        if self.map.edge_count() == 0 {
            return Err(PolyhedronError::Empty);
        }
        let points: Vec<_> = self
            .map
            .face_ids()
            .map(|f| self.map.face(f).mark.point())
            .collect();
        let facets: Vec<Vec<usize>> = self
            .map
            .vertex_ids()
            .filter(|&v| !self.map.is_isolated(v))
            .map(|v| {
                self.map
                    .faces_around(v)
                    .into_iter()
                    .map(|f| f.index())
                    .collect()
            })
            .collect();
        Polyhedron::from_faces(&points, &facets)
    }
}

/// OFF-like dump: the header, one line per face with its mark, then one
/// line per spherical vertex with the number of faces around it followed by
/// their indices.
impl fmt::Display for GaussMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OFF")?;
        writeln!(f, "{} {} 0", self.map.face_count(), self.map.vertex_count())?;
        for face in self.map.face_ids() {
            writeln!(f, "{}", self.map.face(face).mark)?;
        }
        for v in self.map.vertex_ids() {
            let fan = self.map.faces_around(v);
            write!(f, "{}", fan.len())?;
            for face in fan {
                write!(f, " {}", face.index())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
