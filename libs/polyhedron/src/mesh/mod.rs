//! # Half-Edge Polyhedron
//!
//! Closed polyhedral boundary representation with index-based references.
//!
//! ## Structure
//!
//! - **Vertex**: 3D position with one outgoing half-edge
//! - **HalfEdge**: Directed edge with source, target, twin, next, prev, facet
//! - **Facet**: One boundary half-edge, unit outward normal and owning shell
//!
//! Facets are oriented counter-clockwise when viewed from outside, so the
//! normal computed from the boundary (Newell's method) points outward.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use polyhedron::Polyhedron;
//!
//! let points = [
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//!     DVec3::new(0.0, 0.0, 1.0),
//! ];
//! let faces = vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]];
//! let tetra = Polyhedron::from_faces(&points, &faces).unwrap();
//! assert_eq!(tetra.edge_count(), 6);
//! ```

use crate::error::{PolyhedronError, PolyhedronResult};
use config::constants::{EPSILON, MAX_VERTICES, MIN_FACET_VERTICES};
use glam::DVec3;
use std::collections::HashMap;

/// Invalid/null reference constant.
const INVALID: u32 = u32::MAX;

/// Index type for vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// Index type for half-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub u32);

/// Index type for facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacetId(pub u32);

/// Index type for shells (connected components of the boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShellId(pub u32);

macro_rules! impl_index {
    ($($name:ident),*) => {
        $(
            impl $name {
                /// Position of the element in its storage.
                #[inline]
                pub fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

impl_index!(VertexId, HalfEdgeId, FacetId, ShellId);

/// Vertex of the polyhedron.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Position in 3D space
    pub position: DVec3,
    /// One outgoing half-edge
    pub halfedge: HalfEdgeId,
}

/// Directed edge of the polyhedron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdge {
    /// Vertex this half-edge leaves
    pub source: VertexId,
    /// Vertex this half-edge points to
    pub target: VertexId,
    /// Opposite half-edge
    pub twin: HalfEdgeId,
    /// Next half-edge around the facet (counter-clockwise)
    pub next: HalfEdgeId,
    /// Previous half-edge around the facet
    pub prev: HalfEdgeId,
    /// Facet to the left of this half-edge
    pub facet: FacetId,
}

/// Oriented facet of the polyhedron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    /// First half-edge of the boundary cycle
    pub halfedge: HalfEdgeId,
    /// Unit outward normal
    pub normal: DVec3,
    /// Shell the facet belongs to
    pub shell: ShellId,
}

/// Closed, oriented, 2-manifold polyhedral surface.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    facets: Vec<Facet>,
    shell_count: usize,
}

impl Polyhedron {
    /// Builds a polyhedron from points and facet index lists.
    ///
    /// Every facet lists its corners counter-clockwise as seen from outside.
    /// The surface must be closed and every edge shared by exactly two
    /// facets with opposite orientation.
    ///
    /// # Arguments
    ///
    /// * `points` - Vertex positions
    /// * `faces` - One index list per facet
    ///
    /// # Errors
    ///
    /// Returns a [`PolyhedronError`] describing the first violation found.
    pub fn from_faces(points: &[DVec3], faces: &[Vec<usize>]) -> PolyhedronResult<Self> {
        if points.len() > MAX_VERTICES {
            return Err(PolyhedronError::TooManyVertices {
                count: points.len(),
                max: MAX_VERTICES,
            });
        }
        if faces.is_empty() {
            return Err(PolyhedronError::Empty);
        }

        let mut half_edges: Vec<HalfEdge> = Vec::new();
        let mut facets = Vec::with_capacity(faces.len());
        let mut directed: HashMap<(usize, usize), HalfEdgeId> = HashMap::new();

        for (facet_idx, face) in faces.iter().enumerate() {
            if face.len() < MIN_FACET_VERTICES {
                return Err(PolyhedronError::FacetTooSmall {
                    facet: facet_idx,
                    count: face.len(),
                    min: MIN_FACET_VERTICES,
                });
            }
            if let Some(&index) = face.iter().find(|&&i| i >= points.len()) {
                return Err(PolyhedronError::InvalidIndex {
                    facet: facet_idx,
                    index,
                });
            }

            let n = face.len();
            let repeats_corner = (0..n).any(|i| face[i] == face[(i + 1) % n]);
            let corners: Vec<DVec3> = face.iter().map(|&i| points[i]).collect();
            let normal = newell_normal(&corners);
            let length = normal.length();
            if repeats_corner || length < EPSILON {
                return Err(PolyhedronError::DegenerateFacet { facet: facet_idx });
            }

            let first = half_edges.len();
            for i in 0..n {
                let (source, target) = (face[i], face[(i + 1) % n]);
                let id = HalfEdgeId((first + i) as u32);
                if directed.insert((source, target), id).is_some() {
                    return Err(PolyhedronError::NonManifoldEdge {
                        source_vertex: source,
                        target_vertex: target,
                    });
                }
                half_edges.push(HalfEdge {
                    source: VertexId(source as u32),
                    target: VertexId(target as u32),
                    twin: HalfEdgeId(INVALID),
                    next: HalfEdgeId((first + (i + 1) % n) as u32),
                    prev: HalfEdgeId((first + (i + n - 1) % n) as u32),
                    facet: FacetId(facet_idx as u32),
                });
            }

            facets.push(Facet {
                halfedge: HalfEdgeId(first as u32),
                normal: normal / length,
                shell: ShellId(0),
            });
        }

        for he in half_edges.iter_mut() {
            let (source, target) = (he.source.index(), he.target.index());
            match directed.get(&(target, source)) {
                Some(&twin) => he.twin = twin,
                None => {
                    return Err(PolyhedronError::OpenBoundary {
                        source_vertex: source,
                        target_vertex: target,
                    })
                }
            }
        }

        let mut vertices: Vec<Vertex> = points
            .iter()
            .map(|&position| Vertex {
                position,
                halfedge: HalfEdgeId(INVALID),
            })
            .collect();
        let mut out_degree = vec![0usize; points.len()];
        for (i, he) in half_edges.iter().enumerate() {
            let v = he.source.index();
            if vertices[v].halfedge.0 == INVALID {
                vertices[v].halfedge = HalfEdgeId(i as u32);
            }
            out_degree[v] += 1;
        }

        let mut polyhedron = Self {
            vertices,
            half_edges,
            facets,
            shell_count: 0,
        };

        for (v, vertex) in polyhedron.vertices.iter().enumerate() {
            if vertex.halfedge.0 == INVALID {
                return Err(PolyhedronError::UnreferencedVertex(v));
            }
            // A manifold vertex is reached by one circulation of its fan
            if polyhedron.outgoing(VertexId(v as u32)).count() != out_degree[v] {
                return Err(PolyhedronError::NonManifoldVertex(v));
            }
        }

        polyhedron.assign_shells();
        Ok(polyhedron)
    }

    /// Labels every facet with the connected component it belongs to.
    fn assign_shells(&mut self) {
        let mut shell_of = vec![INVALID; self.facets.len()];
        let mut count = 0u32;

        for seed in 0..self.facets.len() {
            if shell_of[seed] != INVALID {
                continue;
            }
            shell_of[seed] = count;
            let mut stack = vec![FacetId(seed as u32)];
            while let Some(facet) = stack.pop() {
                for h in self.facet_cycle(facet) {
                    let neighbor = self.half_edge(self.half_edge(h).twin).facet;
                    if shell_of[neighbor.index()] == INVALID {
                        shell_of[neighbor.index()] = count;
                        stack.push(neighbor);
                    }
                }
            }
            count += 1;
        }

        for (facet, shell) in self.facets.iter_mut().zip(shell_of) {
            facet.shell = ShellId(shell);
        }
        self.shell_count = count as usize;
    }

    // -------------------------------------------------------------------------
    // Counts
    // -------------------------------------------------------------------------

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of half-edges.
    #[inline]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Returns the number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.half_edges.len() / 2
    }

    /// Returns the number of facets.
    #[inline]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Returns the number of shells.
    #[inline]
    pub fn shell_count(&self) -> usize {
        self.shell_count
    }

    /// Euler characteristic `V - E + F` (2 for every sphere-like shell).
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.facet_count() as i64
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the vertex with the given id.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Returns the half-edge with the given id.
    #[inline]
    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.index()]
    }

    /// Returns the facet with the given id.
    #[inline]
    pub fn facet(&self, id: FacetId) -> &Facet {
        &self.facets[id.index()]
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, id: VertexId) -> DVec3 {
        self.vertices[id.index()].position
    }

    /// Unit outward normal of a facet.
    #[inline]
    pub fn facet_normal(&self, id: FacetId) -> DVec3 {
        self.facets[id.index()].normal
    }

    /// Shell a facet belongs to.
    #[inline]
    pub fn shell_of_facet(&self, id: FacetId) -> ShellId {
        self.facets[id.index()].shell
    }

    /// Shell a vertex belongs to.
    #[inline]
    pub fn shell_of_vertex(&self, id: VertexId) -> ShellId {
        self.shell_of_facet(self.half_edge(self.vertex(id).halfedge).facet)
    }

    /// True for the half-edge of each twin pair that represents the edge.
    #[inline]
    pub fn is_canonical(&self, id: HalfEdgeId) -> bool {
        id < self.half_edges[id.index()].twin
    }

    /// Iterates over all vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len() as u32).map(VertexId)
    }

    /// Iterates over all half-edge ids.
    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> {
        (0..self.half_edges.len() as u32).map(HalfEdgeId)
    }

    /// Iterates over all facet ids.
    pub fn facet_ids(&self) -> impl Iterator<Item = FacetId> {
        (0..self.facets.len() as u32).map(FacetId)
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    /// Iterates over the boundary half-edges of a facet in order.
    pub fn facet_cycle(&self, facet: FacetId) -> FacetCycle<'_> {
        let start = self.facets[facet.index()].halfedge;
        FacetCycle {
            polyhedron: self,
            start,
            current: Some(start),
        }
    }

    /// Corner vertices of a facet in boundary order.
    pub fn facet_vertices(&self, facet: FacetId) -> Vec<VertexId> {
        self.facet_cycle(facet)
            .map(|h| self.half_edge(h).source)
            .collect()
    }

    /// Iterates over the outgoing half-edges of a vertex in rotational order.
    ///
    /// Consecutive half-edges share a facet: the facet to the right of one is
    /// the facet to the left of the next.
    pub fn outgoing(&self, vertex: VertexId) -> Outgoing<'_> {
        let start = self.vertices[vertex.index()].halfedge;
        Outgoing {
            polyhedron: self,
            start,
            current: Some(start),
        }
    }

    /// Facets around a vertex in rotational order.
    pub fn facets_around(&self, vertex: VertexId) -> Vec<FacetId> {
        self.outgoing(vertex)
            .map(|h| self.half_edge(h).facet)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Translates every vertex by `offset`.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            v.position += offset;
        }
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut iter = self.vertices.iter().map(|v| v.position);
        let Some(first) = iter.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)))
    }
}

/// Iterator over the boundary cycle of a facet.
pub struct FacetCycle<'a> {
    polyhedron: &'a Polyhedron,
    start: HalfEdgeId,
    current: Option<HalfEdgeId>,
}

impl Iterator for FacetCycle<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let he = self.current?;
        let next = self.polyhedron.half_edge(he).next;
        self.current = (next != self.start).then_some(next);
        Some(he)
    }
}

/// Iterator over the outgoing half-edges of a vertex, using `twin(prev(h))`.
pub struct Outgoing<'a> {
    polyhedron: &'a Polyhedron,
    start: HalfEdgeId,
    current: Option<HalfEdgeId>,
}

impl Iterator for Outgoing<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let he = self.current?;
        let prev = self.polyhedron.half_edge(he).prev;
        let next = self.polyhedron.half_edge(prev).twin;
        self.current = (next != self.start).then_some(next);
        Some(he)
    }
}

/// Polygon normal by Newell's method (area-weighted, not normalized).
fn newell_normal(corners: &[DVec3]) -> DVec3 {
    let mut normal = DVec3::ZERO;
    for (i, a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}
