//! # Spherical Incidence Map
//!
//! Subdivision of the unit sphere into vertices (directions), twinned
//! half-edges (arcs of great circles) and faces bounded by half-edge cycles.
//! Elements live in arenas and reference each other by index.
//!
//! ## Invariants
//!
//! - `twin(twin(e)) == e`; twins are allocated as adjacent pairs
//! - `next(prev(e)) == e` and `source(next(e)) == target(e)`
//! - every half-edge of a `next` cycle reports the same face, which lies to
//!   the left of the half-edge (toward its circle normal)
//! - a face records one boundary half-edge per boundary cycle; a face with
//!   no cycle covers the whole sphere
//!
//! Marks are an arbitrary payload carried by every element. Faces built
//! from a polyhedron carry the position of the vertex they represent.

use crate::error::{TopologyError, TopologyResult};
use crate::sphere::{ccw_order, SphereCircle};
use glam::DVec3;

/// Invalid/null reference constant.
const INVALID: u32 = u32::MAX;

/// Index type for spherical vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SVertexId(pub u32);

/// Index type for spherical half-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SHalfEdgeId(pub u32);

/// Index type for spherical faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SFaceId(pub u32);

macro_rules! impl_index {
    ($($name:ident),*) => {
        $(
            impl $name {
                /// Position of the element in its arena.
                #[inline]
                pub fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

impl_index!(SVertexId, SHalfEdgeId, SFaceId);

/// Point on the sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SVertex<M> {
    /// Unit direction
    pub point: DVec3,
    /// Payload
    pub mark: M,
    /// One outgoing half-edge, `None` for an isolated vertex
    pub out: Option<SHalfEdgeId>,
}

/// Directed arc between two spherical vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct SHalfEdge<M> {
    /// Start vertex
    pub source: SVertexId,
    /// Opposite half-edge
    pub twin: SHalfEdgeId,
    /// Next half-edge of the face cycle
    pub next: Option<SHalfEdgeId>,
    /// Previous half-edge of the face cycle
    pub prev: Option<SHalfEdgeId>,
    /// Oriented supporting great circle
    pub circle: SphereCircle,
    /// Payload
    pub mark: M,
    /// Face to the left
    pub face: Option<SFaceId>,
}

/// Region of the sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SFace<M> {
    /// Payload
    pub mark: M,
    /// One half-edge per boundary cycle
    pub boundary: Vec<SHalfEdgeId>,
}

/// Arena-allocated spherical subdivision with marks of type `M`.
#[derive(Debug, Clone)]
pub struct SphereMap<M> {
    vertices: Vec<SVertex<M>>,
    half_edges: Vec<SHalfEdge<M>>,
    faces: Vec<SFace<M>>,
}

impl<M> Default for SphereMap<M> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            half_edges: Vec::new(),
            faces: Vec::new(),
        }
    }
}

impl<M: Clone> SphereMap<M> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with reserved capacity.
    pub fn with_capacity(vertices: usize, half_edges: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            half_edges: Vec::with_capacity(half_edges),
            faces: Vec::with_capacity(faces),
        }
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Adds an isolated vertex.
    pub fn add_vertex(&mut self, point: DVec3, mark: M) -> SVertexId {
        let id = SVertexId(self.vertices.len() as u32);
        self.vertices.push(SVertex {
            point,
            mark,
            out: None,
        });
        id
    }

    /// Adds a face without boundary cycles.
    pub fn add_face(&mut self, mark: M) -> SFaceId {
        let id = SFaceId(self.faces.len() as u32);
        self.faces.push(SFace {
            mark,
            boundary: Vec::new(),
        });
        id
    }

    /// Adds a twinned pair `source -> target` on `circle`; the twin gets
    /// the opposite circle. Returns the half-edge starting at `source`.
    ///
    /// Cycle links are left unset.
    pub fn add_edge_pair(
        &mut self,
        source: SVertexId,
        target: SVertexId,
        circle: SphereCircle,
        mark: M,
    ) -> SHalfEdgeId {
        let h = self.push_pair(source, mark);
        self.complete_stub(h, target, circle);
        h
    }

    /// Adds a twinned pair whose twin has no source yet. Complete it with
    /// [`complete_stub`](Self::complete_stub).
    pub fn add_stub(&mut self, source: SVertexId, mark: M) -> SHalfEdgeId {
        self.push_pair(source, mark)
    }

    fn push_pair(&mut self, source: SVertexId, mark: M) -> SHalfEdgeId {
        let h = SHalfEdgeId(self.half_edges.len() as u32);
        let t = SHalfEdgeId(h.0 + 1);
        for (id, twin, from) in [(h, t, source), (t, h, SVertexId(INVALID))] {
            debug_assert_eq!(id.index(), self.half_edges.len());
            self.half_edges.push(SHalfEdge {
                source: from,
                twin,
                next: None,
                prev: None,
                circle: SphereCircle::default(),
                mark: mark.clone(),
                face: None,
            });
        }
        let vertex = &mut self.vertices[source.index()];
        if vertex.out.is_none() {
            vertex.out = Some(h);
        }
        h
    }

    /// Gives the twin of `h` its source and sets both supporting circles.
    pub fn complete_stub(&mut self, h: SHalfEdgeId, target: SVertexId, circle: SphereCircle) {
        let t = self.half_edges[h.index()].twin;
        self.half_edges[h.index()].circle = circle;
        let twin = &mut self.half_edges[t.index()];
        twin.source = target;
        twin.circle = circle.opposite();
        let vertex = &mut self.vertices[target.index()];
        if vertex.out.is_none() {
            vertex.out = Some(t);
        }
    }

    /// Sets `next(h) = next` and `prev(next) = h`.
    #[inline]
    pub fn link(&mut self, h: SHalfEdgeId, next: SHalfEdgeId) {
        self.half_edges[h.index()].next = Some(next);
        self.half_edges[next.index()].prev = Some(h);
    }

    /// Assigns the cycle through `start` to `face` and records `start` as a
    /// boundary entry of the face.
    pub fn assign_cycle(&mut self, face: SFaceId, start: SHalfEdgeId) {
        let cycle: Vec<SHalfEdgeId> = self.cycle(start).collect();
        for h in cycle {
            self.half_edges[h.index()].face = Some(face);
        }
        self.faces[face.index()].boundary.push(start);
    }

    /// Links every vertex's outgoing half-edges into face cycles by their
    /// rotational order.
    ///
    /// Out-edges are sorted counter-clockwise around the vertex by their
    /// tangents; an arc arriving along `o_j` continues along its clockwise
    /// neighbour `o_{j-1}`, which keeps each face to the left of its cycle.
    pub fn link_rotations(&mut self) {
        let mut fans: Vec<Vec<SHalfEdgeId>> = vec![Vec::new(); self.vertices.len()];
        for h in self.half_edge_ids() {
            fans[self.source(h).index()].push(h);
        }

        for (v, fan) in fans.iter_mut().enumerate() {
            let Some(&first) = fan.first() else {
                self.vertices[v].out = None;
                continue;
            };
            let p = self.vertices[v].point;
            let reference = self.tangent(first);
            fan.sort_by(|&a, &b| ccw_order(p, reference, self.tangent(a), self.tangent(b)));

            for j in 0..fan.len() {
                let cw_neighbor = fan[(j + fan.len() - 1) % fan.len()];
                let arriving = self.twin(fan[j]);
                self.link(arriving, cw_neighbor);
            }
            self.vertices[v].out = Some(fan[0]);
        }
    }

    /// One half-edge of every distinct `next` cycle, in id order.
    pub fn cycle_representatives(&self) -> Vec<SHalfEdgeId> {
        let mut seen = vec![false; self.half_edges.len()];
        let mut reps = Vec::new();
        for h in self.half_edge_ids() {
            if seen[h.index()] {
                continue;
            }
            reps.push(h);
            for e in self.cycle(h) {
                seen[e.index()] = true;
            }
        }
        reps
    }

    /// Creates one face per cycle, marked by `mark_of(representative)`.
    pub fn create_faces_per_cycle(&mut self, mut mark_of: impl FnMut(&Self, SHalfEdgeId) -> M) {
        for rep in self.cycle_representatives() {
            let mark = mark_of(self, rep);
            let face = self.add_face(mark);
            self.assign_cycle(face, rep);
        }
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Mutable vertex access.
    #[inline]
    pub fn vertex_mut(&mut self, id: SVertexId) -> &mut SVertex<M> {
        &mut self.vertices[id.index()]
    }

    /// Mutable half-edge access.
    #[inline]
    pub fn half_edge_mut(&mut self, id: SHalfEdgeId) -> &mut SHalfEdge<M> {
        &mut self.half_edges[id.index()]
    }

    /// Mutable face access.
    #[inline]
    pub fn face_mut(&mut self, id: SFaceId) -> &mut SFace<M> {
        &mut self.faces[id.index()]
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.half_edges.clear();
        self.faces.clear();
    }
}

impl<M> SphereMap<M> {
    // -------------------------------------------------------------------------
    // Counts
    // -------------------------------------------------------------------------

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of half-edges (twice the number of edges).
    #[inline]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.half_edges.len() / 2
    }

    /// Number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True if the map has no elements at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.half_edges.is_empty() && self.faces.is_empty()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns a vertex.
    #[inline]
    pub fn vertex(&self, id: SVertexId) -> &SVertex<M> {
        &self.vertices[id.index()]
    }

    /// Returns a half-edge.
    #[inline]
    pub fn half_edge(&self, id: SHalfEdgeId) -> &SHalfEdge<M> {
        &self.half_edges[id.index()]
    }

    /// Returns a face.
    #[inline]
    pub fn face(&self, id: SFaceId) -> &SFace<M> {
        &self.faces[id.index()]
    }

    /// Direction of a vertex.
    #[inline]
    pub fn point(&self, id: SVertexId) -> DVec3 {
        self.vertices[id.index()].point
    }

    /// Start vertex of a half-edge.
    #[inline]
    pub fn source(&self, h: SHalfEdgeId) -> SVertexId {
        self.half_edges[h.index()].source
    }

    /// End vertex of a half-edge.
    #[inline]
    pub fn target(&self, h: SHalfEdgeId) -> SVertexId {
        self.source(self.twin(h))
    }

    /// Opposite half-edge.
    #[inline]
    pub fn twin(&self, h: SHalfEdgeId) -> SHalfEdgeId {
        self.half_edges[h.index()].twin
    }

    /// Supporting circle of a half-edge.
    #[inline]
    pub fn circle(&self, h: SHalfEdgeId) -> SphereCircle {
        self.half_edges[h.index()].circle
    }

    /// Face to the left of a half-edge.
    #[inline]
    pub fn incident_face(&self, h: SHalfEdgeId) -> Option<SFaceId> {
        self.half_edges[h.index()].face
    }

    /// Direction of travel of `h` at its source.
    pub fn tangent(&self, h: SHalfEdgeId) -> DVec3 {
        let he = &self.half_edges[h.index()];
        he.circle.tangent_at(self.vertices[he.source.index()].point)
    }

    /// True for the member of each twin pair that represents the edge.
    #[inline]
    pub fn is_canonical(&self, h: SHalfEdgeId) -> bool {
        h < self.half_edges[h.index()].twin
    }

    /// True if the vertex has no incident half-edge.
    #[inline]
    pub fn is_isolated(&self, v: SVertexId) -> bool {
        self.vertices[v.index()].out.is_none()
    }

    /// Iterates over all vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = SVertexId> {
        (0..self.vertices.len() as u32).map(SVertexId)
    }

    /// Iterates over all half-edge ids.
    pub fn half_edge_ids(&self) -> impl Iterator<Item = SHalfEdgeId> {
        (0..self.half_edges.len() as u32).map(SHalfEdgeId)
    }

    /// Iterates over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = SFaceId> {
        (0..self.faces.len() as u32).map(SFaceId)
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    /// Iterates over the `next` cycle starting at `start`.
    ///
    /// Stops early at an unlinked half-edge.
    pub fn cycle(&self, start: SHalfEdgeId) -> Cycle<'_, M> {
        Cycle {
            map: self,
            start,
            current: Some(start),
        }
    }

    /// Iterates over the outgoing half-edges of a vertex, counter-clockwise.
    pub fn out_edges(&self, v: SVertexId) -> OutEdges<'_, M> {
        let start = self.vertices[v.index()].out;
        OutEdges {
            map: self,
            start,
            current: start,
        }
    }

    /// Number of outgoing half-edges of a vertex.
    pub fn degree(&self, v: SVertexId) -> usize {
        self.out_edges(v).count()
    }

    /// Faces around a vertex, counter-clockwise: the face between `o_j` and
    /// `o_{j+1}` is the face left of `o_j`.
    pub fn faces_around(&self, v: SVertexId) -> Vec<SFaceId> {
        self.out_edges(v)
            .filter_map(|h| self.incident_face(h))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Checks every structural invariant of the map.
    ///
    /// # Errors
    ///
    /// Returns the first [`TopologyError`] found.
    pub fn validate(&self) -> TopologyResult<()> {
        let half_edges = self.half_edges.len();

        for (i, he) in self.half_edges.iter().enumerate() {
            let h = SHalfEdgeId(i as u32);

            if he.source.index() >= self.vertices.len() {
                return Err(TopologyError::InvalidVertex(he.source));
            }
            if he.twin.index() >= half_edges {
                return Err(TopologyError::InvalidHalfEdge(he.twin));
            }
            if he.twin == h || self.half_edges[he.twin.index()].twin != h {
                return Err(TopologyError::TwinMismatch(h));
            }
            if !he.circle.is_defined() {
                return Err(TopologyError::UndefinedCircle(h));
            }

            let (Some(next), Some(prev)) = (he.next, he.prev) else {
                return Err(TopologyError::Unlinked(h));
            };
            if next.index() >= half_edges {
                return Err(TopologyError::InvalidHalfEdge(next));
            }
            if prev.index() >= half_edges {
                return Err(TopologyError::InvalidHalfEdge(prev));
            }
            if self.half_edges[prev.index()].next != Some(h) {
                return Err(TopologyError::Unlinked(h));
            }
            if self.half_edges[next.index()].source != self.half_edges[he.twin.index()].source {
                return Err(TopologyError::BrokenCycle(h));
            }

            match he.face {
                None => return Err(TopologyError::FaceMismatch(h)),
                Some(f) if f.index() >= self.faces.len() => {
                    return Err(TopologyError::InvalidFace(f))
                }
                Some(f) => {
                    if self.half_edges[next.index()].face != Some(f) {
                        return Err(TopologyError::FaceMismatch(next));
                    }
                }
            }
        }

        for (i, vertex) in self.vertices.iter().enumerate() {
            if let Some(out) = vertex.out {
                if out.index() >= half_edges {
                    return Err(TopologyError::InvalidHalfEdge(out));
                }
                if self.half_edges[out.index()].source.index() != i {
                    return Err(TopologyError::VertexMismatch(SVertexId(i as u32)));
                }
            }
        }

        // Every cycle must be listed by its face exactly once
        let mut listed = vec![0usize; half_edges];
        for (i, face) in self.faces.iter().enumerate() {
            for &start in &face.boundary {
                if start.index() >= half_edges {
                    return Err(TopologyError::InvalidHalfEdge(start));
                }
                if self.half_edges[start.index()].face != Some(SFaceId(i as u32)) {
                    return Err(TopologyError::FaceMismatch(start));
                }
                for h in self.cycle(start) {
                    listed[h.index()] += 1;
                }
            }
        }
        if let Some(i) = listed.iter().position(|&count| count != 1) {
            return Err(TopologyError::BoundaryMismatch(SHalfEdgeId(i as u32)));
        }

        Ok(())
    }
}

/// Iterator over a face cycle.
pub struct Cycle<'a, M> {
    map: &'a SphereMap<M>,
    start: SHalfEdgeId,
    current: Option<SHalfEdgeId>,
}

impl<M> Iterator for Cycle<'_, M> {
    type Item = SHalfEdgeId;

    fn next(&mut self) -> Option<SHalfEdgeId> {
        let h = self.current?;
        self.current = self.map.half_edges[h.index()]
            .next
            .filter(|&next| next != self.start);
        Some(h)
    }
}

/// Iterator over the outgoing half-edges of a vertex, using `twin(prev(e))`.
pub struct OutEdges<'a, M> {
    map: &'a SphereMap<M>,
    start: Option<SHalfEdgeId>,
    current: Option<SHalfEdgeId>,
}

impl<M> Iterator for OutEdges<'_, M> {
    type Item = SHalfEdgeId;

    fn next(&mut self) -> Option<SHalfEdgeId> {
        let h = self.current?;
        self.current = self.map.half_edges[h.index()]
            .prev
            .map(|prev| self.map.half_edges[prev.index()].twin)
            .filter(|&next| Some(next) != self.start);
        Some(h)
    }
}

#[cfg(test)]
mod tests;
