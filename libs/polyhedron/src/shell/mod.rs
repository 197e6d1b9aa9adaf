//! # Shells
//!
//! A shell is one connected component of a polyhedron's boundary. The Gauss
//! map of a solid is built shell by shell, so this module exposes the
//! elements of a shell and a visitor-based traversal over them.
//!
//! ## Traversal order
//!
//! [`visit_shell`] calls the visitor for every facet of the shell (ascending
//! id), then for every undirected edge (its canonical half-edge, ascending
//! id), then for every vertex (ascending id). Callers that need several
//! ordered passes run several traversals.

use crate::mesh::{FacetId, HalfEdgeId, Polyhedron, ShellId, VertexId};

/// Elements of one connected component of a polyhedron boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    /// Component id
    pub id: ShellId,
    /// Facets of the shell
    pub facets: Vec<FacetId>,
    /// Canonical half-edge of every undirected edge of the shell
    pub edges: Vec<HalfEdgeId>,
    /// Vertices of the shell
    pub vertices: Vec<VertexId>,
}

/// Callbacks for a shell traversal, one per element kind.
///
/// Every method defaults to a no-op so visitors only implement the kinds
/// they care about.
pub trait ShellVisitor {
    /// Called once per facet.
    fn visit_facet(&mut self, _polyhedron: &Polyhedron, _facet: FacetId) {}

    /// Called once per undirected edge with its canonical half-edge.
    fn visit_edge(&mut self, _polyhedron: &Polyhedron, _halfedge: HalfEdgeId) {}

    /// Called once per vertex.
    fn visit_vertex(&mut self, _polyhedron: &Polyhedron, _vertex: VertexId) {}
}

impl Polyhedron {
    /// Collects the elements of one shell.
    ///
    /// Returns `None` if the id is out of range.
    pub fn shell(&self, id: ShellId) -> Option<Shell> {
        if id.index() >= self.shell_count() {
            return None;
        }
        let facets = self
            .facet_ids()
            .filter(|&f| self.shell_of_facet(f) == id)
            .collect();
        let edges = self
            .half_edge_ids()
            .filter(|&h| self.is_canonical(h) && self.shell_of_facet(self.half_edge(h).facet) == id)
            .collect();
        let vertices = self
            .vertex_ids()
            .filter(|&v| self.shell_of_vertex(v) == id)
            .collect();
        Some(Shell {
            id,
            facets,
            edges,
            vertices,
        })
    }

    /// Collects every shell of the polyhedron.
    pub fn shells(&self) -> Vec<Shell> {
        (0..self.shell_count() as u32)
            .filter_map(|i| self.shell(ShellId(i)))
            .collect()
    }
}

/// Runs `visitor` over the facets, edges and vertices of one shell.
///
/// # Example
///
/// ```rust
/// use polyhedron::primitives::cube;
/// use polyhedron::{visit_shell, FacetId, Polyhedron, ShellId, ShellVisitor};
///
/// struct FacetCounter(usize);
///
/// impl ShellVisitor for FacetCounter {
///     fn visit_facet(&mut self, _: &Polyhedron, _: FacetId) {
///         self.0 += 1;
///     }
/// }
///
/// let poly = cube(1.0).unwrap();
/// let shell = poly.shell(ShellId(0)).unwrap();
/// let mut counter = FacetCounter(0);
/// visit_shell(&poly, &shell, &mut counter);
/// assert_eq!(counter.0, 6);
/// ```
pub fn visit_shell<V: ShellVisitor + ?Sized>(polyhedron: &Polyhedron, shell: &Shell, visitor: &mut V) {
    for &facet in &shell.facets {
        visitor.visit_facet(polyhedron, facet);
    }
    for &edge in &shell.edges {
        visitor.visit_edge(polyhedron, edge);
    }
    for &vertex in &shell.vertices {
        visitor.visit_vertex(polyhedron, vertex);
    }
}

/// Runs `visitor` over every shell of the polyhedron in id order.
pub fn visit_all<V: ShellVisitor + ?Sized>(polyhedron: &Polyhedron, visitor: &mut V) {
    for shell in polyhedron.shells() {
        visit_shell(polyhedron, &shell, visitor);
    }
}
