//! # Gauss-Map Builder
//!
//! Builds the spherical incidence map of one convex shell:
//!
//! - each facet maps to a spherical vertex at its outward normal
//! - each edge between facets of different normals maps to a twinned arc
//! - each polyhedron vertex with at least [`MIN_FACE_CIRCLES`] distinct facet
//!   planes maps to a spherical face marked with the vertex position
//!
//! ## Passes
//!
//! Construction runs three traversals of the shell, each a
//! [`ShellVisitor`] over shared bookkeeping:
//!
//! 1. **Vertex pass**: facet normals become spherical vertices (a facet whose
//!    normal is already present is omitted), edges between facets of equal
//!    normal are flagged flat, and vertices with too few planes are omitted.
//! 2. **Edge pass**: every surviving facet walks the boundary of its flat
//!    region, grouping consecutive edges shared with the same neighbour into
//!    one run. The first side of a run opens a stub arc at its spherical
//!    vertex, the second side completes it.
//! 3. **Face pass**: after rotations are linked, every surviving vertex
//!    claims the cycle left of the arc produced by one of its incoming edges.
//!
//! Inputs are assumed closed, oriented and convex; violations of that
//! contract are assertion failures.

use crate::config::KernelConfig;
use crate::mark::PointMark;
use crate::sphere::{DirectionIndex, SphereCircle};
use crate::sphere_map::{SHalfEdgeId, SVertexId, SphereMap};
use config::constants::MIN_FACE_CIRCLES;
use polyhedron::{visit_shell, FacetId, HalfEdgeId, Polyhedron, Shell, ShellVisitor, VertexId};

/// Builds Gauss maps of the shells of one polyhedron.
///
/// # Example
///
/// ```rust
/// use gauss_map::builder::GaussMapBuilder;
/// use gauss_map::KernelConfig;
/// use polyhedron::{primitives::cube, ShellId};
///
/// let poly = cube(1.0).unwrap();
/// let shell = poly.shell(ShellId(0)).unwrap();
/// let map = GaussMapBuilder::new(&poly, KernelConfig::default()).build(&shell);
/// assert_eq!(map.vertex_count(), 6);
/// assert_eq!(map.edge_count(), 12);
/// assert_eq!(map.face_count(), 8);
/// ```
pub struct GaussMapBuilder<'a> {
    polyhedron: &'a Polyhedron,
    config: KernelConfig,
}

impl<'a> GaussMapBuilder<'a> {
    /// Creates a builder for shells of `polyhedron`.
    pub fn new(polyhedron: &'a Polyhedron, config: KernelConfig) -> Self {
        Self { polyhedron, config }
    }

    /// Builds the spherical map of one shell.
    pub fn build(&self, shell: &Shell) -> SphereMap<PointMark> {
        let mut state = BuildState::new(self.polyhedron, self.config);

        visit_shell(self.polyhedron, shell, &mut VertexPass(&mut state));
        state.link_chains(self.polyhedron);
        visit_shell(self.polyhedron, shell, &mut EdgePass(&mut state));
        for h in state.map.half_edge_ids() {
            assert!(
                state.map.circle(h).is_defined(),
                "shell is not convex: arc {h:?} was never completed"
            );
        }
        state.map.link_rotations();
        visit_shell(self.polyhedron, shell, &mut FacePass(&mut state));

        log::debug!(
            "Gauss map of shell {:?}: {} vertices, {} edges, {} faces",
            shell.id,
            state.map.vertex_count(),
            state.map.edge_count(),
            state.map.face_count()
        );
        state.map
    }
}

/// Bookkeeping shared by the three passes of one construction.
struct BuildState {
    map: SphereMap<PointMark>,
    directions: DirectionIndex,
    /// Spherical vertex of every facet
    svertex_of: Vec<Option<SVertexId>>,
    /// Facets whose normal was already present
    omit_facet: Vec<bool>,
    /// Half-edges between facets of equal normal
    flat: Vec<bool>,
    /// Vertices with fewer than `MIN_FACE_CIRCLES` planes
    omit_vertex: Vec<bool>,
    /// Successor of a half-edge along the boundary of its flat region,
    /// stored when it differs from `next`
    chain_next: Vec<Option<HalfEdgeId>>,
    /// Arc produced for every boundary half-edge, starting at the spherical
    /// vertex of the half-edge's facet
    edge_map: Vec<Option<SHalfEdgeId>>,
    /// Facets already covered by a processed flat region
    region_done: Vec<bool>,
    /// Boundary half-edges already walked
    walked: Vec<bool>,
}

impl BuildState {
    fn new(polyhedron: &Polyhedron, config: KernelConfig) -> Self {
        let facets = polyhedron.facet_count();
        let half_edges = polyhedron.half_edge_count();
        Self {
            map: SphereMap::with_capacity(facets, half_edges, polyhedron.vertex_count()),
            directions: DirectionIndex::new(config.direction_tolerance),
            svertex_of: vec![None; facets],
            omit_facet: vec![false; facets],
            flat: vec![false; half_edges],
            omit_vertex: vec![false; polyhedron.vertex_count()],
            chain_next: vec![None; half_edges],
            edge_map: vec![None; half_edges],
            region_done: vec![false; facets],
            walked: vec![false; half_edges],
        }
    }

    fn svertex(&self, facet: FacetId) -> SVertexId {
        match self.svertex_of[facet.index()] {
            Some(sv) => sv,
            None => panic!("facet {facet:?} has no spherical vertex"),
        }
    }

    /// Next boundary half-edge of the flat region containing `h`.
    fn region_next(&self, polyhedron: &Polyhedron, h: HalfEdgeId) -> HalfEdgeId {
        if let Some(next) = self.chain_next[h.index()] {
            return next;
        }
        polyhedron.half_edge(h).next
    }
}

// =============================================================================
// PASS 1: SPHERICAL VERTICES
// =============================================================================

struct VertexPass<'s>(&'s mut BuildState);

impl ShellVisitor for VertexPass<'_> {
    fn visit_facet(&mut self, polyhedron: &Polyhedron, facet: FacetId) {
        let state = &mut *self.0;
        let normal = polyhedron.facet_normal(facet);
        let (index, inserted) = state.directions.find_or_insert(normal);
        if inserted {
            let sv = state.map.add_vertex(normal, PointMark::ORIGIN);
            debug_assert_eq!(sv.index(), index);
        } else {
            state.omit_facet[facet.index()] = true;
            log::trace!("facet {facet:?} omitted: normal already mapped to vertex {index}");
        }
        state.svertex_of[facet.index()] = Some(SVertexId(index as u32));
    }

    fn visit_edge(&mut self, polyhedron: &Polyhedron, halfedge: HalfEdgeId) {
        let state = &mut *self.0;
        let he = *polyhedron.half_edge(halfedge);
        let twin_facet = polyhedron.half_edge(he.twin).facet;
        if state.svertex(he.facet) != state.svertex(twin_facet) {
            return;
        }
        state.flat[halfedge.index()] = true;
        state.flat[he.twin.index()] = true;
        log::trace!("edge {halfedge:?} omitted: both facets share one normal");
    }

    fn visit_vertex(&mut self, polyhedron: &Polyhedron, vertex: VertexId) {
        let state = &mut *self.0;
        let fan: Vec<SVertexId> = polyhedron
            .facets_around(vertex)
            .into_iter()
            .map(|f| state.svertex(f))
            .collect();
        let Some(&first) = fan.first() else {
            return;
        };

        let mut circles = 1;
        let mut current = first;
        for &sv in &fan[1..] {
            if sv != current {
                if sv != first {
                    circles += 1;
                }
                current = sv;
            }
        }

        if circles < MIN_FACE_CIRCLES {
            state.omit_vertex[vertex.index()] = true;
            log::trace!("vertex {vertex:?} omitted: {circles} distinct planes");
        }
    }
}

impl BuildState {
    /// First non-flat half-edge reached from the flat half-edge `h` by
    /// stepping across flat edges into neighbouring facets.
    fn skip_flat(&self, polyhedron: &Polyhedron, h: HalfEdgeId) -> HalfEdgeId {
        let mut candidate = h;
        let mut steps = 0;
        while self.flat[candidate.index()] {
            candidate = polyhedron.half_edge(polyhedron.half_edge(candidate).twin).next;
            steps += 1;
            assert!(
                steps <= polyhedron.half_edge_count(),
                "flat region around {h:?} has no boundary"
            );
        }
        candidate
    }

    /// Records same-circle successors: a boundary half-edge followed by a
    /// flat one continues at the next boundary half-edge past the flat edges.
    fn link_chains(&mut self, polyhedron: &Polyhedron) {
        for h in polyhedron.half_edge_ids() {
            if self.flat[h.index()] {
                continue;
            }
            let next = polyhedron.half_edge(h).next;
            let successor = self.flat[next.index()].then(|| self.skip_flat(polyhedron, next));
            self.chain_next[h.index()] = successor;
        }
    }
}

// =============================================================================
// PASS 2: SPHERICAL ARCS
// =============================================================================

struct EdgePass<'s>(&'s mut BuildState);

impl ShellVisitor for EdgePass<'_> {
    fn visit_facet(&mut self, polyhedron: &Polyhedron, facet: FacetId) {
        let state = &mut *self.0;
        if state.omit_facet[facet.index()] || state.region_done[facet.index()] {
            return;
        }

        let sv = state.svertex(facet);
        for cycle in region_boundary(polyhedron, state, facet) {
            for run in neighbour_runs(polyhedron, state, &cycle) {
                state.connect_run(polyhedron, sv, &run);
            }
        }
    }
}

/// Boundary cycles of the flat region containing `facet`.
fn region_boundary(
    polyhedron: &Polyhedron,
    state: &mut BuildState,
    facet: FacetId,
) -> Vec<Vec<HalfEdgeId>> {
    let mut region = vec![facet];
    let mut stack = vec![facet];
    state.region_done[facet.index()] = true;
    while let Some(f) = stack.pop() {
        for h in polyhedron.facet_cycle(f) {
            if !state.flat[h.index()] {
                continue;
            }
            let g = polyhedron.half_edge(polyhedron.half_edge(h).twin).facet;
            if !state.region_done[g.index()] {
                state.region_done[g.index()] = true;
                region.push(g);
                stack.push(g);
            }
        }
    }

    let mut cycles = Vec::new();
    for &f in &region {
        for start in polyhedron.facet_cycle(f) {
            if state.flat[start.index()] || state.walked[start.index()] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut h = start;
            while !state.walked[h.index()] {
                state.walked[h.index()] = true;
                cycle.push(h);
                h = state.region_next(polyhedron, h);
            }
            assert_eq!(h, start, "boundary walk from {start:?} did not close");
            cycles.push(cycle);
        }
    }
    cycles
}

/// Splits a boundary cycle into maximal runs sharing one neighbour vertex.
fn neighbour_runs(
    polyhedron: &Polyhedron,
    state: &BuildState,
    cycle: &[HalfEdgeId],
) -> Vec<Vec<HalfEdgeId>> {
    let neighbour = |h: HalfEdgeId| state.svertex(polyhedron.half_edge(polyhedron.half_edge(h).twin).facet);

    // Start at a half-edge whose predecessor has a different neighbour
    let n = cycle.len();
    let offset = (0..n)
        .find(|&i| neighbour(cycle[i]) != neighbour(cycle[(i + n - 1) % n]))
        .unwrap_or_else(|| panic!("region boundary at {:?} touches a single neighbour", cycle[0]));

    let mut runs: Vec<Vec<HalfEdgeId>> = Vec::new();
    for i in 0..n {
        let h = cycle[(offset + i) % n];
        match runs.last_mut() {
            Some(run) if neighbour(run[0]) == neighbour(h) => run.push(h),
            _ => runs.push(vec![h]),
        }
    }
    runs
}

impl BuildState {
    /// Opens or completes the arc for one run of boundary half-edges of the
    /// region mapped to `sv`.
    fn connect_run(&mut self, polyhedron: &Polyhedron, sv: SVertexId, run: &[HalfEdgeId]) {
        let opposite = run
            .iter()
            .find_map(|&h| self.edge_map[polyhedron.half_edge(h).twin.index()]);

        let arc = match opposite {
            Some(stub) => {
                let source = self.map.source(stub);
                let circle = SphereCircle::through(self.map.point(source), self.map.point(sv))
                    .unwrap_or_else(|| {
                        panic!("arc between vertices {source:?} and {sv:?} has no supporting circle")
                    });
                self.map.complete_stub(stub, sv, circle);
                log::trace!("arc {stub:?} completed: {source:?} -> {sv:?}");
                self.map.twin(stub)
            }
            None => {
                let stub = self.map.add_stub(sv, PointMark::ORIGIN);
                log::trace!("arc {stub:?} opened at {sv:?} for {} edges", run.len());
                stub
            }
        };

        for &h in run {
            self.edge_map[h.index()] = Some(arc);
        }
    }
}

// =============================================================================
// PASS 3: SPHERICAL FACES
// =============================================================================

struct FacePass<'s>(&'s mut BuildState);

impl ShellVisitor for FacePass<'_> {
    fn visit_vertex(&mut self, polyhedron: &Polyhedron, vertex: VertexId) {
        let state = &mut *self.0;
        if state.omit_vertex[vertex.index()] {
            return;
        }

        // The arc of an incoming edge has the vertex's normal cone on its left
        let arc = polyhedron
            .outgoing(vertex)
            .find_map(|out| state.edge_map[polyhedron.half_edge(out).twin.index()]);
        let Some(arc) = arc else {
            panic!("vertex {vertex:?} has no incoming edge with an arc");
        };
        assert!(
            state.map.incident_face(arc).is_none(),
            "cycle of arc {arc:?} already claimed by another vertex"
        );

        let face = state.map.add_face(PointMark(polyhedron.position(vertex)));
        state.map.assign_cycle(face, arc);
        log::trace!("face {face:?} created for vertex {vertex:?}");
    }
}
