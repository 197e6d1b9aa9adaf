//! # Simplification
//!
//! Removes structure that does not separate anything:
//!
//! - edges whose two sides carry equal face marks (the faces are merged)
//! - vertices left without edges
//! - vertices of degree two whose edges continue along one great circle
//!
//! The map is rebuilt from what survives. Faces are grouped with a
//! union-find forest while edges are deleted, and every surviving cycle is
//! attached to the face of its group.

mod union_find;

pub use union_find::UnionFind;

use crate::config::KernelConfig;
use crate::sphere_map::{SFaceId, SHalfEdgeId, SVertexId, SphereMap};

/// What a simplification pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Simplification {
    /// Edges deleted or joined with a neighbour
    pub edges_removed: usize,
    /// Vertices deleted or elided
    pub vertices_removed: usize,
    /// Faces merged into a neighbour
    pub faces_removed: usize,
}

impl Simplification {
    /// True if the pass left the map unchanged.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Simplifies `map` in place.
///
/// Applying it twice changes nothing the second time.
pub fn simplify<M>(map: &mut SphereMap<M>, config: &KernelConfig) -> Simplification
where
    M: Clone + PartialEq,
{
    let mut faces = UnionFind::new(map.face_count());
    let deleted = delete_redundant_edges(map, &mut faces);
    let alive = alive_out_edges(map, &deleted);

    let mut keep: Vec<bool> = map
        .vertex_ids()
        .map(|v| match alive[v.index()].as_slice() {
            [] => false,
            &[e1, e2] => !is_elidable(map, e1, e2, config),
            _ => true,
        })
        .collect();
    unelide_loops(map, &alive, &deleted, &mut keep);

    let (mut result, origin) = rebuild_edges(map, &alive, &deleted, &keep);
    result.link_rotations();
    attach_faces(map, &mut result, &origin, &mut faces);

    let report = Simplification {
        edges_removed: map.edge_count() - result.edge_count(),
        vertices_removed: map.vertex_count() - result.vertex_count(),
        faces_removed: map.face_count() - result.face_count(),
    };
    if !report.is_noop() {
        log::debug!(
            "simplify: removed {} edges, {} vertices, {} faces",
            report.edges_removed,
            report.vertices_removed,
            report.faces_removed
        );
    }
    *map = result;
    report
}

/// Marks both halves of every edge separating equally marked faces as
/// deleted and unions those faces.
fn delete_redundant_edges<M: PartialEq>(map: &SphereMap<M>, faces: &mut UnionFind) -> Vec<bool> {
    let mut deleted = vec![false; map.half_edge_count()];
    for h in map.half_edge_ids().filter(|&h| map.is_canonical(h)) {
        let twin = map.twin(h);
        let (Some(left), Some(right)) = (map.incident_face(h), map.incident_face(twin)) else {
            continue;
        };
        if map.face(left).mark != map.face(right).mark {
            continue;
        }
        log::trace!("simplify: deleting edge {h:?} between {left:?} and {right:?}");
        faces.union(left.index(), right.index());
        deleted[h.index()] = true;
        deleted[twin.index()] = true;
    }
    deleted
}

/// Surviving out-edges of every vertex.
fn alive_out_edges<M>(map: &SphereMap<M>, deleted: &[bool]) -> Vec<Vec<SHalfEdgeId>> {
    let mut alive = vec![Vec::new(); map.vertex_count()];
    for h in map.half_edge_ids().filter(|h| !deleted[h.index()]) {
        alive[map.source(h).index()].push(h);
    }
    alive
}

/// A degree-two vertex is redundant if arriving along one edge and leaving
/// along the other stays on the same oriented circle.
fn is_elidable<M>(
    map: &SphereMap<M>,
    e1: SHalfEdgeId,
    e2: SHalfEdgeId,
    config: &KernelConfig,
) -> bool {
    let v = map.source(e1);
    if map.target(e1) == v || map.target(e2) == v {
        return false;
    }
    map.circle(map.twin(e1))
        .is_same(&map.circle(e2), config.circle_tolerance)
}

/// Edge continuing a chain through the elided target of `h`.
fn chain_step<M>(map: &SphereMap<M>, alive: &[Vec<SHalfEdgeId>], h: SHalfEdgeId) -> SHalfEdgeId {
    let back = map.twin(h);
    let out = &alive[map.target(h).index()];
    if out[0] == back {
        out[1]
    } else {
        out[0]
    }
}

/// A circle made only of elided vertices keeps two of them so it still has
/// edges.
fn unelide_loops<M>(
    map: &SphereMap<M>,
    alive: &[Vec<SHalfEdgeId>],
    deleted: &[bool],
    keep: &mut [bool],
) {
    let mut walked = vec![false; map.half_edge_count()];
    for h in map.half_edge_ids() {
        if deleted[h.index()] || walked[h.index()] || keep[map.source(h).index()] {
            continue;
        }
        let start = map.source(h);
        let mut chain = vec![start];
        let mut cur = h;
        loop {
            walked[cur.index()] = true;
            walked[map.twin(cur).index()] = true;
            let next = map.target(cur);
            if keep[next.index()] {
                break;
            }
            if next == start {
                keep[start.index()] = true;
                keep[chain[chain.len() / 2].index()] = true;
                log::trace!("simplify: closed chain through {start:?}");
                break;
            }
            chain.push(next);
            cur = chain_step(map, alive, cur);
        }
    }
}

/// Builds kept vertices and one edge pair per chain of surviving edges.
/// Returns the new map with the input half-edge starting each new
/// half-edge's chain.
fn rebuild_edges<M: Clone>(
    map: &SphereMap<M>,
    alive: &[Vec<SHalfEdgeId>],
    deleted: &[bool],
    keep: &[bool],
) -> (SphereMap<M>, Vec<SHalfEdgeId>) {
    let kept = keep.iter().filter(|k| **k).count();
    let mut result = SphereMap::with_capacity(kept, 0, 0);
    let mut vertex_of: Vec<Option<SVertexId>> = vec![None; map.vertex_count()];
    for v in map.vertex_ids().filter(|v| keep[v.index()]) {
        let vertex = map.vertex(v);
        vertex_of[v.index()] = Some(result.add_vertex(vertex.point, vertex.mark.clone()));
    }

    let mut origin = Vec::new();
    let mut emitted = vec![false; map.half_edge_count()];
    for h in map.half_edge_ids() {
        if deleted[h.index()] || emitted[h.index()] {
            continue;
        }
        let Some(from) = vertex_of[map.source(h).index()] else {
            continue;
        };
        let mut last = h;
        emitted[h.index()] = true;
        while vertex_of[map.target(last).index()].is_none() {
            last = chain_step(map, alive, last);
            emitted[last.index()] = true;
        }
        let Some(to) = vertex_of[map.target(last).index()] else {
            continue;
        };
        let reverse = map.twin(last);
        emitted[reverse.index()] = true;

        result.add_edge_pair(from, to, map.circle(h), map.half_edge(h).mark.clone());
        origin.push(h);
        origin.push(reverse);
    }
    (result, origin)
}

/// Creates one face per group of merged faces and attaches every cycle of
/// `result` to the face of its group.
fn attach_faces<M: Clone>(
    map: &SphereMap<M>,
    result: &mut SphereMap<M>,
    origin: &[SHalfEdgeId],
    faces: &mut UnionFind,
) {
    let mut face_of: Vec<Option<SFaceId>> = vec![None; map.face_count()];
    for f in map.face_ids() {
        if faces.is_root(f.index()) {
            face_of[f.index()] = Some(result.add_face(map.face(f).mark.clone()));
        }
    }

    for start in result.cycle_representatives() {
        let Some(old) = map.incident_face(origin[start.index()]) else {
            continue;
        };
        if let Some(face) = face_of[faces.find(old.index())] {
            result.assign_cycle(face, start);
        }
    }
}

#[cfg(test)]
mod tests;
