//! # Overlay Engine
//!
//! Topological overlay of two spherical subdivisions. Every arc of one
//! input is split where it meets the other input (crossings, vertices lying
//! on it, shared stretches), coincident pieces are merged, rotations and
//! face cycles are rebuilt, and every resulting face is marked with a
//! combination of the marks of the two input faces covering it.
//!
//! ## Covering faces
//!
//! A result half-edge that lies along an input half-edge in the same
//! direction has that input face on its left. Faces with such an edge on
//! their boundary learn their covering face directly; the others inherit it
//! from a neighbour across an edge that does not come from that input.
//!
//! Vertex and half-edge marks of the result are the neutral `M::default()`.
//!
//! ## Complexity
//!
//! Crossings are found by testing every arc of one input against every arc
//! of the other, and split points by testing every vertex against every
//! arc, so the overlay is `O(E_a * E_b + V * (E_a + E_b))`. Rebuilding
//! rotations, cycles and covering faces is linear up to the per-vertex sort.

use crate::config::KernelConfig;
use crate::sphere::{Arc, DirectionIndex, SphereCircle};
use crate::sphere_map::{SFaceId, SHalfEdgeId, SVertexId, SphereMap};
use glam::DVec3;
use std::collections::{HashMap, VecDeque};

/// One input edge and the shared vertices found on it.
struct Segment {
    arc: Arc,
    input: usize,
    half_edge: SHalfEdgeId,
    /// Shared vertices on the arc with their travel from the source
    splits: Vec<(f64, usize)>,
}

/// Piece of the result, oriented `from -> to`.
struct Piece {
    from: usize,
    to: usize,
    circle: SphereCircle,
    /// Input half-edge running along the piece in the same direction
    origins: [Option<SHalfEdgeId>; 2],
}

/// Overlays `a` and `b`, marking each result face with
/// `combine(mark of covering face of a, mark of covering face of b)`.
///
/// A map without edges covers the sphere with its single face (or the
/// neutral mark when it has no face). The result is validated by
/// assertion: both inputs must be valid subdivisions whose union is
/// connected.
///
/// # Example
///
/// ```rust
/// use gauss_map::builder::GaussMapBuilder;
/// use gauss_map::overlay::overlay;
/// use gauss_map::KernelConfig;
/// use polyhedron::{primitives::cube, ShellId};
///
/// let poly = cube(1.0).unwrap();
/// let shell = poly.shell(ShellId(0)).unwrap();
/// let config = KernelConfig::default();
/// let map = GaussMapBuilder::new(&poly, config).build(&shell);
///
/// let sum = overlay(&map, &map, &config, |a, b| *a + *b);
/// assert_eq!(sum.face_count(), 8);
/// ```
pub fn overlay<M, F>(
    a: &SphereMap<M>,
    b: &SphereMap<M>,
    config: &KernelConfig,
    mut combine: F,
) -> SphereMap<M>
where
    M: Clone + Default,
    F: FnMut(&M, &M) -> M,
{
    if a.half_edge_count() == 0 {
        let constant = sole_mark(a);
        return remark(b, |mark| combine(&constant, mark));
    }
    if b.half_edge_count() == 0 {
        let constant = sole_mark(b);
        return remark(a, |mark| combine(mark, &constant));
    }

    let inputs = [a, b];
    let (positions, mut segments) = collect_segments(&inputs, config);
    split_segments(&positions, &mut segments, config);
    let pieces = merge_pieces(&inputs, &segments);

    let mut result = SphereMap::with_capacity(positions.len(), 2 * pieces.len(), 0);
    let mut vertex_of: Vec<Option<SVertexId>> = vec![None; positions.len()];
    let mut origins: [Vec<Option<SHalfEdgeId>>; 2] = [Vec::new(), Vec::new()];

    for piece in &pieces {
        let mut vertex = |i: usize, result: &mut SphereMap<M>| {
            *vertex_of[i].get_or_insert_with(|| result.add_vertex(positions[i], M::default()))
        };
        let from = vertex(piece.from, &mut result);
        let to = vertex(piece.to, &mut result);
        result.add_edge_pair(from, to, piece.circle, M::default());
        for (k, input) in inputs.iter().enumerate() {
            origins[k].push(piece.origins[k]);
            origins[k].push(piece.origins[k].map(|h| input.twin(h)));
        }
    }

    result.link_rotations();
    result.create_faces_per_cycle(|_, _| M::default());

    let euler =
        result.vertex_count() as i64 - result.edge_count() as i64 + result.face_count() as i64;
    assert_eq!(euler, 2, "overlay result is not a connected subdivision");

    let cover_a = covering_faces(&result, &origins[0], a);
    let cover_b = covering_faces(&result, &origins[1], b);
    for f in result.face_ids().collect::<Vec<_>>() {
        let (Some(fa), Some(fb)) = (cover_a[f.index()], cover_b[f.index()]) else {
            panic!("overlay face {f:?} has no covering input face");
        };
        let mark = combine(&a.face(fa).mark, &b.face(fb).mark);
        result.face_mut(f).mark = mark;
    }

    log::debug!(
        "overlay: {} + {} edges -> {} vertices, {} edges, {} faces",
        a.edge_count(),
        b.edge_count(),
        result.vertex_count(),
        result.edge_count(),
        result.face_count()
    );
    result
}

/// Mark of the face covering an edgeless map.
fn sole_mark<M: Clone + Default>(map: &SphereMap<M>) -> M {
    map.face_ids()
        .next()
        .map(|f| map.face(f).mark.clone())
        .unwrap_or_default()
}

/// Copy of `map` with every face mark replaced by `f(old mark)`.
fn remark<M: Clone>(map: &SphereMap<M>, mut f: impl FnMut(&M) -> M) -> SphereMap<M> {
    let mut result = map.clone();
    for face in map.face_ids() {
        result.face_mut(face).mark = f(&map.face(face).mark);
    }
    result
}

/// Shared vertex numbering and one segment per input edge.
fn collect_segments<M: Clone>(
    inputs: &[&SphereMap<M>; 2],
    config: &KernelConfig,
) -> (Vec<DVec3>, Vec<Segment>) {
    let mut index = DirectionIndex::new(config.direction_tolerance);
    let mut positions = Vec::new();
    let mut shared = |p: DVec3, positions: &mut Vec<DVec3>| {
        let (i, inserted) = index.find_or_insert(p);
        if inserted {
            positions.push(p);
        }
        i
    };

    let mut segments = Vec::new();
    for (k, map) in inputs.iter().enumerate() {
        let ids: Vec<Option<usize>> = map
            .vertex_ids()
            .map(|v| (!map.is_isolated(v)).then(|| shared(map.point(v), &mut positions)))
            .collect();
        for h in map.half_edge_ids().filter(|&h| map.is_canonical(h)) {
            let (Some(from), Some(to)) = (ids[map.source(h).index()], ids[map.target(h).index()])
            else {
                continue;
            };
            segments.push(Segment {
                arc: Arc {
                    source: positions[from],
                    target: positions[to],
                    circle: map.circle(h),
                },
                input: k,
                half_edge: h,
                splits: Vec::new(),
            });
        }
    }

    // Crossing points become shared vertices; they are attached to the
    // segments below together with every other vertex lying on an arc
    let (first, second): (Vec<&Segment>, Vec<&Segment>) =
        segments.iter().partition(|s| s.input == 0);
    for s in &first {
        for t in &second {
            for x in s.arc.crossings(&t.arc, config.circle_tolerance) {
                shared(x, &mut positions);
            }
        }
    }

    (positions, segments)
}

/// Attaches every shared vertex lying on a segment as a split point.
fn split_segments(positions: &[DVec3], segments: &mut [Segment], config: &KernelConfig) {
    let tolerance = config.circle_tolerance.max(config.direction_tolerance);
    for segment in segments.iter_mut() {
        for (i, &p) in positions.iter().enumerate() {
            if let Some(t) = segment.arc.locate(p, tolerance) {
                segment.splits.push((t, i));
            }
        }
        segment.splits.sort_by(|x, y| x.0.total_cmp(&y.0));
        segment.splits.dedup_by_key(|split| split.1);
    }
}

/// Cuts segments at their split points and merges coincident pieces.
fn merge_pieces<M: Clone>(inputs: &[&SphereMap<M>; 2], segments: &[Segment]) -> Vec<Piece> {
    let mut pieces: Vec<Piece> = Vec::new();
    let mut by_ends: HashMap<(usize, usize), usize> = HashMap::new();

    for segment in segments {
        for pair in segment.splits.windows(2) {
            let (from, to) = (pair[0].1, pair[1].1);
            if from == to {
                continue;
            }
            let key = (from.min(to), from.max(to));
            match by_ends.get(&key) {
                Some(&i) => {
                    let piece = &mut pieces[i];
                    piece.origins[segment.input] = Some(if piece.from == from {
                        segment.half_edge
                    } else {
                        inputs[segment.input].twin(segment.half_edge)
                    });
                }
                None => {
                    let mut origins = [None, None];
                    origins[segment.input] = Some(segment.half_edge);
                    by_ends.insert(key, pieces.len());
                    pieces.push(Piece {
                        from,
                        to,
                        circle: segment.arc.circle,
                        origins,
                    });
                }
            }
        }
    }
    pieces
}

/// Face of `input` covering every face of `result`.
fn covering_faces<M: Clone>(
    result: &SphereMap<M>,
    origins: &[Option<SHalfEdgeId>],
    input: &SphereMap<M>,
) -> Vec<Option<SFaceId>> {
    let mut cover: Vec<Option<SFaceId>> = vec![None; result.face_count()];
    let mut queue = VecDeque::new();

    for h in result.half_edge_ids() {
        let (Some(origin), Some(face)) = (origins[h.index()], result.incident_face(h)) else {
            continue;
        };
        if cover[face.index()].is_none() {
            cover[face.index()] = input.incident_face(origin);
            queue.push_back(face);
        }
    }

    // Across an edge that is not part of the input, the covering face is
    // unchanged
    while let Some(face) = queue.pop_front() {
        for &start in &result.face(face).boundary {
            for h in result.cycle(start) {
                if origins[h.index()].is_some() {
                    continue;
                }
                let Some(neighbour) = result.incident_face(result.twin(h)) else {
                    continue;
                };
                if cover[neighbour.index()].is_none() {
                    cover[neighbour.index()] = cover[face.index()];
                    queue.push_back(neighbour);
                }
            }
        }
    }
    cover
}
