//! Tests for the spherical incidence map.

use super::*;
use std::f64::consts::TAU;

/// Three vertices on the equator joined into one great circle.
fn equator_triangle() -> (SphereMap<i32>, SHalfEdgeId) {
    let mut map = SphereMap::new();
    let points: Vec<DVec3> = (0..3)
        .map(|i| {
            let angle = TAU * i as f64 / 3.0;
            DVec3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect();
    let vertices: Vec<SVertexId> = points.iter().map(|&p| map.add_vertex(p, 0)).collect();
    let equator = SphereCircle::from_normal(DVec3::Z).unwrap();
    let first = map.add_edge_pair(vertices[0], vertices[1], equator, 0);
    map.add_edge_pair(vertices[1], vertices[2], equator, 0);
    map.add_edge_pair(vertices[2], vertices[0], equator, 0);
    map.link_rotations();
    (map, first)
}

#[test]
fn test_edge_pair_is_twinned() {
    let (map, first) = equator_triangle();
    let twin = map.twin(first);
    assert_eq!(twin, SHalfEdgeId(1));
    assert_eq!(map.twin(twin), first);
    assert_eq!(map.source(twin), map.target(first));
    assert_eq!(map.circle(twin).normal(), DVec3::NEG_Z);
    assert!(map.is_canonical(first));
    assert!(!map.is_canonical(twin));
}

#[test]
fn test_rotations_close_cycles() {
    let (map, first) = equator_triangle();
    let cycle: Vec<_> = map.cycle(first).collect();
    assert_eq!(cycle.len(), 3);
    for &h in &cycle {
        assert_eq!(map.circle(h).normal(), DVec3::Z);
        let next = map.half_edge(h).next.unwrap();
        assert_eq!(map.source(next), map.target(h));
        assert_eq!(map.half_edge(next).prev, Some(h));
    }
    assert_eq!(map.cycle_representatives().len(), 2);
}

#[test]
fn test_faces_per_cycle_validate() {
    let (mut map, first) = equator_triangle();
    assert!(matches!(map.validate(), Err(TopologyError::FaceMismatch(_))));

    map.create_faces_per_cycle(|m, rep| if m.circle(rep).c() > 0.0 { 1 } else { -1 });
    assert_eq!(map.face_count(), 2);
    assert_eq!(map.validate(), Ok(()));

    let north = map.incident_face(first).unwrap();
    assert_eq!(map.face(north).mark, 1);
    assert_eq!(map.face(north).boundary.len(), 1);
    let euler = map.vertex_count() as i64 - map.edge_count() as i64 + map.face_count() as i64;
    assert_eq!(euler, 2);
}

#[test]
fn test_out_edges_and_faces_around() {
    let (mut map, _) = equator_triangle();
    map.create_faces_per_cycle(|_, _| 0);
    for v in map.vertex_ids() {
        assert_eq!(map.degree(v), 2);
        assert!(map.out_edges(v).all(|h| map.source(h) == v));
        let mut faces = map.faces_around(v);
        faces.sort();
        assert_eq!(faces, vec![SFaceId(0), SFaceId(1)]);
    }
}

#[test]
fn test_isolated_vertex() {
    let mut map: SphereMap<()> = SphereMap::new();
    let v = map.add_vertex(DVec3::Z, ());
    assert!(map.is_isolated(v));
    assert_eq!(map.degree(v), 0);
    assert!(map.faces_around(v).is_empty());
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn test_unlinked_map_fails_validation() {
    let mut map = SphereMap::new();
    let a = map.add_vertex(DVec3::X, ());
    let b = map.add_vertex(DVec3::Y, ());
    let circle = SphereCircle::through(DVec3::X, DVec3::Y).unwrap();
    let h = map.add_edge_pair(a, b, circle, ());
    assert_eq!(map.validate(), Err(TopologyError::Unlinked(h)));
}

#[test]
fn test_open_stub_fails_validation() {
    let mut map = SphereMap::new();
    let a = map.add_vertex(DVec3::X, ());
    map.add_vertex(DVec3::Y, ());
    map.add_stub(a, ());
    assert_eq!(
        map.validate(),
        Err(TopologyError::UndefinedCircle(SHalfEdgeId(0)))
    );
}

#[test]
fn test_complete_stub() {
    let mut map = SphereMap::new();
    let a = map.add_vertex(DVec3::X, ());
    let b = map.add_vertex(DVec3::Y, ());
    let h = map.add_stub(a, ());
    assert!(map.is_isolated(b));
    map.complete_stub(h, b, SphereCircle::through(DVec3::X, DVec3::Y).unwrap());
    assert_eq!(map.target(h), b);
    assert_eq!(map.vertex(b).out, Some(map.twin(h)));
    assert_eq!(map.circle(map.twin(h)).normal(), DVec3::NEG_Z);
}

#[test]
fn test_clear() {
    let (mut map, _) = equator_triangle();
    assert!(!map.is_empty());
    map.clear();
    assert!(map.is_empty());
}
