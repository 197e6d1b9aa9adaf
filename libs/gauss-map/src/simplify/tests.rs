//! Tests for map simplification.

use super::*;
use crate::builder::GaussMapBuilder;
use crate::mark::PointMark;
use crate::overlay::overlay;
use crate::sphere::SphereCircle;
use glam::DVec3;
use polyhedron::primitives::{cube, octahedron};
use polyhedron::{Polyhedron, ShellId};
use std::f64::consts::TAU;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gauss(poly: &Polyhedron) -> SphereMap<PointMark> {
    let shell = poly.shell(ShellId(0)).unwrap();
    GaussMapBuilder::new(poly, KernelConfig::default()).build(&shell)
}

/// Equator split into `n` arcs, north face marked 1 and south face 2.
fn split_equator(n: usize) -> SphereMap<i32> {
    let mut map = SphereMap::new();
    let vertices: Vec<SVertexId> = (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            map.add_vertex(DVec3::new(angle.cos(), angle.sin(), 0.0), 0)
        })
        .collect();
    let equator = SphereCircle::from_normal(DVec3::Z).unwrap();
    for i in 0..n {
        map.add_edge_pair(vertices[i], vertices[(i + 1) % n], equator, 0);
    }
    map.link_rotations();
    map.create_faces_per_cycle(|m, rep| if m.circle(rep).c() > 0.0 { 1 } else { 2 });
    map
}

fn assert_no_redundant_vertices<M>(map: &SphereMap<M>) {
    let config = KernelConfig::default();
    for v in map.vertex_ids() {
        let out: Vec<_> = map.out_edges(v).collect();
        assert!(!out.is_empty(), "isolated vertex {v:?}");
        if let [e1, e2] = out[..] {
            assert!(!is_elidable(map, e1, e2, &config), "elidable vertex {v:?}");
        }
    }
}

#[test]
fn test_gauss_map_is_already_simple() {
    init();
    let mut map = gauss(&cube(1.0).unwrap());
    let report = simplify(&mut map, &KernelConfig::default());
    assert!(report.is_noop());
    assert_eq!(map.vertex_count(), 6);
    assert_eq!(map.edge_count(), 12);
    assert_eq!(map.face_count(), 8);
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn test_projection_overlay_collapses_to_first_map() {
    init();
    let a = gauss(&cube(1.0).unwrap());
    let b = gauss(&octahedron(1.0).unwrap());
    let config = KernelConfig::default();
    let mut map = overlay(&a, &b, &config, |x, _| *x);
    assert_eq!(map.face_count(), 24);

    let report = simplify(&mut map, &config);
    assert_eq!(
        report,
        Simplification {
            edges_removed: 36,
            vertices_removed: 20,
            faces_removed: 16,
        }
    );
    assert_eq!(map.validate(), Ok(()));
    assert_eq!(map.vertex_count(), 6);
    assert_eq!(map.edge_count(), 12);
    assert_eq!(map.face_count(), 8);
    assert_no_redundant_vertices(&map);

    let mut marks: Vec<[f64; 3]> = map.face_ids().map(|f| map.face(f).mark.0.to_array()).collect();
    let mut corners: Vec<[f64; 3]> = a.face_ids().map(|f| a.face(f).mark.0.to_array()).collect();
    marks.sort_by(|x, y| x.partial_cmp(y).unwrap());
    corners.sort_by(|x, y| x.partial_cmp(y).unwrap());
    assert_eq!(marks, corners);
}

#[test]
fn test_simplify_is_idempotent() {
    init();
    let config = KernelConfig::default();
    let a = gauss(&octahedron(1.0).unwrap());
    let b = gauss(&cube(1.0).unwrap());
    let mut map = overlay(&a, &b, &config, |x, _| *x);
    assert!(!simplify(&mut map, &config).is_noop());
    let (vertices, edges, faces) = (map.vertex_count(), map.edge_count(), map.face_count());

    assert!(simplify(&mut map, &config).is_noop());
    assert_eq!(map.vertex_count(), vertices);
    assert_eq!(map.edge_count(), edges);
    assert_eq!(map.face_count(), faces);
}

#[test]
fn test_equal_marks_leave_one_face() {
    init();
    let mut map = gauss(&cube(1.0).unwrap());
    for f in map.face_ids().collect::<Vec<_>>() {
        map.face_mut(f).mark = PointMark::ORIGIN;
    }
    let report = simplify(&mut map, &KernelConfig::default());
    assert_eq!(report.faces_removed, 7);
    assert_eq!(map.vertex_count(), 0);
    assert_eq!(map.edge_count(), 0);
    assert_eq!(map.face_count(), 1);
    assert!(map.face(SFaceId(0)).boundary.is_empty());
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn test_closed_circle_keeps_two_vertices() {
    init();
    let mut map = split_equator(4);
    assert_eq!(map.validate(), Ok(()));
    simplify(&mut map, &KernelConfig::default());

    assert_eq!(map.validate(), Ok(()));
    assert_eq!(map.vertex_count(), 2);
    assert_eq!(map.edge_count(), 2);
    assert_eq!(map.face_count(), 2);
    let a = map.point(SVertexId(0));
    let b = map.point(SVertexId(1));
    assert!((a + b).length() < 1e-12, "kept vertices are antipodal");

    let mut marks: Vec<i32> = map.face_ids().map(|f| map.face(f).mark).collect();
    marks.sort();
    assert_eq!(marks, vec![1, 2]);
}

#[test]
fn test_corner_of_degree_two_survives() {
    init();
    // Spherical triangle through the three axes: every corner has degree
    // two but turns onto another circle
    let mut map = SphereMap::new();
    let axes = [DVec3::X, DVec3::Y, DVec3::Z];
    let vertices: Vec<SVertexId> = axes.iter().map(|&p| map.add_vertex(p, 0)).collect();
    for i in 0..3 {
        let (p, q) = (axes[i], axes[(i + 1) % 3]);
        let circle = SphereCircle::through(p, q).unwrap();
        map.add_edge_pair(vertices[i], vertices[(i + 1) % 3], circle, 0);
    }
    map.link_rotations();
    let mut next = 0;
    map.create_faces_per_cycle(|_, _| {
        next += 1;
        next
    });

    let report = simplify(&mut map, &KernelConfig::default());
    assert!(report.is_noop());
    assert_eq!(map.vertex_count(), 3);
    assert_eq!(map.validate(), Ok(()));
    assert_no_redundant_vertices(&map);
}
