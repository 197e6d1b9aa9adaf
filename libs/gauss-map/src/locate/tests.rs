//! Tests for the extremal-point locator.

use super::*;
use crate::builder::GaussMapBuilder;
use crate::config::KernelConfig;
use crate::sphere::SphereCircle;
use approx::assert_relative_eq;
use glam::DVec3;
use polyhedron::primitives::{cube, octahedron, prism, tetrahedron};
use polyhedron::{Polyhedron, ShellId};

const TOLERANCE: f64 = 1e-9;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gauss(poly: &Polyhedron) -> SphereMap<PointMark> {
    let shell = poly.shell(ShellId(0)).unwrap();
    GaussMapBuilder::new(poly, KernelConfig::default()).build(&shell)
}

#[test]
fn test_cube_extremes_are_pole_vertices() {
    init();
    let map = gauss(&cube(1.0).unwrap());

    let Some(SObject::Vertex(top)) = locate_top(&map, TOLERANCE) else {
        panic!("cube top is not a vertex");
    };
    assert_relative_eq!(map.point(top).z, 1.0, epsilon = 1e-12);

    let Some(SObject::Vertex(bottom)) = locate_bottom(&map, TOLERANCE) else {
        panic!("cube bottom is not a vertex");
    };
    assert_relative_eq!(map.point(bottom).z, -1.0, epsilon = 1e-12);
}

#[test]
fn test_octahedron_extremes_are_faces() {
    init();
    let map = gauss(&octahedron(1.0).unwrap());
    let Some(SObject::Face(top)) = locate_top(&map, TOLERANCE) else {
        panic!("octahedron top is not a face");
    };
    assert_eq!(map.face(top).mark.point(), DVec3::Z);
    let Some(SObject::Face(bottom)) = locate_bottom(&map, TOLERANCE) else {
        panic!("octahedron bottom is not a face");
    };
    assert_eq!(map.face(bottom).mark.point(), DVec3::NEG_Z);
}

#[test]
fn test_tetrahedron_extremes_are_edges() {
    init();
    let map = gauss(&tetrahedron(1.0).unwrap());
    for object in [locate_top(&map, TOLERANCE), locate_bottom(&map, TOLERANCE)] {
        let Some(SObject::HalfEdge(h)) = object else {
            panic!("tetrahedron extreme is not an edge: {object:?}");
        };
        assert!(map.circle(h).c().abs() <= TOLERANCE);
        let left = map.face(map.incident_face(h).unwrap()).mark.z();
        let right = map.face(map.incident_face(map.twin(h)).unwrap()).mark.z();
        assert_eq!(left, right);
    }
}

#[test]
fn test_prism_top_is_pole() {
    init();
    let map = gauss(&prism(6, 1.0, 2.0).unwrap());
    let Some(SObject::Vertex(v)) = locate_top(&map, TOLERANCE) else {
        panic!("prism top is not a vertex");
    };
    let p = map.point(v);
    assert!(p.x.abs() <= TOLERANCE && p.y.abs() <= TOLERANCE && p.z > 0.0);
}

#[test]
fn test_top_differs_from_bottom() {
    init();
    for poly in [
        cube(1.0).unwrap(),
        tetrahedron(1.0).unwrap(),
        octahedron(2.0).unwrap(),
        prism(5, 1.0, 1.0).unwrap(),
    ] {
        let map = gauss(&poly);
        let top = locate_top(&map, TOLERANCE);
        let bottom = locate_bottom(&map, TOLERANCE);
        assert!(top.is_some());
        assert_ne!(top, bottom);
        assert_eq!(locate_top_and_bottom(&map, TOLERANCE), top.zip(bottom));
    }
}

#[test]
fn test_empty_map_has_no_extremes() {
    let map: SphereMap<PointMark> = SphereMap::new();
    assert_eq!(locate_top(&map, TOLERANCE), None);
    assert_eq!(locate_top_and_bottom(&map, TOLERANCE), None);
}

#[test]
fn test_single_face_map() {
    let mut map = SphereMap::new();
    let f = map.add_face(PointMark(DVec3::new(0.0, 0.0, 3.0)));
    assert_eq!(locate_top(&map, TOLERANCE), Some(SObject::Face(f)));
    assert_eq!(locate_bottom(&map, TOLERANCE), Some(SObject::Face(f)));
}

#[test]
fn test_tie_off_the_poles_falls_back_to_shared_edge() {
    init();
    // Two hemispheres split by the equator, marks at equal height
    let mut map = SphereMap::new();
    let a = map.add_vertex(DVec3::X, PointMark::ORIGIN);
    let b = map.add_vertex(DVec3::NEG_X, PointMark::ORIGIN);
    let equator = SphereCircle::from_normal(DVec3::Z).unwrap();
    map.add_edge_pair(a, b, equator, PointMark::ORIGIN);
    map.add_edge_pair(b, a, equator, PointMark::ORIGIN);
    map.link_rotations();
    map.create_faces_per_cycle(|m, rep| PointMark(m.circle(rep).normal()));
    for f in map.face_ids().collect::<Vec<_>>() {
        map.face_mut(f).mark.0.z = 0.0;
    }

    let Some(SObject::HalfEdge(h)) = locate_top(&map, TOLERANCE) else {
        panic!("tied hemispheres do not meet at an edge");
    };
    assert_ne!(map.incident_face(h), map.incident_face(map.twin(h)));
}
