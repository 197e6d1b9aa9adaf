//! Tests for the Gauss map value and Minkowski sums.

use super::*;
use crate::sphere_map::SVertexId;
use approx::assert_relative_eq;
use glam::DVec3;
use polyhedron::primitives::{cube, octahedron, prism, tetrahedron};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sum(a: &Polyhedron, b: &Polyhedron) -> GaussMap {
    let mut result = GaussMap::new();
    result.minkowski_sum(&GaussMap::from_polyhedron(a), &GaussMap::from_polyhedron(b));
    result
}

fn assert_euler(map: &GaussMap) {
    let euler = map.vertex_count() as i64 - map.edge_count() as i64 + map.face_count() as i64;
    assert_eq!(euler, 2);
    assert_eq!(map.sphere_map().validate(), Ok(()));
}

/// Marks of the faces around a located vertex.
fn marks_around(map: &GaussMap, v: SVertexId) -> Vec<DVec3> {
    let sphere = map.sphere_map();
    sphere
        .faces_around(v)
        .into_iter()
        .map(|f| sphere.face(f).mark.point())
        .collect()
}

// =============================================================================
// MINKOWSKI SUMS
// =============================================================================

#[test]
fn test_cube_sum_extremes() {
    init();
    let unit = cube(1.0).unwrap();
    let result = sum(&unit, &unit);
    assert_euler(&result);

    let Some(SObject::Vertex(top)) = result.locate_top() else {
        panic!("top of a box sum is not a vertex");
    };
    let Some(SObject::Vertex(bottom)) = result.locate_bottom() else {
        panic!("bottom of a box sum is not a vertex");
    };
    assert_eq!(marks_around(&result, top).len(), 4);
    for p in marks_around(&result, top) {
        assert_relative_eq!(p.z, 2.0);
    }
    for p in marks_around(&result, bottom) {
        assert_relative_eq!(p.z, -2.0);
    }
}

#[test]
fn test_cube_sum_is_doubled_cube() {
    init();
    let unit = cube(1.0).unwrap();
    let solid = sum(&unit, &unit).to_polyhedron().unwrap();
    assert_eq!(solid.vertex_count(), 8);
    assert_eq!(solid.facet_count(), 6);
    assert_eq!(solid.edge_count(), 12);
    let (min, max) = solid.bounding_box();
    assert_eq!(min, DVec3::splat(-2.0));
    assert_eq!(max, DVec3::splat(2.0));
}

#[test]
fn test_cube_octahedron_sum() {
    init();
    let result = sum(&cube(1.0).unwrap(), &octahedron(1.0).unwrap());
    assert_euler(&result);
    assert_eq!(result.vertex_count(), 26);
    assert_eq!(result.edge_count(), 48);
    assert_eq!(result.face_count(), 24);

    let solid = result.to_polyhedron().unwrap();
    assert_eq!(solid.vertex_count(), 24);
    assert_eq!(solid.facet_count(), 26);
    assert_eq!(solid.euler_characteristic(), 2);
    let (min, max) = solid.bounding_box();
    assert_relative_eq!(min.x, -2.0, epsilon = 1e-12);
    assert_relative_eq!(max.z, 2.0, epsilon = 1e-12);

    // Top facet of the sum is the top of the cube pushed up by the octahedron
    let Some(SObject::Vertex(top)) = result.locate_top() else {
        panic!("top is not a vertex");
    };
    assert!(marks_around(&result, top)
        .iter()
        .all(|p| (p.z - 2.0).abs() < 1e-12));
}

#[test]
fn test_sum_with_translated_operand() {
    init();
    let unit = cube(1.0).unwrap();
    let mut moved = cube(1.0).unwrap();
    moved.translate(DVec3::new(3.0, 0.0, -1.0));
    let solid = sum(&unit, &moved).to_polyhedron().unwrap();
    let (min, max) = solid.bounding_box();
    assert_eq!(min, DVec3::new(1.0, -2.0, -3.0));
    assert_eq!(max, DVec3::new(5.0, 2.0, 1.0));
}

#[test]
fn test_sum_is_simplified() {
    init();
    let a = tetrahedron(1.0).unwrap();
    let b = prism(6, 1.0, 1.0).unwrap();
    let mut result = sum(&a, &b);
    assert_euler(&result);

    let mut map = result.sphere_map().clone();
    assert!(simplify(&mut map, result.config()).is_noop());

    // Summing again into the same value replaces the previous content
    let unit = GaussMap::from_polyhedron(&cube(1.0).unwrap());
    result.minkowski_sum(&unit, &unit);
    assert_eq!(result.face_count(), 8);
}

#[test]
fn test_sum_with_empty_map_is_identity() {
    init();
    let unit = GaussMap::from_polyhedron(&cube(1.0).unwrap());
    let mut result = GaussMap::new();
    result.minkowski_sum(&unit, &GaussMap::new());
    assert_eq!(result.vertex_count(), 6);
    assert_eq!(result.edge_count(), 12);
    assert_eq!(result.face_count(), 8);
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn test_outer_shell_is_chosen() {
    init();
    let near = cube(1.0).unwrap();
    let points: Vec<DVec3> = near
        .vertex_ids()
        .map(|v| near.position(v))
        .chain(near.vertex_ids().map(|v| near.position(v) + DVec3::new(5.0, 0.0, 0.0)))
        .collect();
    let count = near.vertex_count();
    let faces: Vec<Vec<usize>> = near
        .facet_ids()
        .map(|f| near.facet_vertices(f).iter().map(|v| v.index()).collect::<Vec<_>>())
        .flat_map(|face: Vec<usize>| {
            let shifted = face.iter().map(|i| i + count).collect();
            [face, shifted]
        })
        .collect();
    let poly = Polyhedron::from_faces(&points, &faces).unwrap();
    assert_eq!(poly.shell_count(), 2);

    let map = GaussMap::from_polyhedron(&poly);
    assert_eq!(map.face_count(), 8);
    let sphere = map.sphere_map();
    assert!(sphere.face_ids().all(|f| sphere.face(f).mark.point().x >= 4.0));
}

#[test]
fn test_from_shell_matches_from_polyhedron() {
    init();
    let poly = prism(5, 2.0, 1.0).unwrap();
    let shell = poly.shell(polyhedron::ShellId(0)).unwrap();
    let a = GaussMap::from_shell(&poly, &shell);
    let b = GaussMap::from_polyhedron(&poly);
    assert_eq!(a.vertex_count(), b.vertex_count());
    assert_eq!(a.edge_count(), b.edge_count());
    assert_eq!(a.face_count(), b.face_count());
}

#[test]
fn test_config_is_kept() {
    let config = KernelConfig::high_precision();
    let map = GaussMap::from_polyhedron_with_config(&cube(1.0).unwrap(), config);
    assert_eq!(*map.config(), config);
    assert_eq!(*GaussMap::with_config(config).config(), config);
}

#[test]
fn test_empty_map() {
    let map = GaussMap::new();
    assert!(map.is_empty());
    assert_eq!(map.locate_top(), None);
    assert_eq!(map.top_and_bottom(), None);
    assert_eq!(map.to_polyhedron().unwrap_err(), PolyhedronError::Empty);
    assert_eq!(map.to_string(), "OFF\n0 0 0\n");
}

#[test]
fn test_edgeless_map_has_no_solid() {
    // A point sums to a single face covering the sphere
    let unit = GaussMap::from_polyhedron(&cube(1.0).unwrap());
    let mut collapsed = GaussMap::new();
    collapsed.minkowski_sum(&unit, &unit);
    let mut map = collapsed.sphere_map().clone();
    for f in map.face_ids().collect::<Vec<_>>() {
        map.face_mut(f).mark = PointMark::ORIGIN;
    }
    simplify(&mut map, &KernelConfig::default());
    assert_eq!(map.edge_count(), 0);
    assert_eq!(map.face_count(), 1);

    let point = GaussMap {
        map,
        config: KernelConfig::default(),
    };
    assert_eq!(point.to_polyhedron().unwrap_err(), PolyhedronError::Empty);
}

// =============================================================================
// OUTPUT
// =============================================================================

#[test]
fn test_dual_of_single_map_is_the_solid() {
    init();
    let poly = tetrahedron(2.0).unwrap();
    let solid = GaussMap::from_polyhedron(&poly).to_polyhedron().unwrap();
    assert_eq!(solid.vertex_count(), 4);
    assert_eq!(solid.facet_count(), 4);
    // Facets keep their outward orientation
    for f in solid.facet_ids() {
        let centroid: DVec3 = solid
            .facet_vertices(f)
            .iter()
            .map(|&v| solid.position(v))
            .sum::<DVec3>()
            / 3.0;
        assert!(solid.facet_normal(f).dot(centroid) > 0.0);
    }
}

#[test]
fn test_top_and_bottom_match_single_queries() {
    init();
    let map = GaussMap::from_polyhedron(&tetrahedron(1.0).unwrap());
    assert_eq!(
        map.top_and_bottom(),
        Some((map.locate_top().unwrap(), map.locate_bottom().unwrap()))
    );
}

#[test]
fn test_display_dump() {
    let map = GaussMap::from_polyhedron(&cube(1.0).unwrap());
    let dump = map.to_string();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines[0], "OFF");
    assert_eq!(lines[1], "8 6 0");
    assert_eq!(lines.len(), 2 + 8 + 6);
    for line in &lines[2..10] {
        let coords: Vec<f64> = line.split(' ').map(|c| c.parse().unwrap()).collect();
        assert_eq!(coords.len(), 3);
        assert!(coords.iter().all(|c| c.abs() == 1.0));
    }
    for line in &lines[10..] {
        let fan: Vec<usize> = line.split(' ').map(|c| c.parse().unwrap()).collect();
        assert_eq!(fan[0], 4);
        assert_eq!(fan.len(), 5);
        assert!(fan[1..].iter().all(|&f| f < 8));
    }
}
