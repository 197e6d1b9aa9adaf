//! Tests for the sphere predicates.

use super::*;
use approx::assert_relative_eq;
use std::f64::consts::{FRAC_PI_2, PI};

const TOL: f64 = 1e-9;

// =============================================================================
// CIRCLES
// =============================================================================

#[test]
fn test_circle_through_orients_short_arc() {
    let circle = SphereCircle::through(DVec3::X, DVec3::Y).unwrap();
    assert_eq!(circle.normal(), DVec3::Z);
    assert_eq!(circle.opposite().normal(), DVec3::NEG_Z);
    assert_relative_eq!(circle.travel(DVec3::X, DVec3::Y), FRAC_PI_2);
    assert_relative_eq!(circle.opposite().travel(DVec3::X, DVec3::Y), 3.0 * FRAC_PI_2);
}

#[test]
fn test_circle_rejects_degenerate_normal() {
    assert!(SphereCircle::from_normal(DVec3::ZERO).is_none());
    assert!(SphereCircle::through(DVec3::Z, DVec3::Z).is_none());
    assert!(!SphereCircle::default().is_defined());
}

#[test]
fn test_circle_coefficients() {
    let circle = SphereCircle::from_normal(DVec3::new(0.0, 3.0, 4.0)).unwrap();
    assert_relative_eq!(circle.a(), 0.0);
    assert_relative_eq!(circle.b(), 0.6);
    assert_relative_eq!(circle.c(), 0.8);
}

#[test]
fn test_has_on_and_coincidence() {
    let equator = SphereCircle::from_normal(DVec3::Z).unwrap();
    assert!(equator.has_on(DVec3::X, TOL));
    assert!(!equator.has_on(DVec3::Z, TOL));
    assert!(equator.is_coincident(&equator.opposite(), TOL));
    assert!(!equator.is_same(&equator.opposite(), TOL));
}

#[test]
fn test_tangent_points_along_travel() {
    let equator = SphereCircle::from_normal(DVec3::Z).unwrap();
    assert_eq!(equator.tangent_at(DVec3::X), DVec3::Y);
}

// =============================================================================
// ORIENTATION
// =============================================================================

#[test]
fn test_orientation_signs() {
    assert_eq!(
        orientation(DVec3::X, DVec3::Y, DVec3::Z),
        Orientation::CounterClockwise
    );
    assert_eq!(
        orientation(DVec3::X, DVec3::Z, DVec3::Y),
        Orientation::Clockwise
    );
    assert_eq!(
        orientation(DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0).normalize()),
        Orientation::Degenerate
    );
}

#[test]
fn test_ccw_order_around_north_pole() {
    // Viewed from above the pole, +x, +y, -x, -y are counter-clockwise
    let p = DVec3::Z;
    let mut tangents = vec![DVec3::NEG_Y, DVec3::NEG_X, DVec3::X, DVec3::Y];
    tangents.sort_by(|&a, &b| ccw_order(p, DVec3::X, a, b));
    assert_eq!(tangents, vec![DVec3::X, DVec3::Y, DVec3::NEG_X, DVec3::NEG_Y]);
}

#[test]
fn test_ccw_order_reference_is_first() {
    let p = DVec3::NEG_Z;
    let reference = DVec3::new(1.0, 1.0, 0.0).normalize();
    let other = DVec3::new(1.0, -1.0, 0.0).normalize();
    assert_eq!(ccw_order(p, reference, reference, other), Ordering::Less);
    assert_eq!(ccw_order(p, reference, reference, reference), Ordering::Equal);
}

// =============================================================================
// ARCS
// =============================================================================

#[test]
fn test_arc_locate() {
    let arc = Arc {
        source: DVec3::X,
        target: DVec3::Y,
        circle: SphereCircle::through(DVec3::X, DVec3::Y).unwrap(),
    };
    assert_relative_eq!(arc.length(), FRAC_PI_2);
    let mid = DVec3::new(1.0, 1.0, 0.0).normalize();
    assert_relative_eq!(arc.locate(mid, TOL).unwrap(), FRAC_PI_2 / 2.0);
    assert_eq!(arc.locate(DVec3::X, TOL), Some(0.0));
    assert_relative_eq!(arc.locate(DVec3::Y, TOL).unwrap(), FRAC_PI_2);
    assert!(arc.locate(DVec3::NEG_X, TOL).is_none());
    assert!(arc.locate(DVec3::Z, TOL).is_none());
}

#[test]
fn test_long_arc_length() {
    let arc = Arc {
        source: DVec3::X,
        target: DVec3::NEG_X,
        circle: SphereCircle::from_normal(DVec3::Z).unwrap(),
    };
    assert_relative_eq!(arc.length(), PI);
    assert!(arc.locate(DVec3::Y, TOL).is_some());
    assert!(arc.locate(DVec3::NEG_Y, TOL).is_none());
}

#[test]
fn test_arc_crossings() {
    // Equator arc from +x to +y crosses the meridian arc from north to south
    // through the +x+y diagonal
    let equator = Arc {
        source: DVec3::X,
        target: DVec3::Y,
        circle: SphereCircle::through(DVec3::X, DVec3::Y).unwrap(),
    };
    let diagonal = DVec3::new(1.0, 1.0, 0.0).normalize();
    let north = DVec3::new(1.0, 1.0, 1.0).normalize();
    let south = DVec3::new(1.0, 1.0, -1.0).normalize();
    let meridian = Arc {
        source: north,
        target: south,
        circle: SphereCircle::through(north, south).unwrap(),
    };
    let crossings = equator.crossings(&meridian, TOL);
    assert_eq!(crossings.len(), 1);
    assert!(same_direction(crossings[0], diagonal, 1e-12));
}

#[test]
fn test_coincident_arcs_have_no_crossings() {
    let a = Arc {
        source: DVec3::X,
        target: DVec3::Y,
        circle: SphereCircle::through(DVec3::X, DVec3::Y).unwrap(),
    };
    let b = Arc {
        source: DVec3::Y,
        target: DVec3::X,
        circle: SphereCircle::through(DVec3::Y, DVec3::X).unwrap(),
    };
    assert!(a.crossings(&b, TOL).is_empty());
}

// =============================================================================
// DIRECTION INDEX
// =============================================================================

#[test]
fn test_direction_index_merges_close_directions() {
    let mut index = DirectionIndex::new(TOL);
    assert_eq!(index.find_or_insert(DVec3::Z), (0, true));
    assert_eq!(index.find_or_insert(DVec3::X), (1, true));
    let nudged = DVec3::new(1e-12, 0.0, 1.0).normalize();
    assert_eq!(index.find_or_insert(nudged), (0, false));
    assert_eq!(index.len(), 2);
    assert!(index.find(DVec3::NEG_Z).is_none());
}
