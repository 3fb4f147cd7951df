//! End-to-end classification scenarios.

use std::f64::consts::{FRAC_PI_2, TAU};

use draft_curve::{BSplineCurve, Circle, CurveGeom, Ellipse};
use draft_geom::{classify, ClassifierPolicy, EdgeHandle, GeomShape};
use draft_math::DVec3;

/// Control-leg factor of the classic cubic quarter-circle approximation.
const CIRCLE_K: f64 = 0.552_284_749_8;

/// Cubic B-spline tracing a full circle of the given radius as four joined
/// quarter-arc spans.
fn circle_spline(radius: f64) -> BSplineCurve {
    let k = CIRCLE_K * radius;
    let r = radius;
    let poles = vec![
        DVec3::new(r, 0.0, 0.0),
        DVec3::new(r, k, 0.0),
        DVec3::new(k, r, 0.0),
        DVec3::new(0.0, r, 0.0),
        DVec3::new(-k, r, 0.0),
        DVec3::new(-r, k, 0.0),
        DVec3::new(-r, 0.0, 0.0),
        DVec3::new(-r, -k, 0.0),
        DVec3::new(-k, -r, 0.0),
        DVec3::new(0.0, -r, 0.0),
        DVec3::new(k, -r, 0.0),
        DVec3::new(r, -k, 0.0),
        DVec3::new(r, 0.0, 0.0),
    ];
    let knots = vec![
        0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0, 4.0,
    ];
    BSplineCurve::new(3, knots, poles)
}

/// Policy loose enough for the cubic circle approximation's curvature
/// ripple.
fn detection_policy() -> ClassifierPolicy {
    ClassifierPolicy {
        curve_dev_limit: 5e-2,
        ..ClassifierPolicy::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn full_circle_curve_is_circle() {
    let handle = EdgeHandle::trimmed(
        CurveGeom::Circle(Circle::new(DVec3::ZERO, DVec3::Z, 3.0)),
        0.0,
        TAU,
    );
    let record = classify(&handle, false, &ClassifierPolicy::default()).unwrap();
    assert!(matches!(record.shape, GeomShape::Circle { .. }));
}

#[test]
fn sub_radian_arc_is_never_circle() {
    let handle = EdgeHandle::trimmed(
        CurveGeom::Circle(Circle::new(DVec3::ZERO, DVec3::Z, 3.0)),
        0.0,
        0.9,
    );
    let record = classify(&handle, false, &ClassifierPolicy::default()).unwrap();
    assert!(matches!(record.shape, GeomShape::CircleArc(_)));
}

#[test]
fn ellipse_tie_break_mirrors_circle() {
    let ellipse = Ellipse::new(DVec3::ZERO, DVec3::Z, DVec3::new(5.0, 0.0, 0.0), 2.0);
    let full = EdgeHandle::trimmed(CurveGeom::Ellipse(ellipse.clone()), 0.0, TAU);
    let record = classify(&full, false, &ClassifierPolicy::default()).unwrap();
    assert!(matches!(record.shape, GeomShape::Ellipse { .. }));

    let arc = EdgeHandle::trimmed(CurveGeom::Ellipse(ellipse), 0.0, 0.9);
    let record = classify(&arc, false, &ClassifierPolicy::default()).unwrap();
    assert!(matches!(record.shape, GeomShape::EllipseArc(_)));
}

#[test]
fn circular_spline_detected_as_circle() {
    init_tracing();
    let handle = EdgeHandle::new(CurveGeom::BSpline(circle_spline(10.0)));
    let record = classify(&handle, false, &detection_policy()).unwrap();
    match record.shape {
        GeomShape::Circle { radius, center } => {
            assert!((radius - 10.0).abs() < 0.2, "fitted radius {}", radius);
            assert!(center.length() < 0.2, "fitted center {:?}", center);
        }
        other => panic!("expected Circle, got {}", other.kind_name()),
    }
}

#[test]
fn circular_spline_arc_detected_as_arc() {
    // Just the first quarter of the circle spline: an open circular arc.
    let full = circle_spline(10.0);
    let quarter = BSplineCurve::new(
        3,
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        full.control_points[..4].to_vec(),
    );
    let handle = EdgeHandle::new(CurveGeom::BSpline(quarter));
    let record = classify(&handle, false, &detection_policy()).unwrap();
    match record.shape {
        GeomShape::CircleArc(arc) => {
            assert!((arc.radius - 10.0).abs() < 0.2, "fitted radius {}", arc.radius);
            assert!(!arc.large_arc);
            assert!((arc.start - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-9);
            assert!((arc.end - DVec3::new(0.0, 10.0, 0.0)).length() < 1e-9);
        }
        other => panic!("expected ArcOfCircle, got {}", other.kind_name()),
    }
}

#[test]
fn straight_spline_detected_as_line() {
    let spline = BSplineCurve::new(
        2,
        vec![0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0],
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(2.0, 2.0, 0.0),
            DVec3::new(4.0, 4.0, 0.0),
        ],
    );
    let handle = EdgeHandle::new(CurveGeom::BSpline(spline));
    let record = classify(&handle, false, &ClassifierPolicy::default()).unwrap();
    assert!(matches!(record.shape, GeomShape::Line { .. }));
}

#[test]
fn wavy_spline_stays_spline_with_cubic_segments() {
    let spline = BSplineCurve::new(
        3,
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 2.0],
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 3.0, 0.0),
            DVec3::new(2.0, -3.0, 0.0),
            DVec3::new(3.0, 3.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        ],
    );
    let handle = EdgeHandle::new(CurveGeom::BSpline(spline));
    let record = classify(&handle, false, &ClassifierPolicy::default()).unwrap();
    match record.shape {
        GeomShape::Spline(data) => {
            assert!(data.open);
            assert!(!data.segments.is_empty());
            assert!(data.segments.iter().all(|s| s.degree <= 3));
        }
        other => panic!("expected BSpline, got {}", other.kind_name()),
    }
}

#[test]
fn quarter_arc_has_consistent_quadrant_data() {
    let handle = EdgeHandle::trimmed(
        CurveGeom::Circle(Circle::new(DVec3::ZERO, DVec3::Z, 2.0)),
        0.0,
        FRAC_PI_2,
    );
    let record = classify(&handle, false, &ClassifierPolicy::default()).unwrap();
    match record.shape {
        GeomShape::CircleArc(arc) => {
            assert!((arc.start - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-9);
            assert!((arc.end - DVec3::new(0.0, 2.0, 0.0)).length() < 1e-9);
            let expected_mid = DVec3::new(2.0 / 2f64.sqrt(), 2.0 / 2f64.sqrt(), 0.0);
            assert!((arc.mid - expected_mid).length() < 1e-9);
            assert!(!arc.clockwise);
            assert!(!arc.large_arc);
        }
        other => panic!("expected ArcOfCircle, got {}", other.kind_name()),
    }
}
