//! Tessellation of curves into polylines.

use draft_math::Point3;

use crate::curve::Curve;

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Convert a trimmed curve span to a polyline using adaptive subdivision.
///
/// Segments are subdivided where the midpoint deviation from the chord
/// exceeds `tolerance`.
pub fn curve_to_polyline(curve: &dyn Curve, t0: f64, t1: f64, tolerance: f64) -> Vec<Point3> {
    let mut points = Vec::new();
    points.push(curve.point_at(t0));
    subdivide_curve(curve, t0, t1, tolerance, &mut points, 0);
    points
}

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    if depth >= MAX_DEPTH {
        points.push(curve.point_at(t1));
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let p1 = curve.point_at(t1);
    let p_mid = curve.point_at(t_mid);

    // Chord midpoint
    let chord_mid = (p0 + p1) * 0.5;
    let deviation = (p_mid - chord_mid).length();

    if deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(curve.point_at(t1));
    }
}
