//! Arc length, abscissa, and curvature measures over curves.

use draft_math::Point3;

use crate::curve::Curve;

/// Maximum recursion depth for adaptive arc-length refinement.
const MAX_DEPTH: u32 = 24;

/// Arc length of the span `[t0, t1]` by adaptive chord refinement.
pub fn arc_length(curve: &dyn Curve, t0: f64, t1: f64, tolerance: f64) -> f64 {
    segment_length(curve, t0, t1, tolerance, 0)
}

fn segment_length(curve: &dyn Curve, t0: f64, t1: f64, tolerance: f64, depth: u32) -> f64 {
    let p0 = curve.point_at(t0);
    let p1 = curve.point_at(t1);
    let t_mid = (t0 + t1) * 0.5;
    let p_mid = curve.point_at(t_mid);

    let chord = (p1 - p0).length();
    let halves = (p_mid - p0).length() + (p1 - p_mid).length();

    if depth >= MAX_DEPTH || halves - chord <= tolerance {
        return halves;
    }
    segment_length(curve, t0, t_mid, tolerance * 0.5, depth + 1)
        + segment_length(curve, t_mid, t1, tolerance * 0.5, depth + 1)
}

/// Parameter at which the arc length from `t0` reaches `target`.
///
/// Bisection over the span; `None` when `target` is outside `[0, length]`
/// or the span is empty.
pub fn parameter_at_length(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    target: f64,
    tolerance: f64,
) -> Option<f64> {
    if t1 <= t0 || target < 0.0 {
        return None;
    }
    let total = arc_length(curve, t0, t1, tolerance);
    if target > total + tolerance {
        return None;
    }

    let mut low = t0;
    let mut high = t1;
    for _ in 0..64 {
        let mid = (low + high) * 0.5;
        let len = arc_length(curve, t0, mid, tolerance);
        if (len - target).abs() <= tolerance {
            return Some(mid);
        }
        if len < target {
            low = mid;
        } else {
            high = mid;
        }
    }
    Some((low + high) * 0.5)
}

/// Curvature magnitude at parameter `t`: `|c' x c''| / |c'|^3`.
///
/// Returns 0 for degenerate (stationary) points.
pub fn curvature_at(curve: &dyn Curve, t: f64) -> f64 {
    let d1 = curve.tangent_at(t);
    let d2 = curve.second_derivative_at(t);
    let speed = d1.length();
    if speed < 1e-12 {
        return 0.0;
    }
    d1.cross(d2).length() / (speed * speed * speed)
}

/// Center of curvature at parameter `t`.
///
/// `None` where the curve is locally flat (curvature below threshold).
pub fn curvature_center_at(curve: &dyn Curve, t: f64) -> Option<Point3> {
    let k = curvature_at(curve, t);
    if k < 1e-12 {
        return None;
    }
    let d1 = curve.tangent_at(t);
    let d2 = curve.second_derivative_at(t);
    // Principal normal: the tangent-orthogonal part of the second derivative.
    let normal = d1.cross(d2).cross(d1);
    let len = normal.length();
    if len < 1e-15 {
        return None;
    }
    Some(curve.point_at(t) + normal / len / k)
}
