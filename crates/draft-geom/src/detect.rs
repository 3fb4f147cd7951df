//! Line and circle detection on spline edges.
//!
//! Splines frequently arrive from the kernel carrying geometry that is
//! really a line or a circle (projection noise, format conversions). These
//! are best-effort recognizers, not guarantees: callers get approximate
//! classifications, never hard answers.

use std::f64::consts::TAU;

use draft_core::{DraftError, Result, Tolerance};
use draft_curve::measure;
use draft_curve::CurveGeom;
use draft_math::Point3;

use crate::classify::ClassifierPolicy;
use crate::handle::EdgeHandle;
use crate::shape::{ArcData, GeomShape};

/// Result of a successful circle fit on a curved segment.
#[derive(Debug, Clone, Copy)]
pub struct CircleFit {
    pub center: Point3,
    pub radius: f64,
    /// Whether the fitted geometry closes on itself (circle vs arc).
    pub closed: bool,
}

/// Can this spline be represented by a straight line?
///
/// True when the pole-to-pole chain length equals the straight distance
/// between the endpoints (a spline with colinear poles). Closed splines are
/// rejected outright.
pub fn spline_is_line(handle: &EdgeHandle) -> bool {
    let CurveGeom::BSpline(spline) = handle.curve() else {
        return false;
    };
    let (s, e) = handle.end_points();
    let end_length = (s - e).length();
    if end_length < f64::from(f32::EPSILON) {
        return false;
    }

    let poles = spline.poles();
    let mut chain_length = 0.0;
    for pair in poles.windows(2) {
        chain_length += (pair[1] - pair[0]).length();
    }
    fp_compare(chain_length, end_length)
}

/// Straight-line shape for a spline that passed [`spline_is_line`].
pub fn spline_as_line(handle: &EdgeHandle) -> GeomShape {
    let (s, e) = handle.end_points();
    GeomShape::Line { points: vec![s, e] }
}

/// Try to interpret a curved segment as a circle.
///
/// Samples curvature and center of curvature at the interior parameter
/// points and measures the mean absolute deviation from their averages. A
/// true circle has constant curvature and a single center, so both
/// deviations vanish; the fit accepts when the curvature deviation is
/// within the policy limit and the center deviation is within 1% of the
/// segment's arc length.
pub fn spline_circle_fit(handle: &EdgeHandle, policy: &ClassifierPolicy) -> Option<CircleFit> {
    let curve = handle.curve().as_curve();
    let first = handle.first();
    let parm_range = handle.span().abs();
    if parm_range <= 0.0 || policy.circle_samples < 3 {
        return None;
    }
    let parm_step = parm_range / policy.circle_samples as f64;

    // Check only the interior points of the edge; the ends of a trimmed
    // spline often carry fitting artifacts.
    let mut curvatures = Vec::new();
    let mut centers = Vec::new();
    for i in 1..(policy.circle_samples - 1) {
        let t = first + parm_step * i as f64;
        let Some(center) = measure::curvature_center_at(curve, t) else {
            // Locally flat sample: cannot be a circle.
            return None;
        };
        curvatures.push(measure::curvature_at(curve, t));
        centers.push(center);
    }

    let n = curvatures.len() as f64;
    let avg_curvature: f64 = curvatures.iter().sum::<f64>() / n;
    let avg_center: Point3 = centers.iter().copied().sum::<Point3>() / n;

    let curvature_error: f64 =
        curvatures.iter().map(|k| (avg_curvature - k).abs()).sum::<f64>() / n;
    let center_error: f64 =
        centers.iter().map(|c| (*c - avg_center).length()).sum::<f64>() / n;

    let edge_length = measure::arc_length(curve, first, handle.last(), Tolerance::CONFUSION);
    let center_limit = edge_length * policy.center_dev_frac;

    if curvature_error > policy.curve_dev_limit
        || center_error > center_limit
        || avg_curvature < 1e-12
    {
        return None;
    }

    // Endpoint coincidence is more reliable than the curve's closed flag
    // for deciding circle vs arc.
    let closed = handle.is_closed(Tolerance::CLOSURE);
    Some(CircleFit {
        center: avg_center,
        radius: 1.0 / avg_curvature,
        closed,
    })
}

/// Circle or arc shape for a spline that fits a circle.
///
/// Hard error when the edge is not circular: calling this without a
/// successful fit is caller misuse.
pub fn spline_as_circle(handle: &EdgeHandle, policy: &ClassifierPolicy) -> Result<GeomShape> {
    let fit = spline_circle_fit(handle, policy)
        .ok_or_else(|| DraftError::Logic("spline_as_circle received a non-circular edge".into()))?;

    if fit.closed {
        return Ok(GeomShape::Circle {
            center: fit.center,
            radius: fit.radius,
        });
    }

    let (s, e) = handle.end_points();
    let mid = handle.point_at((handle.first() + handle.last()) / 2.0);
    Ok(GeomShape::CircleArc(arc_through_points(
        fit.center, fit.radius, s, mid, e,
    )))
}

/// Arc payload for a known center/radius and three on-curve points.
///
/// The winding comes from where the mid point sits between the endpoint
/// angles: the arc is counter-clockwise exactly when the mid point lies on
/// the counter-clockwise path from start to end.
pub(crate) fn arc_through_points(
    center: Point3,
    radius: f64,
    start: Point3,
    mid: Point3,
    end: Point3,
) -> ArcData {
    let angle_about = |p: Point3| (p.y - center.y).atan2(p.x - center.x).rem_euclid(TAU);
    let start_angle = angle_about(start);
    let end_angle = angle_about(end);
    let mid_angle = angle_about(mid);

    let ccw_sweep = (end_angle - start_angle).rem_euclid(TAU);
    let mid_offset = (mid_angle - start_angle).rem_euclid(TAU);
    let clockwise = mid_offset > ccw_sweep;
    let sweep = if clockwise { TAU - ccw_sweep } else { ccw_sweep };

    ArcData {
        center,
        radius,
        start,
        end,
        mid,
        start_angle,
        end_angle,
        clockwise,
        large_arc: sweep > std::f64::consts::PI,
    }
}

/// Float equality in the loose sense used for chain-length comparisons.
fn fp_compare(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::from(f32::EPSILON) * a.abs().max(b.abs()).max(1.0)
}
