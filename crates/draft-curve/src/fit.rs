//! Piecewise-Bezier approximation of arbitrary curves.
//!
//! Stands in for the kernel approximation used when a spline must be
//! rendered as cubic segments: each span is a Hermite cubic matching the
//! curve's endpoints and end tangents, split adaptively until the sampled
//! deviation is within tolerance.

use draft_core::{DraftError, Result};
use draft_math::Point3;

use crate::curve::{BezierCurve, Curve};

/// Interior parameters checked against the tolerance on every candidate span.
const CHECK_FRACTIONS: [f64; 3] = [0.25, 0.5, 0.75];

/// Approximate the span `[t0, t1]` by cubic Bezier segments.
///
/// Fails with a kernel error when the tolerance cannot be met within
/// `max_segments` spans.
pub fn approximate_beziers(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    max_segments: usize,
) -> Result<Vec<BezierCurve>> {
    if !(t1 > t0) {
        return Err(DraftError::Kernel(format!(
            "empty approximation span [{t0}, {t1}]"
        )));
    }
    let mut segments = Vec::new();
    split_span(curve, t0, t1, tolerance, max_segments, &mut segments)?;
    Ok(segments)
}

fn split_span(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    max_segments: usize,
    segments: &mut Vec<BezierCurve>,
) -> Result<()> {
    let candidate = hermite_span(curve, t0, t1);
    if span_deviation(curve, t0, t1, &candidate) <= tolerance {
        segments.push(candidate);
        return Ok(());
    }
    if segments.len() + 2 > max_segments {
        return Err(DraftError::Kernel(format!(
            "approximation exceeds {max_segments} segments"
        )));
    }
    let t_mid = (t0 + t1) * 0.5;
    split_span(curve, t0, t_mid, tolerance, max_segments, segments)?;
    split_span(curve, t_mid, t1, tolerance, max_segments, segments)
}

/// Cubic span matching endpoints and end tangents of the curve over `[t0, t1]`.
fn hermite_span(curve: &dyn Curve, t0: f64, t1: f64) -> BezierCurve {
    let h = t1 - t0;
    let p0 = curve.point_at(t0);
    let p1 = curve.point_at(t1);
    let d0 = curve.tangent_at(t0);
    let d1 = curve.tangent_at(t1);
    BezierCurve::new(vec![p0, p0 + d0 * (h / 3.0), p1 - d1 * (h / 3.0), p1])
}

fn span_deviation(curve: &dyn Curve, t0: f64, t1: f64, bezier: &BezierCurve) -> f64 {
    let h = t1 - t0;
    let mut worst: f64 = 0.0;
    for &f in &CHECK_FRACTIONS {
        let on_curve = curve.point_at(t0 + f * h);
        let on_bezier = bezier.point_at(f);
        worst = worst.max((on_curve - on_bezier).length());
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Circle, Line};
    use draft_math::DVec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_line_fits_in_one_span() {
        let line = Line::new(DVec3::ZERO, DVec3::new(5.0, 5.0, 0.0));
        let spans = approximate_beziers(&line, 0.0, 1.0, 1e-3, 200).unwrap();
        assert_eq!(spans.len(), 1);
        assert!((spans[0].point_at(0.0) - line.start).length() < 1e-12);
        assert!((spans[0].point_at(1.0) - line.end).length() < 1e-12);
    }

    #[test]
    fn test_quarter_circle_within_tolerance() {
        let circle = Circle::new(DVec3::ZERO, DVec3::Z, 10.0);
        let spans = approximate_beziers(&circle, 0.0, FRAC_PI_2, 1e-3, 200).unwrap();
        assert!(!spans.is_empty());

        // Spans join end to end and stay on the circle within tolerance.
        let mut prev_end = circle.point_at(0.0);
        for span in &spans {
            assert!((span.point_at(0.0) - prev_end).length() < 1e-9);
            for i in 0..=8 {
                let u = i as f64 / 8.0;
                let p = span.point_at(u);
                let r = (p.x * p.x + p.y * p.y).sqrt();
                assert!((r - 10.0).abs() < 5e-3, "span point off circle: r={}", r);
            }
            prev_end = span.point_at(1.0);
        }
        assert!((prev_end - circle.point_at(FRAC_PI_2)).length() < 1e-9);
    }

    #[test]
    fn test_empty_span_rejected() {
        let line = Line::new(DVec3::ZERO, DVec3::X);
        assert!(approximate_beziers(&line, 1.0, 1.0, 1e-3, 200).is_err());
    }

    #[test]
    fn test_segment_budget_enforced() {
        let circle = Circle::new(DVec3::ZERO, DVec3::Z, 1000.0);
        let result = approximate_beziers(&circle, 0.0, std::f64::consts::TAU, 1e-9, 2);
        assert!(result.is_err());
    }
}
