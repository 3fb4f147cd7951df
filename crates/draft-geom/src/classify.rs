//! Edge classification: kernel curves to typed geometry records.

use std::f64::consts::{PI, TAU};

use draft_curve::{fit, Curve, CurveGeom};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::detect;
use crate::handle::EdgeHandle;
use crate::record::{GeomRecord, SourceKind};
use crate::shape::{BezierSpan, EllipseArcData, GeomShape, SplineData};

/// Thresholds governing edge classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierPolicy {
    /// Parametric sweep above which a circular or elliptical edge is a
    /// candidate for full-closed classification.
    ///
    /// Inherited heuristic, under review: together with
    /// `endpoint_merge_sq` this reproduces the historical "span over one
    /// radian and endpoints coincide" test. Its intent has never been
    /// documented; change it only deliberately.
    pub full_sweep_min: f64,
    /// Square distance under which trim endpoints count as coincident for
    /// the full-closed tie-break.
    pub endpoint_merge_sq: f64,
    /// Edges whose bounding extent exceeds this are rejected as invalid
    /// before classification. Cosmetic edges are exempt; they live at a
    /// different scale.
    pub crazy_extent: f64,
    /// Chord tolerance for the piecewise-Bezier rendering of splines
    /// (spans are cubic or lower).
    pub approx_tol: f64,
    /// Segment budget for the spline approximation.
    pub approx_max_segments: usize,
    /// Curvature mean-absolute-deviation limit for spline circle detection.
    pub curve_dev_limit: f64,
    /// Center-of-curvature deviation limit, as a fraction of arc length.
    pub center_dev_frac: f64,
    /// Sample count for circle detection; only the strictly interior
    /// samples are evaluated.
    pub circle_samples: usize,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            full_sweep_min: 1.0,
            endpoint_merge_sq: 1e-3,
            crazy_extent: 1.0e4,
            approx_tol: 1e-3,
            approx_max_segments: 200,
            curve_dev_limit: 1e-5,
            center_dev_frac: 0.01,
            circle_samples: 5,
        }
    }
}

/// Weed out rubbish edges before making geometry.
pub fn validate_edge(handle: &EdgeHandle, policy: &ClassifierPolicy) -> bool {
    handle.extent() <= policy.crazy_extent
}

/// Classify one kernel edge into a typed geometry record.
///
/// Returns `None` only when a non-cosmetic edge fails validation. Every
/// other path yields a record; kernel trouble degrades the classification
/// (ultimately to a sampled polyline) rather than failing, so the result
/// may be approximate.
pub fn classify(handle: &EdgeHandle, cosmetic: bool, policy: &ClassifierPolicy) -> Option<GeomRecord> {
    if handle.span() <= 0.0 {
        warn!(
            first = handle.first(),
            last = handle.last(),
            "classify: degenerate trim interval"
        );
    }
    if !cosmetic && !validate_edge(handle, policy) {
        debug!(extent = handle.extent(), "classify: rejected out-of-bounds edge");
        return None;
    }

    let shape = match handle.curve() {
        CurveGeom::Circle(circle) => {
            if full_sweep(handle, policy) {
                GeomShape::Circle {
                    center: circle.center,
                    radius: circle.radius,
                }
            } else {
                let (s, e) = handle.end_points();
                let mid = handle.point_at((handle.first() + handle.last()) / 2.0);
                GeomShape::CircleArc(detect::arc_through_points(
                    circle.center,
                    circle.radius,
                    s,
                    mid,
                    e,
                ))
            }
        }
        CurveGeom::Ellipse(ellipse) => {
            if full_sweep(handle, policy) {
                GeomShape::Ellipse {
                    center: ellipse.center,
                    major: ellipse.major_radius(),
                    minor: ellipse.minor_radius,
                    angle: ellipse.rotation_angle(),
                }
            } else {
                GeomShape::EllipseArc(ellipse_arc_data(handle, ellipse))
            }
        }
        CurveGeom::Bezier(bezier) => GeomShape::Bezier {
            degree: bezier.degree(),
            poles: bezier.poles.clone(),
        },
        CurveGeom::BSpline(_) => classify_spline(handle, policy),
        // No closed-form mapping: a sampled polyline represents the edge.
        CurveGeom::Line(_) => GeomShape::Line {
            points: vec![handle.start_point(), handle.end_point()],
        },
    };

    let mut record = GeomRecord::new(shape, handle.clone());
    record.cosmetic = cosmetic;
    if cosmetic {
        record.source = SourceKind::CosmeticEdge;
    }
    record.reversed = match record.shape {
        // Full closed curves have no meaningful direction.
        GeomShape::Circle { .. } | GeomShape::Ellipse { .. } => false,
        _ => handle.orientation_reversed(),
    };
    Some(record)
}

/// The inherited full-circle tie-break: parametric span above the policy
/// minimum and trim endpoints coincident.
fn full_sweep(handle: &EdgeHandle, policy: &ClassifierPolicy) -> bool {
    let (s, e) = handle.end_points();
    handle.span().abs() > policy.full_sweep_min
        && s.distance_squared(e) < policy.endpoint_merge_sq
}

fn ellipse_arc_data(handle: &EdgeHandle, ellipse: &draft_curve::Ellipse) -> EllipseArcData {
    let f = handle.first();
    let l = handle.last();
    let (s, e) = handle.end_points();
    let mid = handle.point_at((f + l) / 2.0);
    EllipseArcData {
        center: ellipse.center,
        major: ellipse.major_radius(),
        minor: ellipse.minor_radius,
        angle: ellipse.rotation_angle(),
        start: s,
        end: e,
        mid,
        start_angle: f.rem_euclid(TAU),
        end_angle: l.rem_euclid(TAU),
        // The parameter runs counter-clockwise about the normal; reversal
        // is carried by the record's orientation flag.
        clockwise: false,
        large_arc: (l - f) > PI,
    }
}

fn classify_spline(handle: &EdgeHandle, policy: &ClassifierPolicy) -> GeomShape {
    if detect::spline_is_line(handle) {
        return detect::spline_as_line(handle);
    }
    if let Some(circle_fit) = detect::spline_circle_fit(handle, policy) {
        if circle_fit.closed {
            return GeomShape::Circle {
                center: circle_fit.center,
                radius: circle_fit.radius,
            };
        }
        let (s, e) = handle.end_points();
        let mid = handle.point_at((handle.first() + handle.last()) / 2.0);
        return GeomShape::CircleArc(detect::arc_through_points(
            circle_fit.center,
            circle_fit.radius,
            s,
            mid,
            e,
        ));
    }
    spline_shape(handle, policy)
}

fn spline_shape(handle: &EdgeHandle, policy: &ClassifierPolicy) -> GeomShape {
    let (s, e) = handle.end_points();
    let mid = handle.point_at((handle.first() + handle.last()) / 2.0);
    let v1 = s - mid;
    let v2 = e - mid;

    let segments = match fit::approximate_beziers(
        handle.curve().as_curve(),
        handle.first(),
        handle.last(),
        policy.approx_tol,
        policy.approx_max_segments,
    ) {
        Ok(spans) => spans
            .into_iter()
            .map(|b| BezierSpan {
                degree: b.degree(),
                poles: b.poles,
            })
            .collect(),
        Err(err) => {
            warn!("spline approximation failed ({err}); using a linear segment");
            vec![BezierSpan {
                degree: 1,
                poles: vec![s, e],
            }]
        }
    };

    GeomShape::Spline(SplineData {
        start: s,
        end: e,
        mid,
        start_angle: s.y.atan2(s.x).rem_euclid(TAU),
        end_angle: e.y.atan2(e.x).rem_euclid(TAU),
        clockwise: (v1.x * v2.y - v1.y * v2.x) < 0.0,
        open: !handle.curve().is_closed(),
        segments,
    })
}
