//! Shared handles onto kernel curves.

use std::sync::Arc;

use draft_core::Tolerance;
use draft_curve::measure;
use draft_curve::tessellate::curve_to_polyline;
use draft_curve::{Curve, CurveGeom, CurveKind, Line};
use draft_math::{Aabb3, DVec3, Point3};

/// Chord tolerance used when a handle has to discretize its curve for a
/// bookkeeping query (extent, closest point, face measures).
const QUERY_CHORD_TOL: f64 = 1e-4;

/// A trimmed, oriented reference to a kernel curve.
///
/// The curve itself is shared, never copied: records wrap the same
/// underlying geometry the kernel handed out. Trim bounds select the edge's
/// parameter span; `reversed` mirrors the kernel's edge orientation flag.
#[derive(Debug, Clone)]
pub struct EdgeHandle {
    curve: Arc<CurveGeom>,
    first: f64,
    last: f64,
    reversed: bool,
}

impl EdgeHandle {
    /// Handle over the curve's full natural domain.
    pub fn new(curve: CurveGeom) -> Self {
        let (first, last) = curve.domain();
        Self {
            curve: Arc::new(curve),
            first,
            last,
            reversed: false,
        }
    }

    /// Handle over the parameter span `[first, last]`.
    pub fn trimmed(curve: CurveGeom, first: f64, last: f64) -> Self {
        Self {
            curve: Arc::new(curve),
            first,
            last,
            reversed: false,
        }
    }

    /// Same handle with the kernel orientation flag set.
    pub fn with_orientation(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Share the underlying curve without copying it.
    pub fn from_shared(curve: Arc<CurveGeom>, first: f64, last: f64, reversed: bool) -> Self {
        Self {
            curve,
            first,
            last,
            reversed,
        }
    }

    pub fn curve(&self) -> &CurveGeom {
        &self.curve
    }

    pub fn share_curve(&self) -> Arc<CurveGeom> {
        Arc::clone(&self.curve)
    }

    pub fn curve_kind(&self) -> CurveKind {
        self.curve.kind()
    }

    pub fn first(&self) -> f64 {
        self.first
    }

    pub fn last(&self) -> f64 {
        self.last
    }

    /// Parametric span of the trim interval.
    pub fn span(&self) -> f64 {
        self.last - self.first
    }

    pub fn orientation_reversed(&self) -> bool {
        self.reversed
    }

    pub fn point_at(&self, t: f64) -> Point3 {
        self.curve.point_at(t)
    }

    pub fn start_point(&self) -> Point3 {
        self.curve.point_at(self.first)
    }

    pub fn end_point(&self) -> Point3 {
        self.curve.point_at(self.last)
    }

    /// Both trim endpoints, start first.
    pub fn end_points(&self) -> (Point3, Point3) {
        (self.start_point(), self.end_point())
    }

    /// Point halfway along the edge by arc length.
    ///
    /// When the abscissa query fails the parameter-range midpoint is used;
    /// it is a worse answer but better than none.
    pub fn mid_point(&self) -> Point3 {
        let mut mid_param = (self.first + self.last) / 2.0;
        let half = self.length() / 2.0;
        if let Some(t) = measure::parameter_at_length(
            self.curve.as_curve(),
            self.first,
            self.last,
            half,
            Tolerance::CONFUSION,
        ) {
            mid_param = t;
        }
        self.curve.point_at(mid_param)
    }

    /// Points at 1/4, 1/2, and 3/4 of the parameter range, projected to the
    /// drawing plane.
    pub fn quad_points(&self) -> Vec<Point3> {
        let range = self.span();
        [0.25, 0.5, 0.75]
            .iter()
            .map(|f| {
                let p = self.curve.point_at(self.first + range * f);
                Point3::new(p.x, p.y, 0.0)
            })
            .collect()
    }

    /// Arc length of the trimmed span.
    pub fn length(&self) -> f64 {
        measure::arc_length(
            self.curve.as_curve(),
            self.first,
            self.last,
            Tolerance::CONFUSION,
        )
    }

    /// Whether the trim endpoints coincide within `tol`.
    pub fn is_closed(&self, tol: f64) -> bool {
        (self.start_point() - self.end_point()).length() < tol
    }

    /// Polyline discretization of the trimmed span.
    pub fn polyline(&self, tolerance: f64) -> Vec<Point3> {
        curve_to_polyline(self.curve.as_curve(), self.first, self.last, tolerance)
    }

    /// Largest bounding-box side of the edge.
    pub fn extent(&self) -> f64 {
        Aabb3::from_points(&self.polyline(QUERY_CHORD_TOL))
            .map(|b| b.max_extent())
            .unwrap_or(0.0)
    }

    /// Closest point of the edge to `p`, with its distance.
    ///
    /// Coarse sampled scan refined by a local ternary search. Trim bounds
    /// may run in either direction.
    pub fn nearest(&self, p: Point3) -> (Point3, f64) {
        const SAMPLES: usize = 64;
        let lo = self.first.min(self.last);
        let hi = self.first.max(self.last);
        let range = hi - lo;
        if range <= 0.0 {
            let q = self.start_point();
            return (q, (q - p).length());
        }

        let mut best_t = lo;
        let mut best_d = f64::INFINITY;
        for i in 0..=SAMPLES {
            let t = lo + range * i as f64 / SAMPLES as f64;
            let d = (self.curve.point_at(t) - p).length();
            if d < best_d {
                best_d = d;
                best_t = t;
            }
        }

        let step = range / SAMPLES as f64;
        let mut low = (best_t - step).max(lo);
        let mut high = (best_t + step).min(hi);
        for _ in 0..48 {
            let m1 = low + (high - low) / 3.0;
            let m2 = high - (high - low) / 3.0;
            let d1 = (self.curve.point_at(m1) - p).length();
            let d2 = (self.curve.point_at(m2) - p).length();
            if d1 < d2 {
                high = m2;
            } else {
                low = m1;
            }
        }
        let t = (low + high) * 0.5;
        let q = self.curve.point_at(t);
        (q, (q - p).length())
    }
}

impl Default for EdgeHandle {
    /// Degenerate zero-length handle, used as the placeholder on records
    /// whose handle has not been rebuilt yet.
    fn default() -> Self {
        Self::new(CurveGeom::Line(Line::new(DVec3::ZERO, DVec3::ZERO)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draft_curve::Circle;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn unit_line() -> EdgeHandle {
        EdgeHandle::new(CurveGeom::Line(Line::new(
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
        )))
    }

    #[test]
    fn test_handle_endpoints() {
        let h = unit_line();
        assert!((h.start_point() - DVec3::ZERO).length() < 1e-12);
        assert!((h.end_point() - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_handle_mid_point_by_length() {
        // Half the arc length of a half circle sits at a quarter turn.
        let circle = Circle::new(DVec3::ZERO, DVec3::Z, 4.0);
        let h = EdgeHandle::trimmed(CurveGeom::Circle(circle), 0.0, PI);
        let mid = h.mid_point();
        assert!((mid - DVec3::new(0.0, 4.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_handle_length() {
        let h = unit_line();
        assert!((h.length() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_handle_quad_points() {
        let h = unit_line();
        let quads = h.quad_points();
        assert_eq!(quads.len(), 3);
        assert!((quads[0].x - 2.5).abs() < 1e-12);
        assert!((quads[1].x - 5.0).abs() < 1e-12);
        assert!((quads[2].x - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_handle_closed() {
        let circle = Circle::new(DVec3::ZERO, DVec3::Z, 1.0);
        let full = EdgeHandle::trimmed(CurveGeom::Circle(circle.clone()), 0.0, TAU);
        assert!(full.is_closed(1e-9));
        let arc = EdgeHandle::trimmed(CurveGeom::Circle(circle), 0.0, FRAC_PI_2);
        assert!(!arc.is_closed(1e-9));
    }

    #[test]
    fn test_handle_nearest() {
        let h = unit_line();
        let (q, d) = h.nearest(DVec3::new(3.0, 4.0, 0.0));
        assert!((q - DVec3::new(3.0, 0.0, 0.0)).length() < 1e-6);
        assert!((d - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_handle_extent() {
        let h = unit_line();
        assert!((h.extent() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_trimmed_handles_share_one_curve() {
        // Handles wrap the kernel curve, they never copy it.
        let h = unit_line();
        let sub = EdgeHandle::from_shared(h.share_curve(), 0.0, 0.5, false);
        assert!(Arc::ptr_eq(&h.share_curve(), &sub.share_curve()));
        assert!((sub.end_point() - DVec3::new(5.0, 0.0, 0.0)).length() < 1e-12);
    }
}
