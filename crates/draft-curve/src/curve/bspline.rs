//! B-spline curve implementation.

use draft_math::{DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::{Curve, CurveKind};
use crate::basis::{basis_values, basis_values_derivs, span_index};

/// A B-spline curve defined by degree, knot vector, and control points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BSplineCurve {
    pub degree: usize,
    pub knots: Vec<f64>,
    pub control_points: Vec<Point3>,
}

impl BSplineCurve {
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<Point3>) -> Self {
        debug_assert!(
            knots.len() == control_points.len() + degree + 1,
            "Knot vector length must be n + p + 1, got {} knots for {} CPs with degree {}",
            knots.len(),
            control_points.len(),
            degree
        );
        Self {
            degree,
            knots,
            control_points,
        }
    }

    /// Control points ("poles") of the curve.
    pub fn poles(&self) -> &[Point3] {
        &self.control_points
    }

    /// Derivative curve: one degree lower, scaled control-point differences.
    ///
    /// Degenerates to a single-point degree-0 curve for degree-0 input.
    pub fn hodograph(&self) -> BSplineCurve {
        let p = self.degree;
        if p == 0 || self.control_points.len() < 2 {
            return BSplineCurve {
                degree: 0,
                knots: vec![0.0, 1.0],
                control_points: vec![DVec3::ZERO],
            };
        }
        let mut cps = Vec::with_capacity(self.control_points.len() - 1);
        for i in 0..self.control_points.len() - 1 {
            let span = self.knots[i + p + 1] - self.knots[i + 1];
            let q = if span.abs() < 1e-15 {
                DVec3::ZERO
            } else {
                p as f64 * (self.control_points[i + 1] - self.control_points[i]) / span
            };
            cps.push(q);
        }
        BSplineCurve {
            degree: p - 1,
            knots: self.knots[1..self.knots.len() - 1].to_vec(),
            control_points: cps,
        }
    }

    fn clamp_param(&self, t: f64) -> f64 {
        let (a, b) = self.domain();
        t.clamp(a, b)
    }
}

impl Curve for BSplineCurve {
    fn kind(&self) -> CurveKind {
        CurveKind::BSpline
    }

    fn point_at(&self, t: f64) -> Point3 {
        let t = self.clamp_param(t);
        let span = span_index(self.degree, &self.knots, t);
        let basis = basis_values(self.degree, &self.knots, span, t);

        let mut point = DVec3::ZERO;
        for (i, b) in basis.iter().enumerate() {
            point += *b * self.control_points[span - self.degree + i];
        }
        point
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let t = self.clamp_param(t);
        let span = span_index(self.degree, &self.knots, t);
        let (_, derivs) = basis_values_derivs(self.degree, &self.knots, span, t);

        let mut tangent = DVec3::ZERO;
        for (i, d) in derivs.iter().enumerate() {
            tangent += *d * self.control_points[span - self.degree + i];
        }
        tangent
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        if self.degree < 2 {
            return Vector3::ZERO;
        }
        self.hodograph().tangent_at(self.clamp_param(t))
    }

    fn domain(&self) -> (f64, f64) {
        let p = self.degree;
        (self.knots[p], self.knots[self.knots.len() - p - 1])
    }

    fn is_closed(&self) -> bool {
        let (a, b) = self.domain();
        (self.point_at(a) - self.point_at(b)).length() < 1e-9
    }
}
