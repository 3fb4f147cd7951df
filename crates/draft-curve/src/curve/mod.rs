//! Curve traits and implementations.

mod bezier;
mod bspline;
mod circle;
mod ellipse;
mod line;

use draft_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

pub use bezier::BezierCurve;
pub use bspline::BSplineCurve;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use line::Line;

/// Analytic family of a curve, mirroring kernel curve-type introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveKind {
    Line,
    Circle,
    Ellipse,
    Bezier,
    BSpline,
}

/// Trait for parametric curves in 3D space.
pub trait Curve: Send + Sync {
    /// Analytic family of this curve.
    fn kind(&self) -> CurveKind;

    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// First derivative with respect to `t` (not normalized).
    fn tangent_at(&self, t: f64) -> Vector3;

    /// Second derivative with respect to `t`.
    fn second_derivative_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        false
    }
}

/// Sum type over the analytic curves.
///
/// Classification seams match on this instead of downcasting trait objects,
/// so every curve family is handled exhaustively at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CurveGeom {
    Line(Line),
    Circle(Circle),
    Ellipse(Ellipse),
    BSpline(BSplineCurve),
    Bezier(BezierCurve),
}

impl CurveGeom {
    pub fn as_curve(&self) -> &dyn Curve {
        match self {
            CurveGeom::Line(c) => c,
            CurveGeom::Circle(c) => c,
            CurveGeom::Ellipse(c) => c,
            CurveGeom::BSpline(c) => c,
            CurveGeom::Bezier(c) => c,
        }
    }
}

impl Curve for CurveGeom {
    fn kind(&self) -> CurveKind {
        self.as_curve().kind()
    }

    fn point_at(&self, t: f64) -> Point3 {
        self.as_curve().point_at(t)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        self.as_curve().tangent_at(t)
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        self.as_curve().second_derivative_at(t)
    }

    fn domain(&self) -> (f64, f64) {
        self.as_curve().domain()
    }

    fn is_closed(&self) -> bool {
        self.as_curve().is_closed()
    }
}
