//! Bezier curve implementation (de Casteljau evaluation).

use draft_math::{DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::{Curve, CurveKind};

/// A Bezier curve of arbitrary degree, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BezierCurve {
    pub poles: Vec<Point3>,
}

impl BezierCurve {
    pub fn new(poles: Vec<Point3>) -> Self {
        debug_assert!(!poles.is_empty(), "Bezier curve needs at least one pole");
        Self { poles }
    }

    pub fn degree(&self) -> usize {
        self.poles.len().saturating_sub(1)
    }

    /// Poles of the derivative curve: `p * (P[i+1] - P[i])`.
    fn derivative_poles(poles: &[Point3]) -> Vec<Point3> {
        let p = poles.len() - 1;
        (0..p).map(|i| p as f64 * (poles[i + 1] - poles[i])).collect()
    }

    fn de_casteljau(poles: &[Point3], t: f64) -> Point3 {
        let mut pts = poles.to_vec();
        let n = pts.len();
        for level in 1..n {
            for i in 0..n - level {
                pts[i] = pts[i] + t * (pts[i + 1] - pts[i]);
            }
        }
        pts[0]
    }
}

impl Curve for BezierCurve {
    fn kind(&self) -> CurveKind {
        CurveKind::Bezier
    }

    fn point_at(&self, t: f64) -> Point3 {
        Self::de_casteljau(&self.poles, t)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        if self.poles.len() < 2 {
            return Vector3::ZERO;
        }
        Self::de_casteljau(&Self::derivative_poles(&self.poles), t)
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        if self.poles.len() < 3 {
            return Vector3::ZERO;
        }
        let d1 = Self::derivative_poles(&self.poles);
        Self::de_casteljau(&Self::derivative_poles(&d1), t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        match (self.poles.first(), self.poles.last()) {
            (Some(a), Some(b)) => (*a - *b).length() < 1e-9,
            _ => false,
        }
    }
}
