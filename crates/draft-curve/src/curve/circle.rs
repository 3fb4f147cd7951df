//! Circle curve.

use std::f64::consts::PI;

use draft_math::{DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::{Curve, CurveKind};

/// A circle in 3D space, parameterized by angle over `[0, 2*PI]`.
///
/// The circle lies in the plane defined by `center` and `normal`. The
/// reference direction for `t = 0` is the global X axis projected into the
/// circle plane (Y when the normal is near X), so planar drawing circles
/// with a +Z normal are parameterized counter-clockwise from +X.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point3,
    pub normal: Vector3,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point3, normal: Vector3, radius: f64) -> Self {
        Self {
            center,
            normal: normal.normalize(),
            radius,
        }
    }

    /// Orthonormal frame (u_axis, v_axis) in the circle plane.
    fn local_frame(&self) -> (DVec3, DVec3) {
        let n = self.normal;
        let ref_vec = if n.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
        let u = (ref_vec - n * ref_vec.dot(n)).normalize();
        let v = n.cross(u);
        (u, v)
    }

    /// Angle of `p` (projected to the circle plane) from the `t = 0` axis.
    pub fn angle_of(&self, p: Point3) -> f64 {
        let (u, v) = self.local_frame();
        let d = p - self.center;
        let a = d.dot(v).atan2(d.dot(u));
        if a < 0.0 {
            a + 2.0 * PI
        } else {
            a
        }
    }
}

impl Curve for Circle {
    fn kind(&self) -> CurveKind {
        CurveKind::Circle
    }

    fn point_at(&self, t: f64) -> Point3 {
        let (u, v) = self.local_frame();
        self.center + self.radius * (t.cos() * u + t.sin() * v)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let (u, v) = self.local_frame();
        self.radius * (-t.sin() * u + t.cos() * v)
    }

    fn second_derivative_at(&self, t: f64) -> Vector3 {
        let (u, v) = self.local_frame();
        -self.radius * (t.cos() * u + t.sin() * v)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 2.0 * PI)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_points_on_circle() {
        let circle = Circle::new(DVec3::ZERO, DVec3::Z, 1.0);
        for i in 0..8 {
            let t = i as f64 * PI / 4.0;
            let p = circle.point_at(t);
            assert!(
                (p.length() - 1.0).abs() < 1e-10,
                "Point at t={} not on circle: dist={}",
                t,
                p.length()
            );
            assert!(p.z.abs() < 1e-10, "Point not in XY plane");
        }
    }

    #[test]
    fn test_circle_planar_frame() {
        // With a +Z normal the zero angle sits on +X and sweeps counter-clockwise.
        let circle = Circle::new(DVec3::ZERO, DVec3::Z, 2.0);
        let p0 = circle.point_at(0.0);
        assert!((p0 - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-10);
        let p1 = circle.point_at(PI / 2.0);
        assert!((p1 - DVec3::new(0.0, 2.0, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_circle_angle_of_round_trip() {
        let circle = Circle::new(DVec3::new(1.0, -2.0, 0.0), DVec3::Z, 3.0);
        for i in 0..8 {
            let t = i as f64 * PI / 4.0;
            let a = circle.angle_of(circle.point_at(t));
            assert!((a - t).abs() < 1e-10, "angle mismatch at t={}: {}", t, a);
        }
    }

    #[test]
    fn test_circle_tangent_perpendicular() {
        let circle = Circle::new(DVec3::ZERO, DVec3::Z, 1.0);
        for i in 0..8 {
            let t = i as f64 * PI / 4.0;
            let p = circle.point_at(t);
            let tang = circle.tangent_at(t);
            assert!(
                p.dot(tang).abs() < 1e-10,
                "Tangent not perpendicular at t={}",
                t
            );
        }
    }

    #[test]
    fn test_circle_second_derivative_points_inward() {
        let circle = Circle::new(DVec3::ZERO, DVec3::Z, 2.0);
        let t = 0.7;
        let d2 = circle.second_derivative_at(t);
        let radial = circle.point_at(t) - circle.center;
        // Second derivative is the negated radial vector.
        assert!((d2 + radial).length() < 1e-10);
    }

    #[test]
    fn test_circle_is_closed() {
        let circle = Circle::new(DVec3::ZERO, DVec3::Z, 1.0);
        assert!(circle.is_closed());
    }
}
