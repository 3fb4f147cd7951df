//! Typed geometry payloads.

use draft_math::Point3;
use serde::{Deserialize, Serialize};

/// One Bezier piece of a spline's rendered form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierSpan {
    pub degree: usize,
    pub poles: Vec<Point3>,
}

/// Circular-arc payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcData {
    pub center: Point3,
    pub radius: f64,
    pub start: Point3,
    pub end: Point3,
    pub mid: Point3,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
    pub large_arc: bool,
}

/// Elliptical-arc payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseArcData {
    pub center: Point3,
    pub major: f64,
    pub minor: f64,
    pub angle: f64,
    pub start: Point3,
    pub end: Point3,
    pub mid: Point3,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
    pub large_arc: bool,
}

/// Spline payload: endpoint data plus the piecewise-Bezier rendered form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineData {
    pub start: Point3,
    pub end: Point3,
    pub mid: Point3,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
    pub open: bool,
    pub segments: Vec<BezierSpan>,
}

/// The typed geometry vocabulary of a drawing edge.
///
/// Exactly one variant per record; every variant carries only the fields
/// that belong to its tag. `Line` doubles as the sampled-polyline fallback
/// for curve families with no closed-form mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeomShape {
    Line { points: Vec<Point3> },
    Circle { center: Point3, radius: f64 },
    CircleArc(ArcData),
    Ellipse { center: Point3, major: f64, minor: f64, angle: f64 },
    EllipseArc(EllipseArcData),
    Spline(SplineData),
    Bezier { degree: usize, poles: Vec<Point3> },
}

impl GeomShape {
    /// Stable variant name, for dumps and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            GeomShape::Line { .. } => "Line",
            GeomShape::Circle { .. } => "Circle",
            GeomShape::CircleArc(_) => "ArcOfCircle",
            GeomShape::Ellipse { .. } => "Ellipse",
            GeomShape::EllipseArc(_) => "ArcOfEllipse",
            GeomShape::Spline(_) => "BSpline",
            GeomShape::Bezier { .. } => "Bezier",
        }
    }

    /// Same shape mirrored about the X axis (Y negated).
    pub fn mirrored_y(&self) -> GeomShape {
        fn flip(p: Point3) -> Point3 {
            Point3::new(p.x, -p.y, p.z)
        }
        match self {
            GeomShape::Line { points } => GeomShape::Line {
                points: points.iter().map(|p| flip(*p)).collect(),
            },
            GeomShape::Circle { center, radius } => GeomShape::Circle {
                center: flip(*center),
                radius: *radius,
            },
            GeomShape::CircleArc(a) => GeomShape::CircleArc(ArcData {
                center: flip(a.center),
                radius: a.radius,
                start: flip(a.start),
                end: flip(a.end),
                mid: flip(a.mid),
                start_angle: -a.start_angle,
                end_angle: -a.end_angle,
                clockwise: !a.clockwise,
                large_arc: a.large_arc,
            }),
            GeomShape::Ellipse { center, major, minor, angle } => GeomShape::Ellipse {
                center: flip(*center),
                major: *major,
                minor: *minor,
                angle: -*angle,
            },
            GeomShape::EllipseArc(a) => GeomShape::EllipseArc(EllipseArcData {
                center: flip(a.center),
                major: a.major,
                minor: a.minor,
                angle: -a.angle,
                start: flip(a.start),
                end: flip(a.end),
                mid: flip(a.mid),
                start_angle: -a.start_angle,
                end_angle: -a.end_angle,
                clockwise: !a.clockwise,
                large_arc: a.large_arc,
            }),
            GeomShape::Spline(s) => GeomShape::Spline(SplineData {
                start: flip(s.start),
                end: flip(s.end),
                mid: flip(s.mid),
                start_angle: -s.start_angle,
                end_angle: -s.end_angle,
                clockwise: !s.clockwise,
                open: s.open,
                segments: s
                    .segments
                    .iter()
                    .map(|seg| BezierSpan {
                        degree: seg.degree,
                        poles: seg.poles.iter().map(|p| flip(*p)).collect(),
                    })
                    .collect(),
            }),
            GeomShape::Bezier { degree, poles } => GeomShape::Bezier {
                degree: *degree,
                poles: poles.iter().map(|p| flip(*p)).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draft_math::DVec3;

    #[test]
    fn test_kind_names() {
        let line = GeomShape::Line { points: vec![DVec3::ZERO, DVec3::X] };
        assert_eq!(line.kind_name(), "Line");
        let circle = GeomShape::Circle { center: DVec3::ZERO, radius: 1.0 };
        assert_eq!(circle.kind_name(), "Circle");
    }

    #[test]
    fn test_mirror_involution() {
        let shape = GeomShape::Bezier {
            degree: 2,
            poles: vec![
                DVec3::new(0.0, 1.0, 0.0),
                DVec3::new(1.0, -2.0, 0.0),
                DVec3::new(2.0, 3.0, 0.0),
            ],
        };
        assert_eq!(shape.mirrored_y().mirrored_y(), shape);
    }

    #[test]
    fn test_mirror_flips_winding() {
        let arc = GeomShape::CircleArc(ArcData {
            center: DVec3::ZERO,
            radius: 1.0,
            start: DVec3::new(1.0, 0.0, 0.0),
            end: DVec3::new(0.0, 1.0, 0.0),
            mid: DVec3::new(0.707, 0.707, 0.0),
            start_angle: 0.0,
            end_angle: std::f64::consts::FRAC_PI_2,
            clockwise: false,
            large_arc: false,
        });
        match arc.mirrored_y() {
            GeomShape::CircleArc(m) => {
                assert!(m.clockwise);
                assert!((m.mid.y + 0.707).abs() < 1e-12);
            }
            other => panic!("unexpected variant: {}", other.kind_name()),
        }
    }
}
