//! Save/restore of drawing geometry.
//!
//! Records serialize through serde in declaration order; the kernel handle
//! is never persisted. On restore every record gets a handle rebuilt from
//! its shape data, and edge tags come back nil (the owning container mints
//! fresh ones). Vertex tags round-trip through their string form.

use std::f64::consts::TAU;

use draft_core::{DraftError, Result};
use draft_curve::{BSplineCurve, BezierCurve, Circle, CurveGeom, Ellipse, Line};
use draft_math::{DVec3, Point3};
use tracing::warn;

use crate::face::Face;
use crate::handle::EdgeHandle;
use crate::record::GeomRecord;
use crate::shape::{BezierSpan, GeomShape, SplineData};
use crate::vertex::Vertex;
use crate::wire::Wire;

pub fn save_record(record: &GeomRecord) -> Result<String> {
    to_json(record)
}

pub fn restore_record(text: &str) -> Result<GeomRecord> {
    let mut record: GeomRecord = from_json(text)?;
    validate_shape(&record.shape)?;
    record.handle = handle_from_shape(&record.shape);
    Ok(record)
}

pub fn save_vertex(vertex: &Vertex) -> Result<String> {
    to_json(vertex)
}

pub fn restore_vertex(text: &str) -> Result<Vertex> {
    from_json(text)
}

pub fn save_wire(wire: &Wire) -> Result<String> {
    to_json(wire)
}

pub fn restore_wire(text: &str) -> Result<Wire> {
    let mut wire: Wire = from_json(text)?;
    for geom in &mut wire.geoms {
        validate_shape(&geom.shape)?;
        geom.handle = handle_from_shape(&geom.shape);
    }
    Ok(wire)
}

pub fn save_face(face: &Face) -> Result<String> {
    to_json(face)
}

pub fn restore_face(text: &str) -> Result<Face> {
    let mut face: Face = from_json(text)?;
    for wire in &mut face.wires {
        for geom in &mut wire.geoms {
            validate_shape(&geom.shape)?;
            geom.handle = handle_from_shape(&geom.shape);
        }
    }
    Ok(face)
}

/// Write a face document to disk.
pub fn write_face_file(face: &Face, path: &std::path::Path) -> Result<()> {
    std::fs::write(path, save_face(face)?)?;
    Ok(())
}

/// Read a face document back from disk.
pub fn read_face_file(path: &std::path::Path) -> Result<Face> {
    let text = std::fs::read_to_string(path)?;
    restore_face(&text)
}

/// Reject shape data a well-formed document can never contain.
fn validate_shape(shape: &GeomShape) -> Result<()> {
    let fault = match shape {
        GeomShape::Line { points } if points.len() < 2 => Some("line with fewer than two points"),
        GeomShape::Circle { radius, .. } if *radius <= 0.0 => Some("circle with non-positive radius"),
        GeomShape::CircleArc(arc) if arc.radius <= 0.0 => Some("arc with non-positive radius"),
        GeomShape::Ellipse { major, minor, .. } if *major <= 0.0 || *minor <= 0.0 => {
            Some("ellipse with non-positive radius")
        }
        GeomShape::EllipseArc(arc) if arc.major <= 0.0 || arc.minor <= 0.0 => {
            Some("ellipse arc with non-positive radius")
        }
        GeomShape::Bezier { poles, .. } if poles.len() < 2 => Some("bezier with fewer than two poles"),
        _ => None,
    };
    match fault {
        Some(reason) => Err(DraftError::InvalidGeometry(reason.into())),
        None => Ok(()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| DraftError::Parse(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| DraftError::Parse(e.to_string()))
}

/// Rebuild a kernel handle from persisted shape data.
///
/// The reconstruction mirrors classification in reverse: lines from their
/// endpoints, circles and ellipses from their parameters with arc trims,
/// splines from their Bezier spans. Clockwise arcs get a decreasing trim so
/// the handle's start stays the arc's start.
pub fn handle_from_shape(shape: &GeomShape) -> EdgeHandle {
    match shape {
        GeomShape::Line { points } => {
            let (start, end) = match (points.first(), points.last()) {
                (Some(s), Some(e)) => (*s, *e),
                _ => (DVec3::ZERO, DVec3::ZERO),
            };
            EdgeHandle::new(CurveGeom::Line(Line::new(start, end)))
        }
        GeomShape::Circle { center, radius } => EdgeHandle::trimmed(
            CurveGeom::Circle(Circle::new(*center, DVec3::Z, *radius)),
            0.0,
            TAU,
        ),
        GeomShape::CircleArc(arc) => {
            let circle = Circle::new(arc.center, DVec3::Z, arc.radius);
            let (first, last) = arc_trim(arc.start_angle, arc.end_angle, arc.clockwise);
            EdgeHandle::trimmed(CurveGeom::Circle(circle), first, last)
        }
        GeomShape::Ellipse { center, major, minor, angle } => {
            let ellipse = ellipse_from_parms(*center, *major, *minor, *angle);
            EdgeHandle::trimmed(CurveGeom::Ellipse(ellipse), 0.0, TAU)
        }
        GeomShape::EllipseArc(arc) => {
            let ellipse = ellipse_from_parms(arc.center, arc.major, arc.minor, arc.angle);
            let (first, last) = arc_trim(arc.start_angle, arc.end_angle, arc.clockwise);
            EdgeHandle::trimmed(CurveGeom::Ellipse(ellipse), first, last)
        }
        GeomShape::Spline(spline) => spline_handle(spline),
        GeomShape::Bezier { poles, .. } => {
            if poles.is_empty() {
                EdgeHandle::default()
            } else {
                EdgeHandle::new(CurveGeom::Bezier(BezierCurve::new(poles.clone())))
            }
        }
    }
}

fn ellipse_from_parms(center: Point3, major: f64, minor: f64, angle: f64) -> Ellipse {
    let major_axis = DVec3::new(angle.cos(), angle.sin(), 0.0) * major;
    Ellipse::new(center, DVec3::Z, major_axis, minor)
}

/// Trim interval reproducing an arc's sweep; decreasing when clockwise.
fn arc_trim(start_angle: f64, end_angle: f64, clockwise: bool) -> (f64, f64) {
    if clockwise {
        let sweep = (start_angle - end_angle).rem_euclid(TAU);
        (start_angle, start_angle - sweep)
    } else {
        let sweep = (end_angle - start_angle).rem_euclid(TAU);
        (start_angle, start_angle + sweep)
    }
}

/// Reassemble a spline handle from its piecewise-Bezier form.
///
/// Uniform-degree spans join into a single B-spline with full-multiplicity
/// interior knots; anything else degrades to a straight handle between the
/// endpoints.
fn spline_handle(spline: &SplineData) -> EdgeHandle {
    match &spline.segments[..] {
        [] => EdgeHandle::new(CurveGeom::Line(Line::new(spline.start, spline.end))),
        [only] if !only.poles.is_empty() => {
            EdgeHandle::new(CurveGeom::Bezier(BezierCurve::new(only.poles.clone())))
        }
        segments => match join_spans(segments) {
            Some(curve) => EdgeHandle::new(CurveGeom::BSpline(curve)),
            None => {
                warn!("restore: mixed-degree spline spans; using a straight handle");
                EdgeHandle::new(CurveGeom::Line(Line::new(spline.start, spline.end)))
            }
        },
    }
}

fn join_spans(segments: &[BezierSpan]) -> Option<BSplineCurve> {
    let degree = segments.first()?.degree;
    if degree == 0 {
        return None;
    }
    for span in segments {
        if span.degree != degree || span.poles.len() != degree + 1 {
            return None;
        }
    }

    let mut control_points: Vec<Point3> = segments[0].poles.clone();
    for span in &segments[1..] {
        control_points.extend_from_slice(&span.poles[1..]);
    }

    let count = segments.len();
    let mut knots = vec![0.0; degree + 1];
    for i in 1..count {
        knots.extend(std::iter::repeat(i as f64).take(degree));
    }
    knots.extend(std::iter::repeat(count as f64).take(degree + 1));

    Some(BSplineCurve::new(degree, knots, control_points))
}
