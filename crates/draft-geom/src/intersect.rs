//! Edge extension and intersection queries.

use std::f64::consts::TAU;

use draft_core::{DraftError, Result};
use draft_curve::{CurveGeom, Line};
use draft_math::{intersect as planar, DVec3, Point3};

use crate::handle::EdgeHandle;
use crate::record::GeomRecord;
use crate::shape::GeomShape;

/// Perimeter to which line edges are stretched when intersecting outside
/// their trimmed spans. Matches the crazy-edge bound: anything farther out
/// would have been rejected as geometry anyway.
const EXTENSION_RANGE: f64 = 1.0e4;

/// Chord tolerance for the tessellation fallback intersector.
const SWEEP_CHORD_TOL: f64 = 1e-4;

/// Extend an edge beyond its boundaries so intersections outside the
/// trimmed span can be found: lines stretch to the crazy perimeter, arcs
/// complete to their full circle or ellipse. Splines and Beziers are not
/// extrapolated.
pub fn extended(handle: &EdgeHandle) -> EdgeHandle {
    match handle.curve() {
        CurveGeom::Line(line) => {
            let dir = (line.end - line.start).normalize_or_zero();
            if dir == DVec3::ZERO {
                return handle.clone();
            }
            let mid = (line.start + line.end) * 0.5;
            EdgeHandle::new(CurveGeom::Line(Line::new(
                mid - dir * EXTENSION_RANGE,
                mid + dir * EXTENSION_RANGE,
            )))
        }
        CurveGeom::Circle(circle) => EdgeHandle::trimmed(CurveGeom::Circle(circle.clone()), 0.0, TAU),
        CurveGeom::Ellipse(ellipse) => {
            EdgeHandle::trimmed(CurveGeom::Ellipse(ellipse.clone()), 0.0, TAU)
        }
        _ => handle.clone(),
    }
}

/// Intersection points between two edges, both taken in extended form.
///
/// Line and circle pairs are solved analytically; remaining pairs fall back
/// to a tessellated segment sweep. Parallel or disjoint input yields an
/// empty set.
pub fn intersections(a: &GeomRecord, b: &GeomRecord) -> Vec<Point3> {
    let ea = extended(&a.handle);
    let eb = extended(&b.handle);

    match (ea.curve(), eb.curve()) {
        (CurveGeom::Line(l0), CurveGeom::Line(l1)) => planar::line_line(
            l0.start,
            l0.end - l0.start,
            l1.start,
            l1.end - l1.start,
        )
        .into_iter()
        .collect(),
        (CurveGeom::Line(l), CurveGeom::Circle(c)) => {
            planar::line_circle(l.start, l.end - l.start, c.center, c.radius)
        }
        (CurveGeom::Circle(c), CurveGeom::Line(l)) => {
            planar::line_circle(l.start, l.end - l.start, c.center, c.radius)
        }
        (CurveGeom::Circle(c0), CurveGeom::Circle(c1)) => {
            planar::circle_circle(c0.center, c0.radius, c1.center, c1.radius)
        }
        _ => polyline_sweep(&ea, &eb),
    }
}

/// Apparent intersection of two line records, projected to the drawing
/// plane.
///
/// Near-parallel input is a hard error: the caller selected edges that have
/// no meaningful crossing.
pub fn apparent_intersection(a: &GeomRecord, b: &GeomRecord) -> Result<Point3> {
    let (GeomShape::Line { points: pa }, GeomShape::Line { points: pb }) = (&a.shape, &b.shape)
    else {
        return Err(DraftError::Logic(
            "apparent intersection requires two line records".into(),
        ));
    };
    if pa.len() < 2 || pb.len() < 2 {
        return Err(DraftError::Logic("line record without endpoints".into()));
    }

    let dir0 = pa[pa.len() - 1] - pa[0];
    let dir1 = pb[pb.len() - 1] - pb[0];

    let det = dir0.x * dir1.y - dir0.y * dir1.x;
    if det.abs() < 1e-10 {
        return Err(DraftError::Logic(
            "near-parallel lines have no apparent intersection".into(),
        ));
    }

    let c0 = dir0.y * pa[0].x - dir0.x * pa[0].y;
    let c1 = dir1.y * pb[pb.len() - 1].x - dir1.x * pb[pb.len() - 1].y;
    let x = (dir0.x * c1 - dir1.x * c0) / det;
    let y = (dir0.y * c1 - dir1.y * c0) / det;
    Ok(Point3::new(x, y, 0.0))
}

fn polyline_sweep(a: &EdgeHandle, b: &EdgeHandle) -> Vec<Point3> {
    let pa = a.polyline(SWEEP_CHORD_TOL);
    let pb = b.polyline(SWEEP_CHORD_TOL);

    let mut found: Vec<Point3> = Vec::new();
    for sa in pa.windows(2) {
        for sb in pb.windows(2) {
            if let Some(p) = planar::segment_segment(sa[0], sa[1], sb[0], sb[1]) {
                let duplicate = found.iter().any(|q| (*q - p).length() < 1e-6);
                if !duplicate {
                    found.push(p);
                }
            }
        }
    }
    found
}
