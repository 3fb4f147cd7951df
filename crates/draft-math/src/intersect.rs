//! Analytic 2D intersections in the XY plane.
//!
//! Inputs are `Point3` but only the x/y components participate; results are
//! returned with z = 0.

use crate::{Point3, Vector3};

/// Intersection of two infinite lines given by point + direction.
///
/// Returns `None` when the directions are parallel within the determinant
/// threshold.
pub fn line_line(p0: Point3, d0: Vector3, p1: Point3, d1: Vector3) -> Option<Point3> {
    let det = d0.x * d1.y - d0.y * d1.x;
    if det.abs() < 1e-10 {
        return None;
    }
    let c0 = d0.y * p0.x - d0.x * p0.y;
    let c1 = d1.y * p1.x - d1.x * p1.y;
    let x = (d0.x * c1 - d1.x * c0) / det;
    let y = (d0.y * c1 - d1.y * c0) / det;
    Some(Point3::new(x, y, 0.0))
}

/// Intersection of two bounded segments (endpoints included).
pub fn segment_segment(a0: Point3, a1: Point3, b0: Point3, b1: Point3) -> Option<Point3> {
    let da = a1 - a0;
    let db = b1 - b0;
    let det = da.x * db.y - da.y * db.x;
    if det.abs() < 1e-12 {
        return None;
    }
    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let s = (dx * db.y - dy * db.x) / det;
    let t = (dx * da.y - dy * da.x) / det;
    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        Some(Point3::new(a0.x + s * da.x, a0.y + s * da.y, 0.0))
    } else {
        None
    }
}

/// Intersection of an infinite line with a full circle.
pub fn line_circle(p: Point3, d: Vector3, center: Point3, radius: f64) -> Vec<Point3> {
    let dir_len = (d.x * d.x + d.y * d.y).sqrt();
    if dir_len < 1e-12 {
        return Vec::new();
    }
    let ux = d.x / dir_len;
    let uy = d.y / dir_len;
    // Parameter of the foot of the perpendicular from the center.
    let t0 = (center.x - p.x) * ux + (center.y - p.y) * uy;
    let foot = Point3::new(p.x + t0 * ux, p.y + t0 * uy, 0.0);
    let dist_sq = (foot.x - center.x).powi(2) + (foot.y - center.y).powi(2);
    let rem = radius * radius - dist_sq;
    if rem < -1e-12 {
        return Vec::new();
    }
    if rem.abs() <= 1e-12 {
        return vec![foot];
    }
    let h = rem.sqrt();
    vec![
        Point3::new(foot.x - h * ux, foot.y - h * uy, 0.0),
        Point3::new(foot.x + h * ux, foot.y + h * uy, 0.0),
    ]
}

/// Intersection of two full circles.
pub fn circle_circle(c0: Point3, r0: f64, c1: Point3, r1: f64) -> Vec<Point3> {
    let dx = c1.x - c0.x;
    let dy = c1.y - c0.y;
    let d = (dx * dx + dy * dy).sqrt();
    if d < 1e-12 {
        // Concentric: either identical (infinite solutions, not reported) or disjoint.
        return Vec::new();
    }
    if d > r0 + r1 + 1e-12 || d < (r0 - r1).abs() - 1e-12 {
        return Vec::new();
    }
    let a = (r0 * r0 - r1 * r1 + d * d) / (2.0 * d);
    let h_sq = r0 * r0 - a * a;
    let mx = c0.x + a * dx / d;
    let my = c0.y + a * dy / d;
    if h_sq <= 1e-12 {
        return vec![Point3::new(mx, my, 0.0)];
    }
    let h = h_sq.sqrt();
    vec![
        Point3::new(mx + h * dy / d, my - h * dx / d, 0.0),
        Point3::new(mx - h * dy / d, my + h * dx / d, 0.0),
    ]
}
