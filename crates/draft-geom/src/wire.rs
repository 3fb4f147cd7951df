//! Wires: ordered runs of edge records.

use draft_core::Tolerance;
use draft_math::Point3;
use serde::{Deserialize, Serialize};

use crate::chain::chain_geoms;
use crate::classify::{classify, ClassifierPolicy};
use crate::handle::EdgeHandle;
use crate::record::GeomRecord;

/// An ordered sequence of edge records forming a connected path.
///
/// A wire owns its records exclusively; copies are deep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wire {
    pub geoms: Vec<GeomRecord>,
}

impl Wire {
    pub fn new(geoms: Vec<GeomRecord>) -> Self {
        Self { geoms }
    }

    /// Classify every edge of an edge set and collect the records.
    ///
    /// Edges that fail validation are dropped, matching the classifier's
    /// "no geometry" result for rubbish input.
    pub fn from_edges(edges: &[EdgeHandle], policy: &ClassifierPolicy) -> Self {
        let geoms = edges
            .iter()
            .filter_map(|e| classify(e, false, policy))
            .collect();
        Self { geoms }
    }

    /// This wire with its records chained into connected order.
    pub fn chained(self, tol: f64) -> Self {
        Self {
            geoms: chain_geoms(self.geoms, tol),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.geoms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.geoms.len()
    }

    /// First start point and last end point, honoring reversed flags.
    pub fn end_points(&self) -> Option<(Point3, Point3)> {
        let first = self.geoms.first()?;
        let last = self.geoms.last()?;
        let start = if first.reversed {
            first.end_point()
        } else {
            first.start_point()
        };
        let end = if last.reversed {
            last.start_point()
        } else {
            last.end_point()
        };
        Some((start, end))
    }

    /// Whether the wire forms a closed loop.
    pub fn is_closed(&self, tol: f64) -> bool {
        match self.geoms.len() {
            0 => false,
            1 => self.geoms[0].is_closed(),
            _ => self
                .end_points()
                .map(|(s, e)| (s - e).length() < tol)
                .unwrap_or(false),
        }
    }

    /// Boundary polyline of the wire in traversal order.
    pub fn polyline(&self, chord_tol: f64) -> Vec<Point3> {
        let mut points: Vec<Point3> = Vec::new();
        for geom in &self.geoms {
            let mut run = geom.handle.polyline(chord_tol);
            if geom.reversed {
                run.reverse();
            }
            for p in run {
                let p = Point3::new(p.x, p.y, 0.0);
                if points.last().map(|q| (*q - p).length() > Tolerance::CONFUSION).unwrap_or(true) {
                    points.push(p);
                }
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::GeomShape;
    use draft_curve::{Circle, CurveGeom, Line};
    use draft_math::DVec3;
    use std::f64::consts::TAU;

    fn line_edge(a: (f64, f64), b: (f64, f64)) -> EdgeHandle {
        EdgeHandle::new(CurveGeom::Line(Line::new(
            DVec3::new(a.0, a.1, 0.0),
            DVec3::new(b.0, b.1, 0.0),
        )))
    }

    #[test]
    fn test_wire_from_edges() {
        let policy = ClassifierPolicy::default();
        let edges = vec![
            line_edge((0.0, 0.0), (1.0, 0.0)),
            line_edge((1.0, 0.0), (1.0, 1.0)),
        ];
        let wire = Wire::from_edges(&edges, &policy);
        assert_eq!(wire.len(), 2);
    }

    #[test]
    fn test_wire_drops_invalid_edges() {
        let policy = ClassifierPolicy::default();
        let edges = vec![
            line_edge((0.0, 0.0), (1.0, 0.0)),
            line_edge((0.0, 0.0), (9.0e4, 0.0)),
        ];
        let wire = Wire::from_edges(&edges, &policy);
        assert_eq!(wire.len(), 1);
    }

    #[test]
    fn test_wire_closure() {
        let policy = ClassifierPolicy::default();
        let edges = vec![
            line_edge((0.0, 0.0), (1.0, 0.0)),
            line_edge((1.0, 0.0), (0.5, 1.0)),
            line_edge((0.5, 1.0), (0.0, 0.0)),
        ];
        let wire = Wire::from_edges(&edges, &policy).chained(1e-7);
        assert_eq!(wire.len(), 3);
        assert!(wire.is_closed(1e-7));

        let open = Wire::new(vec![]);
        assert!(!open.is_closed(1e-7));
    }

    #[test]
    fn test_single_closed_record_wire() {
        let policy = ClassifierPolicy::default();
        let circle = EdgeHandle::trimmed(
            CurveGeom::Circle(Circle::new(DVec3::ZERO, DVec3::Z, 1.0)),
            0.0,
            TAU,
        );
        let wire = Wire::from_edges(&[circle], &policy);
        assert_eq!(wire.len(), 1);
        assert!(matches!(wire.geoms[0].shape, GeomShape::Circle { .. }));
        assert!(wire.is_closed(1e-7));
    }

    #[test]
    fn test_wire_polyline_traversal() {
        let policy = ClassifierPolicy::default();
        let edges = vec![
            line_edge((0.0, 0.0), (1.0, 0.0)),
            line_edge((1.0, 0.0), (1.0, 1.0)),
        ];
        let wire = Wire::from_edges(&edges, &policy).chained(1e-7);
        let pts = wire.polyline(1e-3);
        assert_eq!(pts.len(), 3);
        assert!((pts[0] - DVec3::ZERO).length() < 1e-12);
        assert!((pts[2] - DVec3::new(1.0, 1.0, 0.0)).length() < 1e-12);
    }
}
