//! Faces: an outer boundary wire plus hole wires.

use draft_core::{DraftError, Result, Tolerance};
use draft_math::{polygon, Point3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::wire::Wire;

/// Chord tolerance used when a face discretizes its boundary for area and
/// centroid queries.
const MEASURE_CHORD_TOL: f64 = 1e-4;

/// A planar drawing face: one outer wire and zero or more hole wires.
///
/// The outer wire must enclose all holes; holes must not overlap each
/// other. Neither condition is enforced here; the downstream face builder
/// rejects inconsistent input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Face {
    pub wires: Vec<Wire>,
}

impl Face {
    pub fn new(outer: Wire) -> Self {
        Self { wires: vec![outer] }
    }

    pub fn with_holes(outer: Wire, holes: Vec<Wire>) -> Self {
        let mut wires = vec![outer];
        wires.extend(holes);
        Self { wires }
    }

    pub fn outer(&self) -> Option<&Wire> {
        self.wires.first()
    }

    pub fn holes(&self) -> &[Wire] {
        if self.wires.is_empty() {
            &[]
        } else {
            &self.wires[1..]
        }
    }

    /// Boundary polygon of the outer wire.
    pub fn outer_polygon(&self) -> Vec<Point3> {
        self.outer()
            .map(|w| w.polyline(MEASURE_CHORD_TOL))
            .unwrap_or_default()
    }

    /// Enclosed area of the outer boundary (holes are not subtracted).
    pub fn area(&self) -> f64 {
        polygon::area(&self.outer_polygon())
    }

    /// Area centroid of the outer boundary.
    pub fn center(&self) -> Point3 {
        polygon::centroid(&self.outer_polygon())
    }

    /// Distance from `p` to the face: zero inside, boundary distance
    /// outside.
    pub fn distance_to(&self, p: Point3) -> f64 {
        let boundary = self.outer_polygon();
        if polygon::contains_point(&boundary, p) {
            0.0
        } else {
            polygon::boundary_distance(&boundary, p)
        }
    }
}

/// Find the faces that perforate `faces[target]`.
///
/// A candidate is a hole iff its area is strictly smaller than the
/// target's and its centroid lies on or within the target's outer
/// boundary. No containment graph is built; nested or overlapping holes
/// are the face builder's problem.
///
/// An empty face set or an out-of-range index is a hard error: both mean
/// the caller handed over a stale reference.
pub fn find_holes(faces: &[Face], target: usize) -> Result<Vec<usize>> {
    if faces.is_empty() {
        return Err(DraftError::MissingData("no faces to search for holes".into()));
    }
    if target >= faces.len() {
        return Err(DraftError::MissingData(format!(
            "face index {target} out of range ({} faces)",
            faces.len()
        )));
    }

    let target_area = faces[target].area();
    let mut holes = Vec::new();
    for (index, face) in faces.iter().enumerate() {
        if index == target {
            continue;
        }
        if face.area() >= target_area {
            continue;
        }
        // Centroid inside (or touching) the outer contour is good enough;
        // partial overlaps are ignored downstream.
        if faces[target].distance_to(face.center()) > Tolerance::CLOSURE {
            continue;
        }
        holes.push(index);
    }
    Ok(holes)
}

/// A copy of `face` with the hole boundaries attached as inner wires.
///
/// Holes without a boundary wire are skipped with a warning; a face without
/// wires cannot be perforated and comes back empty.
pub fn perforate(face: &Face, holes: &[&Face]) -> Face {
    let Some(outer) = face.outer() else {
        warn!("perforate: face has no boundary wire");
        return Face::default();
    };

    let mut result = Face::new(outer.clone());
    for hole in holes {
        match hole.outer() {
            Some(wire) if !wire.is_empty() => result.wires.push(wire.clone()),
            _ => warn!("perforate: skipping hole without boundary wire"),
        }
    }
    result
}
