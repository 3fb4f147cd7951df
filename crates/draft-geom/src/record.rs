//! Edge geometry records: the common envelope around a typed shape.

use draft_core::{GeomTag, TagSource, Tolerance};
use draft_math::Point3;
use serde::{Deserialize, Serialize};

use crate::handle::EdgeHandle;
use crate::persist;
use crate::shape::GeomShape;

/// Which extraction pass produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionKind {
    Plain,
    WithHidden,
    WithSmooth,
    WithSeam,
}

/// Visual class of an edge within the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeClass {
    None,
    Outline,
    Smooth,
    Seam,
    Hard,
}

/// Origin of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Derived from model geometry.
    GeometryEdge,
    /// User-added annotation geometry.
    CosmeticEdge,
    /// Generated centerline.
    Centerline,
}

/// A classified drawing edge.
///
/// Serialized field order is the persisted document order; the kernel
/// handle and the tag are skipped (the handle is rebuilt from the shape on
/// restore, the tag is re-minted by the owning container).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeomRecord {
    pub extraction: ExtractionKind,
    pub class: EdgeClass,
    pub visible: bool,
    pub reversed: bool,
    pub legacy_ref: i32,
    pub cosmetic: bool,
    pub source: SourceKind,
    pub source_index: i32,
    pub cosmetic_tag: String,
    pub shape: GeomShape,
    #[serde(skip)]
    pub tag: GeomTag,
    #[serde(skip)]
    pub handle: EdgeHandle,
}

impl GeomRecord {
    pub fn new(shape: GeomShape, handle: EdgeHandle) -> Self {
        Self {
            extraction: ExtractionKind::Plain,
            class: EdgeClass::None,
            visible: true,
            reversed: false,
            legacy_ref: -1,
            cosmetic: false,
            source: SourceKind::GeometryEdge,
            source_index: -1,
            cosmetic_tag: String::new(),
            shape,
            tag: GeomTag::nil(),
            handle,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        self.shape.kind_name()
    }

    pub fn start_point(&self) -> Point3 {
        self.handle.start_point()
    }

    pub fn end_point(&self) -> Point3 {
        self.handle.end_point()
    }

    pub fn end_points(&self) -> (Point3, Point3) {
        self.handle.end_points()
    }

    /// Arc-length midpoint of the edge.
    pub fn mid_point(&self) -> Point3 {
        self.handle.mid_point()
    }

    /// Points at the quarter marks of the parameter range.
    pub fn quad_points(&self) -> Vec<Point3> {
        self.handle.quad_points()
    }

    pub fn length(&self) -> f64 {
        self.handle.length()
    }

    /// Whether the edge closes on itself in the drawing plane.
    pub fn is_closed(&self) -> bool {
        let (s, e) = self.end_points();
        let s = Point3::new(s.x, s.y, 0.0);
        let e = Point3::new(e.x, e.y, 0.0);
        (s - e).length() <= Tolerance::CLOSURE
    }

    /// Minimum distance from `p` to the edge.
    pub fn min_dist(&self, p: Point3) -> f64 {
        self.handle.nearest(p).1
    }

    /// Point on the edge nearest to `p`, projected to the drawing plane.
    pub fn near_point(&self, p: Point3) -> Point3 {
        let (q, _) = self.handle.nearest(p);
        Point3::new(q.x, q.y, 0.0)
    }

    /// Intersection points with another edge, both taken in extended form
    /// (lines to the crazy perimeter, arcs completed to full curves).
    pub fn intersections_with(&self, other: &GeomRecord) -> Vec<Point3> {
        crate::intersect::intersections(self, other)
    }

    /// Copy of this record with a fresh identity.
    ///
    /// All flags and the shared curve handle carry over; only the tag is
    /// re-minted.
    pub fn duplicate(&self, tags: &mut dyn TagSource) -> Self {
        let mut copy = self.clone();
        copy.tag = tags.next_tag();
        copy
    }

    /// Record mirrored about the X axis, for mapping between view and paper
    /// space.
    pub fn inverted(&self) -> Self {
        let shape = self.shape.mirrored_y();
        let handle = persist::handle_from_shape(&shape);
        let mut flipped = self.clone();
        flipped.shape = shape;
        flipped.handle = handle;
        flipped
    }
}

impl std::fmt::Display for GeomRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (s, e) = self.end_points();
        write!(
            f,
            "{}: s:({:.3}, {:.3}) e:({:.3}, {:.3}) class: {:?} viz: {} rev: {} cosmetic: {} source: {:?} iSource: {}",
            self.kind_name(),
            s.x,
            s.y,
            e.x,
            e.y,
            self.class,
            self.visible,
            self.reversed,
            self.cosmetic,
            self.source,
            self.source_index,
        )
    }
}
