//! Projected vertex records.

use draft_core::{GeomTag, TagSource};
use draft_math::Point3;
use serde::{Deserialize, Serialize};

use crate::record::ExtractionKind;

/// A drawing vertex: a projected point with bookkeeping flags.
///
/// Unlike edge geometry, a vertex tag is serialized (as its string form)
/// and survives save/restore; construction and copying always mint a fresh
/// one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    pub point: Point3,
    pub extraction: ExtractionKind,
    pub visible: bool,
    pub legacy_ref: i32,
    /// Marks the center point of a circular feature.
    pub center_mark: bool,
    pub cosmetic: bool,
    pub cosmetic_link: i32,
    pub cosmetic_tag: String,
    pub tag: GeomTag,
    /// Transient selection-reference flag; always recreated, never saved.
    #[serde(skip)]
    pub reference: bool,
}

impl Vertex {
    pub fn new(point: Point3, tags: &mut dyn TagSource) -> Self {
        Self {
            point,
            extraction: ExtractionKind::Plain,
            visible: false,
            legacy_ref: -1,
            center_mark: false,
            cosmetic: false,
            cosmetic_link: -1,
            cosmetic_tag: String::new(),
            tag: tags.next_tag(),
            reference: false,
        }
    }

    pub fn at(x: f64, y: f64, tags: &mut dyn TagSource) -> Self {
        Self::new(Point3::new(x, y, 0.0), tags)
    }

    /// Copy with a fresh identity; every other field carries over.
    pub fn duplicate(&self, tags: &mut dyn TagSource) -> Self {
        let mut copy = self.clone();
        copy.tag = tags.next_tag();
        copy.reference = false;
        copy
    }

    /// Whether two vertices coincide within `tol`.
    pub fn is_equal(&self, other: &Vertex, tol: f64) -> bool {
        (self.point - other.point).length() <= tol
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vertex: point: ({:.3}, {:.3}, {:.3}) vis: {} cosmetic: {} cosLink: {} cosTag: {}",
            self.point.x,
            self.point.y,
            self.point.z,
            self.visible,
            self.cosmetic,
            self.cosmetic_link,
            self.cosmetic_tag,
        )
    }
}
