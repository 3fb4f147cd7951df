use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a geometry or vertex record.
///
/// Tags are minted through a [`TagSource`] and are never reused. A record
/// constructed without a source carries the nil tag until its owning
/// container assigns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeomTag(Uuid);

impl GeomTag {
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(self) -> bool {
        self.0.is_nil()
    }

    /// Parse a tag from its serialized string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for GeomTag {
    fn default() -> Self {
        Self::nil()
    }
}

impl std::fmt::Display for GeomTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh record tags.
///
/// Constructors that mint identity take a `&mut dyn TagSource` instead of
/// reaching for process-global generator state, so callers control both
/// determinism and synchronization.
pub trait TagSource {
    fn next_tag(&mut self) -> GeomTag;
}

/// Random tag source backed by v4 uuids.
#[derive(Debug, Default)]
pub struct UuidTagSource;

impl TagSource for UuidTagSource {
    fn next_tag(&mut self) -> GeomTag {
        GeomTag(Uuid::new_v4())
    }
}

/// Deterministic tag source for tests and reproducible sessions.
#[derive(Debug, Default)]
pub struct SequentialTagSource {
    next: u64,
}

impl TagSource for SequentialTagSource {
    fn next_tag(&mut self) -> GeomTag {
        self.next += 1;
        GeomTag(Uuid::from_u128(u128::from(self.next)))
    }
}
