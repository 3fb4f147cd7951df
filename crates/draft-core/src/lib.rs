pub mod error;
pub mod tag;
pub mod tolerance;

pub use error::{DraftError, Result};
pub use tag::{GeomTag, SequentialTagSource, TagSource, UuidTagSource};
pub use tolerance::Tolerance;
