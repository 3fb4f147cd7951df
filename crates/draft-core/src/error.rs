use thiserror::Error;

/// Error taxonomy of the drawing-geometry subsystem.
///
/// Kernel faults are normally absorbed at the classification site and the
/// result degrades to a simpler variant; `Logic` and `MissingData` indicate
/// caller misuse and are surfaced as hard failures.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Kernel failure: {0}")]
    Kernel(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Logic error: {0}")]
    Logic(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DraftError>;
