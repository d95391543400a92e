#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("bubble set needs at least one area")]
    Empty,
    #[error("area at index {index} must be positive and keep the total finite, got {area}")]
    InvalidArea { index: usize, area: f64 },
    #[error("bubble spacing must be a non-negative finite number, got {spacing}")]
    InvalidSpacing { spacing: f64 },
    #[error("expected {expected} starting positions, got {actual}")]
    PositionCountMismatch { expected: usize, actual: usize },
    #[error("starting position at index {index} is not finite")]
    InvalidPosition { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
