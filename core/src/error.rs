use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Swapped cells must share an edge")]
    NotAdjacent,
    #[error("Board needs a non-zero size and at least 3 token types")]
    InvalidDimensions,
    #[error("Board layout rows must all have the same width")]
    InvalidBoardShape,
    #[error("Token type is outside the configured range")]
    InvalidToken,
}

/// Errors a swap request can be rejected with.
pub type SwapError = GameError;

pub type Result<T> = core::result::Result<T, GameError>;
