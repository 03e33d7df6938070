//! Board engine error types.

use thiserror::Error;

use super::entities::Player;

/// Errors raised by board construction and move insertion.
///
/// Everything except `InvalidDimensions` is recoverable: a rejected move
/// leaves the board exactly as it was.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BoardError {
    #[error("invalid board dimensions {width}x{height} with {cells} cells")]
    InvalidDimensions {
        width: usize,
        height: usize,
        cells: usize,
    },
    #[error("column {column} is outside 0..{width}")]
    InvalidColumn { column: usize, width: usize },
    #[error("cell index {index} is outside 0..{len}")]
    InvalidIndex { index: usize, len: usize },
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("game already won by {0}")]
    GameAlreadyDecided(Player),
}

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;
