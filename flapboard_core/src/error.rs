//! Errors raised while building or driving a board.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("Board needs at least one row")]
    ZeroRows,
    #[error("Board needs at least one column")]
    ZeroCols,
    #[error("Board of {rows}x{cols} cells is too large")]
    BoardTooLarge { rows: usize, cols: usize },
    #[error("Safe alphabet is empty")]
    EmptyAlphabet,
    #[error("Safe alphabet lists {0:?} more than once")]
    DuplicateSymbol(String),
    #[error("Safe alphabet symbol {0:?} cannot be shown on a flap")]
    UndisplayableSymbol(String),
    #[error("Invalid timing: {0}")]
    InvalidTiming(&'static str),
    #[error("Blur snap chance must be within 0.0..=1.0, got {0}")]
    InvalidSnapChance(f32),
    #[error("Failed to start runtime: {0}")]
    Runtime(String),
    #[error("Cell {index} is outside a board of {len} cells")]
    CellOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, BoardError>;
