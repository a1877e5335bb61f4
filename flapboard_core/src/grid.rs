//! Grid geometry and text placement for the flap board.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::symbol::SafeAlphabet;

// Board the original installation shipped with
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 22;

// Largest board accepted, in cells
pub const MAX_CELLS: usize = 4096;

/// Where a short row sits inside its `cols` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
}

impl Justification {
    pub const ALL: [Justification; 3] = [Self::Left, Self::Center, Self::Right];

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}

/// Case folding applied to messages before layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterCase {
    #[default]
    Preserve,
    Upper,
}

/// Immutable description of one board. Changing any of it means building a
/// new board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    rows: usize,
    cols: usize,
    justification: Justification,
    alphabet: SafeAlphabet,
    letter_case: LetterCase,
}

impl GridConfig {
    pub fn new(
        rows: usize,
        cols: usize,
        justification: Justification,
        alphabet: SafeAlphabet,
    ) -> Result<Self> {
        if rows == 0 {
            return Err(BoardError::ZeroRows);
        }
        if cols == 0 {
            return Err(BoardError::ZeroCols);
        }
        if rows.checked_mul(cols).is_none_or(|cells| cells > MAX_CELLS) {
            return Err(BoardError::BoardTooLarge { rows, cols });
        }
        if alphabet.is_empty() {
            return Err(BoardError::EmptyAlphabet);
        }
        Ok(Self {
            rows,
            cols,
            justification,
            alphabet,
            letter_case: LetterCase::Preserve,
        })
    }

    pub fn with_letter_case(mut self, letter_case: LetterCase) -> Self {
        self.letter_case = letter_case;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn justification(&self) -> Justification {
        self.justification
    }

    pub fn alphabet(&self) -> &SafeAlphabet {
        &self.alphabet
    }

    pub fn letter_case(&self) -> LetterCase {
        self.letter_case
    }

    /// Row-major index of `(row, col)`.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            justification: Justification::Left,
            alphabet: SafeAlphabet::default(),
            letter_case: LetterCase::Preserve,
        }
    }
}
