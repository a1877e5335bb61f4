//! Layout engine: turns a message into a [`Frame`] of exactly `rows * cols`
//! symbols.
//!
//! Line breaks inside a message are hard row boundaries. Each line is then
//! wrapped by width into chunks of at most `cols` symbols, so `"HELLO\nWORLD"`
//! on a 5-column board is two rows even though it would fit on one wide row.
//! Content past the last row is dropped.

use unicode_segmentation::UnicodeSegmentation;

use crate::grid::{GridConfig, Justification, LetterCase};
use crate::symbol::{Symbol, symbols};

/// A fully laid-out board: one target symbol per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    cols: usize,
    cells: Vec<Symbol>,
}

impl Frame {
    /// All-space frame.
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            cells: vec![Symbol::space(); rows * cols],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        if self.cols == 0 { 0 } else { self.cells.len() / self.cols }
    }

    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.cells.get(index)
    }

    pub fn row(&self, row: usize) -> &[Symbol] {
        let start = (row * self.cols).min(self.cells.len());
        let end = (start + self.cols).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Each row joined into a string.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.rows())
            .map(|r| self.row(r).iter().map(Symbol::as_str).collect())
            .collect()
    }
}

/// Lay `message` out on the board described by `config`.
pub fn format(message: &str, config: &GridConfig) -> Frame {
    let (rows, cols) = (config.rows(), config.cols());
    if message.trim().is_empty() {
        return Frame::blank(rows, cols);
    }

    let folded;
    let message = match config.letter_case() {
        LetterCase::Preserve => message,
        LetterCase::Upper => {
            folded = message.to_uppercase();
            folded.as_str()
        }
    };

    let mut chunks: Vec<Vec<Symbol>> = message
        .lines()
        .flat_map(|line| wrap_line(line, cols))
        .take(rows)
        .collect();
    chunks.resize_with(rows, Vec::new);

    let mut cells = Vec::with_capacity(rows * cols);
    for chunk in chunks {
        cells.extend(justify(chunk, cols, config.justification()));
    }
    debug_assert_eq!(cells.len(), rows * cols);

    Frame { cols, cells }
}

/// Split one line into chunks of at most `cols` symbols. An empty line is a
/// single empty chunk.
pub fn wrap_line(line: &str, cols: usize) -> Vec<Vec<Symbol>> {
    let line_symbols = symbols(line);
    if line_symbols.is_empty() || cols == 0 {
        return vec![Vec::new()];
    }
    line_symbols.chunks(cols).map(<[Symbol]>::to_vec).collect()
}

/// Truncate `chunk` to `cols` symbols and pad it with spaces to exactly `cols`.
pub fn justify(mut chunk: Vec<Symbol>, cols: usize, justification: Justification) -> Vec<Symbol> {
    chunk.truncate(cols);
    let deficit = cols - chunk.len();
    let (lead, trail) = match justification {
        Justification::Left => (0, deficit),
        Justification::Center => (deficit / 2, deficit - deficit / 2),
        Justification::Right => (deficit, 0),
    };

    let mut row = Vec::with_capacity(cols);
    row.extend(std::iter::repeat_n(Symbol::space(), lead));
    row.extend(chunk);
    row.extend(std::iter::repeat_n(Symbol::space(), trail));
    row
}

/// Longest line of `message` in symbols, ignoring wrapping.
pub fn widest_line(message: &str) -> usize {
    message
        .lines()
        .map(|line| line.graphemes(true).count())
        .max()
        .unwrap_or(0)
}
