//! Playlist of pre-formatted frames and the cursor that cycles through them.

use crate::grid::GridConfig;
use crate::layout::{Frame, format};

/// Formatted messages and the cursor of the one that shows next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    frames: Vec<Frame>,
    cursor: usize,
}

impl Playlist {
    /// Lay every entry out once, in order.
    pub fn compose<S: AsRef<str>>(entries: &[S], config: &GridConfig) -> Self {
        Self {
            frames: entries.iter().map(|e| format(e.as_ref(), config)).collect(),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.cursor)
    }

    /// Move to the next frame, wrapping. Does nothing on an empty playlist.
    pub fn advance(&mut self) {
        if !self.frames.is_empty() {
            self.cursor = (self.cursor + 1) % self.frames.len();
        }
    }
}
