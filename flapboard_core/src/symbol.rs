//! Symbols are the unit of everything on the board: one grapheme cluster per
//! flap, whether that is `A`, `é` built from two code points, or a
//! multi-code-point pictograph such as a flag.

use std::borrow::Cow;
use std::fmt;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::error::{BoardError, Result};

/// The wheel printed on the physical flaps of the original board.
pub const DEFAULT_ALPHABET: &str = " ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%&?.:-";

/// One user-perceived character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(Cow<'static, str>);

impl Symbol {
    pub const fn space() -> Self {
        Symbol(Cow::Borrowed(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_space(&self) -> bool {
        self.0 == " "
    }

    /// Whether a flap can show this symbol.
    ///
    /// Control characters, bare combining marks and whitespace other than
    /// the plain space have nothing to print.
    pub fn is_displayable(&self) -> bool {
        if self.is_space() {
            return true;
        }
        if self.0.is_empty() || self.0.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return false;
        }
        self.0.width() >= 1
    }

    /// The symbol itself when displayable, otherwise a space.
    pub fn or_space(self) -> Self {
        if self.is_displayable() { self } else { Symbol::space() }
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol::space()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Symbol {
    fn from(s: &'static str) -> Self {
        Symbol(Cow::Borrowed(s))
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol(Cow::Owned(s))
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Split text into owned symbols.
pub fn symbols(text: &str) -> Vec<Symbol> {
    text.graphemes(true).map(|g| Symbol::from(g.to_owned())).collect()
}

/// Number of grapheme clusters in `text`.
pub fn symbol_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Ordered set of symbols a flap may show while it is still turning.
///
/// The order is the order of the physical wheel: the deterministic flip
/// walks it front to back and wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeAlphabet {
    wheel: Vec<Symbol>,
}

impl SafeAlphabet {
    pub fn parse(wheel: &str) -> Result<Self> {
        let mut parsed: Vec<Symbol> = Vec::new();
        for symbol in symbols(wheel) {
            if !symbol.is_displayable() {
                return Err(BoardError::UndisplayableSymbol(symbol.as_str().to_owned()));
            }
            if parsed.contains(&symbol) {
                return Err(BoardError::DuplicateSymbol(symbol.as_str().to_owned()));
            }
            parsed.push(symbol);
        }
        if parsed.is_empty() {
            return Err(BoardError::EmptyAlphabet);
        }
        Ok(Self { wheel: parsed })
    }

    pub fn len(&self) -> usize {
        self.wheel.len()
    }

    /// Always false for a parsed alphabet; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.wheel.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.wheel.get(index)
    }

    pub fn position(&self, symbol: &Symbol) -> Option<usize> {
        self.wheel.iter().position(|s| s == symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.position(symbol).is_some()
    }

    pub fn first(&self) -> &Symbol {
        &self.wheel[0]
    }

    pub fn last(&self) -> &Symbol {
        &self.wheel[self.wheel.len() - 1]
    }

    /// The symbol after `symbol` on the wheel. Anything not on the wheel is
    /// followed by the first wheel symbol.
    pub fn successor(&self, symbol: &Symbol) -> &Symbol {
        match self.position(symbol) {
            Some(i) => &self.wheel[(i + 1) % self.wheel.len()],
            None => self.first(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.wheel.iter()
    }

    /// The wheel written back out as one string.
    pub fn to_wheel_string(&self) -> String {
        self.wheel.iter().map(Symbol::as_str).collect()
    }
}

impl Default for SafeAlphabet {
    fn default() -> Self {
        Self {
            wheel: DEFAULT_ALPHABET
                .graphemes(true)
                .map(|g| Symbol::from(g.to_owned()))
                .collect(),
        }
    }
}
