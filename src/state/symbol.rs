//! Reel symbol catalog.
//!
//! The catalog order defines the reel strip layout. Index arithmetic wraps
//! around the catalog so every reel position maps to a symbol.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of symbols on a reel strip.
pub const SYMBOL_COUNT: usize = 6;

/// A reel symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Cherry,
    Lemon,
    Bell,
    Star,
    Clover,
    Seven,
}

impl Symbol {
    /// All symbols in strip order.
    pub const ALL: [Symbol; SYMBOL_COUNT] = [
        Self::Cherry,
        Self::Lemon,
        Self::Bell,
        Self::Star,
        Self::Clover,
        Self::Seven,
    ];

    /// Position of this symbol on the strip.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Symbol at a strip position, wrapping past the end.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % SYMBOL_COUNT]
    }

    /// Get the lowercase name used in stored data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cherry => "cherry",
            Self::Lemon => "lemon",
            Self::Bell => "bell",
            Self::Star => "star",
            Self::Clover => "clover",
            Self::Seven => "seven",
        }
    }

    /// Glyph shown to the player.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Cherry => "🍒",
            Self::Lemon => "🍋",
            Self::Bell => "🔔",
            Self::Star => "⭐",
            Self::Clover => "🍀",
            Self::Seven => "7️⃣",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Error when a string names no symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol: {0}")]
pub struct UnknownSymbol(pub String);

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|sym| sym.as_str() == s || sym.glyph() == s)
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}
