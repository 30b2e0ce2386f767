use serde::{Deserialize, Serialize};

use super::board::Slot;

/// One of the two piece symbols on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    A,
    B,
}

impl Symbol {
    /// Get the other symbol
    pub fn other(self) -> Symbol {
        match self {
            Symbol::A => Symbol::B,
            Symbol::B => Symbol::A,
        }
    }

    /// Convert symbol to slot contents
    pub fn to_slot(self) -> Slot {
        match self {
            Symbol::A => Slot::A,
            Symbol::B => Slot::B,
        }
    }

    /// Default glyph used when rendering the board
    pub fn glyph(self) -> char {
        match self {
            Symbol::A => 'o',
            Symbol::B => 'x',
        }
    }

    /// Get symbol name for display
    pub fn name(self) -> &'static str {
        match self {
            Symbol::A => "A",
            Symbol::B => "B",
        }
    }

    /// Index into per-symbol arrays (A = 0, B = 1).
    pub fn index(self) -> usize {
        match self {
            Symbol::A => 0,
            Symbol::B => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_symbol() {
        assert_eq!(Symbol::A.other(), Symbol::B);
        assert_eq!(Symbol::B.other(), Symbol::A);
    }

    #[test]
    fn test_symbol_to_slot() {
        assert_eq!(Symbol::A.to_slot(), Slot::A);
        assert_eq!(Symbol::B.to_slot(), Slot::B);
    }

    #[test]
    fn test_symbol_serde_lowercase() {
        let json = serde_json::to_string(&Symbol::B).unwrap();
        assert_eq!(json, "\"b\"");
    }
}
