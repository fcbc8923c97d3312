use std::fmt;

use serde::{Deserialize, Serialize};

/// A token color. `Golden` is the wildcard; the other five are standard colors.
///
/// The declaration order is the fixed iteration order for every bag of pieces.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Piece {
    Red,
    Green,
    Blue,
    Brown,
    White,
    Golden,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Red,
        Piece::Green,
        Piece::Blue,
        Piece::Brown,
        Piece::White,
        Piece::Golden,
    ];

    pub const STANDARD: [Piece; 5] = [
        Piece::Red,
        Piece::Green,
        Piece::Blue,
        Piece::Brown,
        Piece::White,
    ];

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Piece::Golden)
    }

    /// Single-letter code used in card keys and compact rendering.
    pub fn code(&self) -> char {
        match self {
            Piece::Red => 'r',
            Piece::Green => 'g',
            Piece::Blue => 'b',
            Piece::Brown => 'k',
            Piece::White => 'w',
            Piece::Golden => 'y',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Piece::Red => "red",
            Piece::Green => "green",
            Piece::Blue => "blue",
            Piece::Brown => "brown",
            Piece::White => "white",
            Piece::Golden => "golden",
        };
        write!(f, "{}", name)
    }
}
