//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g. `e4`) and
//! [`SquareName`] values reused by the FEN and SAN codecs.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{SquareFile, SquareName, SquareRank};

/// Convert algebraic notation (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> Result<SquareName, ChessErrors> {
    let mut chars = square.chars();
    let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
    else {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    };

    let file = SquareFile::from_char(file_char)
        .ok_or_else(|| ChessErrors::InvalidAlgebraicString(square.to_owned()))?;
    let rank = SquareRank::from_char(rank_char)
        .ok_or_else(|| ChessErrors::InvalidAlgebraicString(square.to_owned()))?;

    Ok(SquareName::new(file, rank))
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: SquareName) -> String {
    square.to_string()
}

/// Convert a `0..64` square index to algebraic notation.
pub fn index_to_algebraic(index: usize) -> Result<String, ChessErrors> {
    SquareName::from_index(index)
        .map(square_to_algebraic)
        .ok_or_else(|| ChessErrors::InvalidAlgebraicString(format!("#{index}")))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, index_to_algebraic, square_to_algebraic};

    #[test]
    fn round_trip_square_conversions() {
        let a1 = algebraic_to_square("a1").expect("a1 should parse");
        let h8 = algebraic_to_square("h8").expect("h8 should parse");
        assert_eq!(a1.index(), 0);
        assert_eq!(h8.index(), 63);
        assert_eq!(square_to_algebraic(a1), "a1");
        assert_eq!(index_to_algebraic(63).expect("63 should convert"), "h8");
    }

    #[test]
    fn rejects_malformed_squares() {
        for text in ["", "e", "e44", "z1", "a0", "a9", "E4"] {
            assert!(algebraic_to_square(text).is_err(), "{text} should not parse");
        }
        assert!(index_to_algebraic(64).is_err());
    }
}
