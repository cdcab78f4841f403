//! Move values produced by the rule set and consumed by move application.
//!
//! A [`ChessMove`] is either a plain relocation (which may capture, promote,
//! set or consume an en-passant target as a side effect of application) or a
//! castling move that relocates king and rook together.

use std::fmt;

use crate::game_state::chess_types::*;

/// Relocation of the piece on `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleMove {
    pub from: SquareName,
    pub to: SquareName,
}

impl SimpleMove {
    #[inline]
    pub const fn new(from: SquareName, to: SquareName) -> Self {
        Self { from, to }
    }
}

/// King and rook relocation for one `(color, side)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingMove {
    pub color: PieceColor,
    pub side: CastlingSide,
}

impl CastlingMove {
    #[inline]
    pub const fn new(color: PieceColor, side: CastlingSide) -> Self {
        Self { color, side }
    }

    #[inline]
    pub const fn king_from(&self) -> SquareName {
        SquareName::new(SquareFile::E, self.color.home_rank())
    }

    #[inline]
    pub const fn king_to(&self) -> SquareName {
        let file = match self.side {
            CastlingSide::Kingside => SquareFile::G,
            CastlingSide::Queenside => SquareFile::C,
        };
        SquareName::new(file, self.color.home_rank())
    }

    #[inline]
    pub const fn rook_from(&self) -> SquareName {
        SquareName::new(self.side.rook_file(), self.color.home_rank())
    }

    #[inline]
    pub const fn rook_to(&self) -> SquareName {
        let file = match self.side {
            CastlingSide::Kingside => SquareFile::F,
            CastlingSide::Queenside => SquareFile::D,
        };
        SquareName::new(file, self.color.home_rank())
    }

    /// Squares the king stands on or crosses: start, transit, landing.
    pub fn king_path(&self) -> [SquareName; 3] {
        let rank = self.color.home_rank();
        let files = match self.side {
            CastlingSide::Kingside => [SquareFile::E, SquareFile::F, SquareFile::G],
            CastlingSide::Queenside => [SquareFile::E, SquareFile::D, SquareFile::C],
        };
        files.map(|file| SquareName::new(file, rank))
    }

    /// Squares strictly between king and rook, all of which must be empty.
    pub fn squares_between(&self) -> Vec<SquareName> {
        let rank = self.color.home_rank();
        let files: &[SquareFile] = match self.side {
            CastlingSide::Kingside => &[SquareFile::F, SquareFile::G],
            CastlingSide::Queenside => &[SquareFile::B, SquareFile::C, SquareFile::D],
        };
        files
            .iter()
            .map(|file| SquareName::new(*file, rank))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChessMove {
    Simple(SimpleMove),
    Castling(CastlingMove),
}

impl ChessMove {
    #[inline]
    pub const fn simple(from: SquareName, to: SquareName) -> Self {
        ChessMove::Simple(SimpleMove::new(from, to))
    }

    #[inline]
    pub const fn castling(color: PieceColor, side: CastlingSide) -> Self {
        ChessMove::Castling(CastlingMove::new(color, side))
    }

    /// Source square; the king's square for castling.
    pub const fn from(&self) -> SquareName {
        match self {
            ChessMove::Simple(mv) => mv.from,
            ChessMove::Castling(mv) => mv.king_from(),
        }
    }

    /// Destination square; the king's landing square for castling.
    pub const fn to(&self) -> SquareName {
        match self {
            ChessMove::Simple(mv) => mv.to,
            ChessMove::Castling(mv) => mv.king_to(),
        }
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        matches!(self, ChessMove::Castling(_))
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessMove::Simple(mv) => write!(f, "{}{}", mv.from, mv.to),
            ChessMove::Castling(mv) => match mv.side {
                CastlingSide::Kingside => write!(f, "O-O"),
                CastlingSide::Queenside => write!(f, "O-O-O"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> SquareName {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn castling_geometry_for_black_queenside() {
        let mv = CastlingMove::new(PieceColor::Black, CastlingSide::Queenside);
        assert_eq!(mv.king_from(), sq("e8"));
        assert_eq!(mv.king_to(), sq("c8"));
        assert_eq!(mv.rook_from(), sq("a8"));
        assert_eq!(mv.rook_to(), sq("d8"));
        assert_eq!(mv.king_path(), [sq("e8"), sq("d8"), sq("c8")]);
        assert_eq!(mv.squares_between(), vec![sq("b8"), sq("c8"), sq("d8")]);
    }

    #[test]
    fn move_endpoints_and_display() {
        let simple = ChessMove::simple(sq("g1"), sq("f3"));
        assert_eq!(simple.to_string(), "g1f3");

        let castle = ChessMove::castling(PieceColor::White, CastlingSide::Kingside);
        assert_eq!(castle.from(), sq("e1"));
        assert_eq!(castle.to(), sq("g1"));
        assert_eq!(castle.to_string(), "O-O");
        assert!(castle.is_castling());
    }
}
