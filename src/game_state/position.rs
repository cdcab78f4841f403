//! Immutable board snapshot.
//!
//! A `Position` is produced by [`PositionBuilder::build`] and never changes
//! afterwards. Speculative evaluation clones a builder, mutates the copy and
//! builds a fresh position.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::standard_position;
use crate::game_state::chess_types::*;
use crate::game_state::position_builder::PositionBuilder;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: [Option<Piece>; 64],
    pub(crate) player_to_move: PieceColor,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<SquareName>,
    pub(crate) half_moves: u32,
    pub(crate) full_moves: u32,
}

impl Position {
    /// Empty board, White to move, no castling rights, counters `0`/`1`.
    pub fn empty() -> Self {
        PositionBuilder::new().build()
    }

    /// Clone of the shared standard starting layout.
    pub fn standard() -> Self {
        standard_position().clone()
    }

    /// Square contents for any coordinate. Never fails.
    #[inline]
    pub fn get_square(&self, name: SquareName) -> Square {
        Square::new(name, self.board[name.index()])
    }

    #[inline]
    pub fn piece_at(&self, name: SquareName) -> Option<Piece> {
        self.board[name.index()]
    }

    #[inline]
    pub fn player_to_move(&self) -> PieceColor {
        self.player_to_move
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<SquareName> {
        self.en_passant_target
    }

    #[inline]
    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }

    #[inline]
    pub fn full_moves(&self) -> u32 {
        self.full_moves
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn can_castle(&self, color: PieceColor, side: CastlingSide) -> bool {
        self.castling_rights.contains(color, side)
    }

    /// Sides `color` still holds castling rights for.
    pub fn get_castling_rights(&self, color: PieceColor) -> Vec<CastlingSide> {
        self.castling_rights.sides(color)
    }

    /// All 64 squares, `a1` first.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        SquareName::all().map(move |name| self.get_square(name))
    }

    /// Occupied squares holding a piece of `color`.
    pub fn pieces(&self, color: PieceColor) -> impl Iterator<Item = (SquareName, Piece)> + '_ {
        SquareName::all().filter_map(move |name| match self.piece_at(name) {
            Some(piece) if piece.color == color => Some((name, piece)),
            _ => None,
        })
    }

    /// Location of `color`'s king.
    ///
    /// A position without a king is corrupted; the error is not recoverable.
    pub fn king_square(&self, color: PieceColor) -> Result<SquareName, ChessErrors> {
        self.pieces(color)
            .find(|(_, piece)| piece.piece_type == PieceType::King)
            .map(|(name, _)| name)
            .ok_or(ChessErrors::KingNotFound(color))
    }

    /// Builder seeded with this position, for producing successors.
    pub fn to_builder(&self) -> PositionBuilder {
        PositionBuilder::from_position(self)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}
