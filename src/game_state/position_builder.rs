//! Mutable staging area for positions.
//!
//! The builder performs no rule checking: `move_piece` relocates whatever
//! stands on the source square. Clone it to evaluate a move speculatively.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionBuilder {
    board: [Option<Piece>; 64],
    player_to_move: PieceColor,
    castling_rights: CastlingRights,
    en_passant_target: Option<SquareName>,
    half_moves: u32,
    full_moves: u32,
}

impl PositionBuilder {
    /// Empty board, White to move, no rights, counters `0`/`1`.
    pub fn new() -> Self {
        Self {
            board: [None; 64],
            player_to_move: PieceColor::White,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
            half_moves: 0,
            full_moves: 1,
        }
    }

    pub fn from_position(position: &Position) -> Self {
        Self {
            board: position.board,
            player_to_move: position.player_to_move,
            castling_rights: position.castling_rights,
            en_passant_target: position.en_passant_target,
            half_moves: position.half_moves,
            full_moves: position.full_moves,
        }
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
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn set_square(&mut self, name: SquareName, piece: Piece) -> &mut Self {
        self.board[name.index()] = Some(piece);
        self
    }

    pub fn remove_piece(&mut self, name: SquareName) -> &mut Self {
        self.board[name.index()] = None;
        self
    }

    /// Unconditional relocation; anything on `to` is overwritten.
    pub fn move_piece(&mut self, from: SquareName, to: SquareName) -> &mut Self {
        let piece = self.board[from.index()].take();
        self.board[to.index()] = piece;
        self
    }

    pub fn with_en_passant_target(&mut self, target: Option<SquareName>) -> &mut Self {
        self.en_passant_target = target;
        self
    }

    pub fn with_castling_rights(&mut self, rights: CastlingRights) -> &mut Self {
        self.castling_rights = rights;
        self
    }

    pub fn add_castling_right(&mut self, color: PieceColor, side: CastlingSide) -> &mut Self {
        self.castling_rights.insert(color, side);
        self
    }

    pub fn add_all_castling_rights(&mut self) -> &mut Self {
        self.castling_rights = CastlingRights::ALL;
        self
    }

    pub fn revoke_castling_right(&mut self, color: PieceColor, side: CastlingSide) -> &mut Self {
        self.castling_rights.remove(color, side);
        self
    }

    pub fn revoke_castling_rights(&mut self, color: PieceColor) -> &mut Self {
        self.castling_rights.remove_color(color);
        self
    }

    pub fn with_player_to_move(&mut self, color: PieceColor) -> &mut Self {
        self.player_to_move = color;
        self
    }

    pub fn with_half_moves(&mut self, half_moves: u32) -> &mut Self {
        self.half_moves = half_moves;
        self
    }

    pub fn with_full_moves(&mut self, full_moves: u32) -> &mut Self {
        self.full_moves = full_moves;
        self
    }

    pub fn increment_half_moves(&mut self) -> &mut Self {
        self.half_moves = self.half_moves.saturating_add(1);
        self
    }

    pub fn reset_half_moves(&mut self) -> &mut Self {
        self.half_moves = 0;
        self
    }

    pub fn increment_full_moves(&mut self) -> &mut Self {
        self.full_moves = self.full_moves.saturating_add(1);
        self
    }

    pub fn switch_color(&mut self) -> &mut Self {
        self.player_to_move = self.player_to_move.opposite();
        self
    }

    /// Place both armies on their starting squares.
    pub fn add_standard_pieces(&mut self) -> &mut Self {
        for color in PieceColor::ALL {
            for (file, piece_type) in SquareFile::ALL.into_iter().zip(BACK_RANK) {
                self.set_square(
                    SquareName::new(file, color.home_rank()),
                    Piece::new(piece_type, color),
                );
                self.set_square(
                    SquareName::new(file, color.pawn_start_rank()),
                    Piece::new(PieceType::Pawn, color),
                );
            }
        }
        self
    }

    /// Freeze the current contents into an immutable position.
    pub fn build(&self) -> Position {
        Position {
            board: self.board,
            player_to_move: self.player_to_move,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            half_moves: self.half_moves,
            full_moves: self.full_moves,
        }
    }
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> SquareName {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn move_piece_relocates_without_rule_checks() {
        let mut builder = PositionBuilder::new();
        builder
            .set_square(sq("a1"), Piece::new(PieceType::Rook, PieceColor::White))
            .set_square(sq("h8"), Piece::new(PieceType::Knight, PieceColor::Black))
            .move_piece(sq("a1"), sq("h8"));

        let position = builder.build();
        assert_eq!(position.piece_at(sq("a1")), None);
        assert_eq!(
            position.piece_at(sq("h8")),
            Some(Piece::new(PieceType::Rook, PieceColor::White))
        );
    }

    #[test]
    fn cloned_builder_is_independent() {
        let mut original = PositionBuilder::new();
        original.add_standard_pieces();

        let mut speculative = original.clone();
        speculative
            .remove_piece(sq("e2"))
            .switch_color()
            .increment_full_moves();

        assert!(original.piece_at(sq("e2")).is_some());
        assert_eq!(original.player_to_move(), PieceColor::White);
        assert_ne!(original.build(), speculative.build());
    }

    #[test]
    fn counters_and_rights_are_tracked() {
        let mut builder = PositionBuilder::new();
        builder
            .add_all_castling_rights()
            .revoke_castling_right(PieceColor::White, CastlingSide::Queenside)
            .increment_half_moves()
            .increment_half_moves()
            .with_en_passant_target(Some(sq("e3")));
        let position = builder.build();

        assert_eq!(position.half_moves(), 2);
        assert!(!position.can_castle(PieceColor::White, CastlingSide::Queenside));
        assert!(position.can_castle(PieceColor::White, CastlingSide::Kingside));
        assert_eq!(position.en_passant_target(), Some(sq("e3")));

        builder.reset_half_moves();
        assert_eq!(builder.build().half_moves(), 0);
    }
}
