//! En-passant captures.
//!
//! The candidate lands on the en-passant target; the captured pawn stands
//! beside the mover on `(target file, mover rank)` and is removed when the
//! move is applied.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::move_rule::MoveRule;
use crate::moves::pawn_moves::pawn_capture_squares;

pub struct EnPassantMoveRule;

/// Square of the pawn removed by an en-passant capture from `from` to `target`.
#[inline]
pub fn en_passant_victim_square(from: SquareName, target: SquareName) -> SquareName {
    SquareName::new(target.file(), from.rank())
}

impl MoveRule for EnPassantMoveRule {
    fn name(&self) -> &'static str {
        "en_passant"
    }

    fn is_applicable(&self, position: &Position, square: SquareName) -> bool {
        let Some(pawn) = position.piece_at(square) else {
            return false;
        };
        let Some(target) = position.en_passant_target() else {
            return false;
        };
        if pawn.piece_type != PieceType::Pawn || position.piece_at(target).is_some() {
            return false;
        }

        let victim = position.piece_at(en_passant_victim_square(square, target));
        pawn_capture_squares(pawn.color, square).contains(&target)
            && matches!(victim, Some(v) if v.piece_type == PieceType::Pawn && v.is_opponent(pawn.color))
    }

    fn candidate_moves(&self, position: &Position, square: SquareName) -> Vec<ChessMove> {
        match position.en_passant_target() {
            Some(target) => vec![ChessMove::simple(square, target)],
            None => Vec::new(),
        }
    }

    fn targets(&self, _position: &Position, _square: SquareName) -> Vec<SquareName> {
        Vec::new()
    }
}
