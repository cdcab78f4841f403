//! King steps and castling candidates.
//!
//! A castling candidate is offered for each side the king's color still holds
//! a right for, as long as the king stands on its home square. Occupancy and
//! attack conditions are checked by the legality filter.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::{CastlingMove, ChessMove};
use crate::moves::move_rule::{holds_piece_type, step_moves, step_targets, MoveRule};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub struct KingMoveRule;

impl MoveRule for KingMoveRule {
    fn name(&self) -> &'static str {
        "king"
    }

    fn is_applicable(&self, position: &Position, square: SquareName) -> bool {
        holds_piece_type(position, square, PieceType::King)
    }

    fn candidate_moves(&self, position: &Position, square: SquareName) -> Vec<ChessMove> {
        let Some(king) = position.piece_at(square) else {
            return Vec::new();
        };

        let mut moves = step_moves(position, square, &KING_OFFSETS);

        for side in position.get_castling_rights(king.color) {
            let castling = CastlingMove::new(king.color, side);
            if castling.king_from() == square {
                moves.push(ChessMove::Castling(castling));
            }
        }

        moves
    }

    fn targets(&self, _position: &Position, square: SquareName) -> Vec<SquareName> {
        step_targets(square, &KING_OFFSETS)
    }
}
