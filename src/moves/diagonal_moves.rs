//! Diagonal sliding for bishops and queens.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::move_rule::{slide, MoveRule};

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub struct DiagonalMoveRule;

impl MoveRule for DiagonalMoveRule {
    fn name(&self) -> &'static str {
        "diagonal"
    }

    fn is_applicable(&self, position: &Position, square: SquareName) -> bool {
        matches!(
            position.piece_at(square),
            Some(Piece {
                piece_type: PieceType::Bishop | PieceType::Queen,
                ..
            })
        )
    }

    fn candidate_moves(&self, position: &Position, square: SquareName) -> Vec<ChessMove> {
        slide(position, square, &DIAGONAL_DIRECTIONS, false)
            .into_iter()
            .map(|to| ChessMove::simple(square, to))
            .collect()
    }

    fn targets(&self, position: &Position, square: SquareName) -> Vec<SquareName> {
        slide(position, square, &DIAGONAL_DIRECTIONS, true)
    }
}
