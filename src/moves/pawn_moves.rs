//! Pawn pushes and diagonal captures.
//!
//! Promotion is not produced here: a push or capture onto the last rank is a
//! single candidate, and the promotion piece is chosen when the move is
//! applied.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::move_rule::{holds_piece_type, MoveRule};

pub struct PawnMoveRule;

/// The two forward diagonals of a pawn of `color` on `from`.
pub fn pawn_capture_squares(color: PieceColor, from: SquareName) -> Vec<SquareName> {
    let forward = color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(|d_file| from.offset(d_file, forward))
        .collect()
}

impl MoveRule for PawnMoveRule {
    fn name(&self) -> &'static str {
        "pawn"
    }

    fn is_applicable(&self, position: &Position, square: SquareName) -> bool {
        holds_piece_type(position, square, PieceType::Pawn)
    }

    fn candidate_moves(&self, position: &Position, square: SquareName) -> Vec<ChessMove> {
        let Some(pawn) = position.piece_at(square) else {
            return Vec::new();
        };
        let forward = pawn.color.pawn_direction();
        let mut moves = Vec::new();

        if let Some(one_step) = square.offset(0, forward) {
            if position.piece_at(one_step).is_none() {
                moves.push(ChessMove::simple(square, one_step));

                if square.rank() == pawn.color.pawn_start_rank() {
                    if let Some(two_step) = one_step.offset(0, forward) {
                        if position.piece_at(two_step).is_none() {
                            moves.push(ChessMove::simple(square, two_step));
                        }
                    }
                }
            }
        }

        for target in pawn_capture_squares(pawn.color, square) {
            if matches!(position.piece_at(target), Some(victim) if victim.is_opponent(pawn.color)) {
                moves.push(ChessMove::simple(square, target));
            }
        }

        moves
    }

    fn targets(&self, position: &Position, square: SquareName) -> Vec<SquareName> {
        match position.piece_at(square) {
            Some(pawn) => pawn_capture_squares(pawn.color, square),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> SquareName {
        text.parse().expect("test square should parse")
    }

    fn destinations(fen: &str, from: &str) -> Vec<SquareName> {
        let position = parse_fen(fen).expect("FEN should parse");
        let mut out: Vec<SquareName> = PawnMoveRule
            .candidate_moves(&position, sq(from))
            .iter()
            .map(|mv| mv.to())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn double_step_from_start_rank() {
        assert_eq!(
            destinations("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", "e2"),
            vec![sq("e3"), sq("e4")]
        );
        assert_eq!(
            destinations("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1", "e7"),
            vec![sq("e5"), sq("e6")]
        );
    }

    #[test]
    fn blocked_pushes() {
        assert!(destinations("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2").is_empty());
        assert_eq!(
            destinations("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2"),
            vec![sq("e3")]
        );
    }

    #[test]
    fn captures_only_opponents() {
        assert_eq!(
            destinations("4k3/8/8/8/8/3p1N2/4P3/4K3 w - - 0 1", "e2"),
            vec![sq("d3"), sq("e3"), sq("e4")]
        );
    }

    #[test]
    fn targets_are_both_diagonals() {
        let position = parse_fen("4k3/8/8/8/8/8/P7/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(PawnMoveRule.targets(&position, sq("a2")), vec![sq("b3")]);
    }
}
