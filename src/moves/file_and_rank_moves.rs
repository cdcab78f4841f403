//! Orthogonal sliding for rooks and queens.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::move_rule::{slide, MoveRule};

pub const FILE_AND_RANK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub struct FileAndRankMoveRule;

impl MoveRule for FileAndRankMoveRule {
    fn name(&self) -> &'static str {
        "file_and_rank"
    }

    fn is_applicable(&self, position: &Position, square: SquareName) -> bool {
        matches!(
            position.piece_at(square),
            Some(Piece {
                piece_type: PieceType::Rook | PieceType::Queen,
                ..
            })
        )
    }

    fn candidate_moves(&self, position: &Position, square: SquareName) -> Vec<ChessMove> {
        slide(position, square, &FILE_AND_RANK_DIRECTIONS, false)
            .into_iter()
            .map(|to| ChessMove::simple(square, to))
            .collect()
    }

    fn targets(&self, position: &Position, square: SquareName) -> Vec<SquareName> {
        slide(position, square, &FILE_AND_RANK_DIRECTIONS, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> SquareName {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn rook_on_empty_file_and_rank() {
        let position = parse_fen("7k/8/8/8/8/8/8/K6R w - - 0 1").expect("FEN should parse");
        let moves = FileAndRankMoveRule.candidate_moves(&position, sq("h1"));
        // h2..h7, h8 capture, g1..b1
        assert_eq!(moves.len(), 13);
        assert!(moves.contains(&ChessMove::simple(sq("h1"), sq("h8"))));
        assert!(!moves.contains(&ChessMove::simple(sq("h1"), sq("a1"))));
    }

    #[test]
    fn queen_is_applicable_bishop_is_not() {
        let position = Position::standard();
        assert!(FileAndRankMoveRule.is_applicable(&position, sq("d8")));
        assert!(!FileAndRankMoveRule.is_applicable(&position, sq("c8")));
    }
}
