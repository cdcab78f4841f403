use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::move_rule::{holds_piece_type, step_moves, step_targets, MoveRule};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub struct KnightMoveRule;

impl MoveRule for KnightMoveRule {
    fn name(&self) -> &'static str {
        "knight"
    }

    fn is_applicable(&self, position: &Position, square: SquareName) -> bool {
        holds_piece_type(position, square, PieceType::Knight)
    }

    fn candidate_moves(&self, position: &Position, square: SquareName) -> Vec<ChessMove> {
        step_moves(position, square, &KNIGHT_OFFSETS)
    }

    fn targets(&self, _position: &Position, square: SquareName) -> Vec<SquareName> {
        step_targets(square, &KNIGHT_OFFSETS)
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
    fn knight_in_corner_has_two_targets() {
        let position = parse_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").expect("FEN should parse");
        let mut targets = KnightMoveRule.targets(&position, sq("a1"));
        targets.sort();
        assert_eq!(targets, vec![sq("b3"), sq("c2")]);
    }

    #[test]
    fn knight_skips_friendly_squares() {
        let position = Position::standard();
        let mut moves: Vec<SquareName> = KnightMoveRule
            .candidate_moves(&position, sq("g1"))
            .iter()
            .map(|mv| mv.to())
            .collect();
        moves.sort();
        assert_eq!(moves, vec![sq("f3"), sq("h3")]);
    }
}
