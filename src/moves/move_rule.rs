//! The per-piece movement rule seam.
//!
//! Each rule is a stateless unit struct queried per square. Rules ignore
//! check safety; the legality filter in
//! [`legal_move_generator`](crate::move_generation::legal_move_generator)
//! removes moves that would leave the mover's king attacked.
//!
//! Two outputs are produced per square:
//! - `candidate_moves`: destinations the piece may move to, before king safety.
//! - `targets`: squares the piece attacks. Sliders include the first blocker of
//!   either color, pawns only their two capture diagonals, and castling or
//!   en-passant landings are never targets.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::diagonal_moves::DiagonalMoveRule;
use crate::moves::en_passant_moves::EnPassantMoveRule;
use crate::moves::file_and_rank_moves::FileAndRankMoveRule;
use crate::moves::king_moves::KingMoveRule;
use crate::moves::knight_moves::KnightMoveRule;
use crate::moves::move_descriptions::ChessMove;
use crate::moves::pawn_moves::PawnMoveRule;

pub trait MoveRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this rule governs the piece standing on `square`.
    fn is_applicable(&self, position: &Position, square: SquareName) -> bool;

    fn candidate_moves(&self, position: &Position, square: SquareName) -> Vec<ChessMove>;

    fn targets(&self, position: &Position, square: SquareName) -> Vec<SquareName>;
}

/// Every rule of the game, in the order candidates are reported.
pub static MOVE_RULES: [&dyn MoveRule; 6] = [
    &PawnMoveRule,
    &EnPassantMoveRule,
    &KnightMoveRule,
    &DiagonalMoveRule,
    &FileAndRankMoveRule,
    &KingMoveRule,
];

/// Rules applicable to the piece on `square`.
pub fn applicable_rules(
    position: &Position,
    square: SquareName,
) -> impl Iterator<Item = &'static dyn MoveRule> + '_ {
    MOVE_RULES
        .iter()
        .copied()
        .filter(move |rule| rule.is_applicable(position, square))
}

/// Raw candidates for the piece on `square`, ignoring king safety.
pub fn candidate_moves(position: &Position, square: SquareName) -> Vec<ChessMove> {
    applicable_rules(position, square)
        .flat_map(|rule| rule.candidate_moves(position, square))
        .collect()
}

/// Whether the piece on `square` has type `piece_type` (any color).
#[inline]
pub(crate) fn holds_piece_type(position: &Position, square: SquareName, piece_type: PieceType) -> bool {
    matches!(position.piece_at(square), Some(piece) if piece.piece_type == piece_type)
}

/// Walk from `from` one step at a time in each direction.
///
/// With `include_friendly_blocker` the first occupied square is always
/// included (attack semantics). Otherwise it is included only when it holds
/// an opponent piece (move semantics).
pub(crate) fn slide(
    position: &Position,
    from: SquareName,
    directions: &[(i8, i8)],
    include_friendly_blocker: bool,
) -> Vec<SquareName> {
    let Some(mover) = position.piece_at(from) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for &(d_file, d_rank) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(d_file, d_rank) {
            match position.piece_at(next) {
                None => out.push(next),
                Some(blocker) => {
                    if include_friendly_blocker || blocker.is_opponent(mover.color) {
                        out.push(next);
                    }
                    break;
                }
            }
            cursor = next;
        }
    }
    out
}

/// Destinations from `from` at fixed offsets that are on the board.
pub(crate) fn step_targets(from: SquareName, offsets: &[(i8, i8)]) -> Vec<SquareName> {
    offsets
        .iter()
        .filter_map(|&(d_file, d_rank)| from.offset(d_file, d_rank))
        .collect()
}

/// Step destinations that are empty or hold an opponent piece.
pub(crate) fn step_moves(position: &Position, from: SquareName, offsets: &[(i8, i8)]) -> Vec<ChessMove> {
    let Some(mover) = position.piece_at(from) else {
        return Vec::new();
    };

    step_targets(from, offsets)
        .into_iter()
        .filter(|to| match position.piece_at(*to) {
            None => true,
            Some(occupant) => occupant.is_opponent(mover.color),
        })
        .map(|to| ChessMove::simple(from, to))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> SquareName {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn queen_uses_both_sliding_rules() {
        let position = Position::standard();
        let names: Vec<&str> = applicable_rules(&position, sq("d1"))
            .map(|rule| rule.name())
            .collect();
        assert_eq!(names, vec!["diagonal", "file_and_rank"]);
        assert!(candidate_moves(&position, sq("d1")).is_empty());
    }

    #[test]
    fn empty_square_has_no_rules() {
        let position = Position::standard();
        assert_eq!(applicable_rules(&position, sq("e4")).count(), 0);
        assert!(candidate_moves(&position, sq("e4")).is_empty());
    }

    #[test]
    fn slide_stops_at_blockers() {
        let position = parse_fen("4k3/8/8/8/1p6/8/3P4/R3K3 w - - 0 1").expect("FEN should parse");
        let moves = slide(&position, sq("a1"), &[(0, 1), (1, 0)], false);
        assert_eq!(
            moves,
            vec![
                sq("a2"),
                sq("a3"),
                sq("a4"),
                sq("a5"),
                sq("a6"),
                sq("a7"),
                sq("a8"),
                sq("b1"),
                sq("c1"),
                sq("d1")
            ]
        );

        let targets = slide(&position, sq("a1"), &[(1, 0)], true);
        assert_eq!(targets, vec![sq("b1"), sq("c1"), sq("d1"), sq("e1")]);
    }
}
