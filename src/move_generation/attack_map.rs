//! Per-color attack tallies.
//!
//! For every square, counts how many pieces of each color target it. The map
//! is rebuilt from scratch for every position it is asked about; there is no
//! incremental maintenance.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_rule::applicable_rules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackMap {
    counts: [[u8; 64]; 2],
}

impl AttackMap {
    pub fn compute(position: &Position) -> Self {
        let mut counts = [[0u8; 64]; 2];

        for square in position.squares() {
            let Some(piece) = square.piece() else {
                continue;
            };

            for rule in applicable_rules(position, square.name()) {
                for target in rule.targets(position, square.name()) {
                    let slot = &mut counts[piece.color.index()][target.index()];
                    *slot = slot.saturating_add(1);
                }
            }
        }

        Self { counts }
    }

    /// Number of `by`-colored pieces targeting `square`.
    #[inline]
    pub fn attack_count(&self, by: PieceColor, square: SquareName) -> u8 {
        self.counts[by.index()][square.index()]
    }

    #[inline]
    pub fn is_attacked(&self, by: PieceColor, square: SquareName) -> bool {
        self.attack_count(by, square) > 0
    }

    /// Every square `by` attacks at least once.
    pub fn attacked_squares(&self, by: PieceColor) -> Vec<SquareName> {
        SquareName::all()
            .filter(|square| self.is_attacked(by, *square))
            .collect()
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
    fn standard_position_tallies() {
        let map = AttackMap::compute(&Position::standard());

        // d3 is hit by c2 and e2 pawns only.
        assert_eq!(map.attack_count(PieceColor::White, sq("d3")), 2);
        // f3 by e2, g2 pawns and the g1 knight.
        assert_eq!(map.attack_count(PieceColor::White, sq("f3")), 3);
        assert!(!map.is_attacked(PieceColor::White, sq("e4")));
        assert!(map.is_attacked(PieceColor::Black, sq("f6")));
        assert_eq!(map.attacked_squares(PieceColor::White).len(), 22);
    }

    #[test]
    fn sliders_count_defended_pieces_but_not_xray() {
        let position = parse_fen("4k3/8/8/8/8/8/R7/R3K3 w - - 0 1").expect("FEN should parse");
        let map = AttackMap::compute(&position);

        // a1 rook defends a2, but is blocked from a3.
        assert_eq!(map.attack_count(PieceColor::White, sq("a2")), 1);
        assert_eq!(map.attack_count(PieceColor::White, sq("a3")), 1);
        assert!(map.is_attacked(PieceColor::White, sq("a8")));
    }

    #[test]
    fn pawn_pushes_are_not_attacks() {
        let position = parse_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let map = AttackMap::compute(&position);
        assert!(!map.is_attacked(PieceColor::White, sq("e3")));
        assert!(map.is_attacked(PieceColor::White, sq("d3")));
        assert!(map.is_attacked(PieceColor::White, sq("f3")));
    }
}
