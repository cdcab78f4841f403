use crate::chess_errors::ChessErrors;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{
    has_legal_move, GeneratedMove, LegalMoveGenerator, MoveGenerator,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaf nodes `depth` plies below `position` with the legal generator.
pub fn perft(position: &Position, depth: u8) -> Result<PerftCounts, ChessErrors> {
    perft_with(&LegalMoveGenerator, position, depth)
}

pub fn perft_with<G: MoveGenerator>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> Result<PerftCounts, ChessErrors> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(position)? {
        total.merge(perft_recurse(generator, &mv, depth, 1)?);
    }
    Ok(total)
}

/// Per-root-move node counts, for comparing against other move generators.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> Result<Vec<(String, usize)>, ChessErrors> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }

    for mv in generator.generate_legal_moves(position)? {
        let counts = perft_recurse(generator, &mv, depth, 1)?;
        let label = match mv.promotion.and_then(|piece| piece.san_letter()) {
            Some(letter) => format!("{}{}", mv.chess_move, letter.to_ascii_lowercase()),
            None => mv.chess_move.to_string(),
        };
        out.push((label, counts.nodes));
    }
    Ok(out)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
) -> Result<PerftCounts, ChessErrors> {
    if current_depth == search_depth {
        let mut counts = PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };

        if mv.is_capture {
            counts.captures += 1;
        }
        if mv.is_en_passant {
            counts.en_passant += 1;
        }
        if mv.chess_move.is_castling() {
            counts.castles += 1;
        }
        if mv.promotion.is_some() {
            counts.promotions += 1;
        }

        let after = &mv.position_after;
        if is_in_check(after)? {
            counts.checks += 1;
            if !has_legal_move(after, after.player_to_move())? {
                counts.checkmates += 1;
            }
        }

        return Ok(counts);
    }

    let mut total = PerftCounts::default();
    for child in generator.generate_legal_moves(&mv.position_after)? {
        total.merge(perft_recurse(generator, &child, search_depth, current_depth + 1)?);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    fn run(fen: &str, depth: u8) -> PerftCounts {
        let position = parse_fen(fen).expect("FEN should parse");
        perft(&position, depth).expect("perft should run")
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        assert_eq!(
            perft(&Position::standard(), 0).expect("perft should run"),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_starting_position() {
        let position = Position::standard();
        assert_eq!(perft(&position, 1).expect("perft should run").nodes, 20);
        assert_eq!(perft(&position, 2).expect("perft should run").nodes, 400);

        let depth_three = perft(&position, 3).expect("perft should run");
        assert_eq!(
            depth_three,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn perft_kiwipete() {
        let depth_one = run(KIWIPETE_FEN, 1);
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);

        let depth_two = run(KIWIPETE_FEN, 2);
        assert_eq!(depth_two.nodes, 2039);
        assert_eq!(depth_two.captures, 351);
        assert_eq!(depth_two.en_passant, 1);
        assert_eq!(depth_two.castles, 91);
        assert_eq!(depth_two.checks, 3);
    }

    #[test]
    fn perft_position_three() {
        assert_eq!(run(POSITION_3_FEN, 1).nodes, 14);
        assert_eq!(run(POSITION_3_FEN, 2).nodes, 191);

        let depth_three = run(POSITION_3_FEN, 3);
        assert_eq!(depth_three.nodes, 2812);
        assert_eq!(depth_three.captures, 209);
        assert_eq!(depth_three.en_passant, 2);
        assert_eq!(depth_three.checks, 267);
    }

    #[test]
    fn divide_sums_to_total() {
        let position = Position::standard();
        let divide = perft_divide(&LegalMoveGenerator, &position, 2).expect("divide should run");
        assert_eq!(divide.len(), 20);
        assert!(divide.iter().all(|(_, nodes)| *nodes == 20));
    }
}
