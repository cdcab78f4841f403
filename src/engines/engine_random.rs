//! Random-move engine.
//!
//! Selects uniformly from the legal moves of the side to move and always
//! promotes to a queen. Used for diagnostics and integration testing.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{Engine, EngineMove};
use crate::game_state::chess_types::PieceType;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_promotion_move;
use crate::move_generation::legal_move_generator::legal_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Engine whose choices are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, position: &Position) -> Result<Option<EngineMove>, ChessErrors> {
        let moves = legal_moves(position)?;

        Ok(moves.as_slice().choose(&mut self.rng).map(|chess_move| {
            let promotion = is_promotion_move(position, chess_move).then_some(PieceType::Queen);
            EngineMove {
                chess_move: *chess_move,
                promotion,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::chess_game::ChessGame;
    use crate::game::game_rules::MoveResult;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn picks_a_legal_move() {
        let position = Position::standard();
        let mut engine = RandomEngine::with_seed(7);
        let picked = engine
            .choose_move(&position)
            .expect("engine should run")
            .expect("start position has moves");
        assert!(legal_moves(&position)
            .expect("moves should generate")
            .contains(&picked.chess_move));
        assert_eq!(picked.promotion, None);
    }

    #[test]
    fn same_seed_same_choices() {
        let position = Position::standard();
        let mut a = RandomEngine::with_seed(42);
        let mut b = RandomEngine::with_seed(42);
        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&position).expect("engine should run"),
                b.choose_move(&position).expect("engine should run")
            );
        }
    }

    #[test]
    fn no_move_when_mated() {
        let mated = parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        assert_eq!(RandomEngine::with_seed(1).choose_move(&mated), Ok(None));
    }

    #[test]
    fn promotes_to_queen() {
        let position = parse_fen("8/P3k3/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let mut engine = RandomEngine::with_seed(3);
        for _ in 0..20 {
            let picked = engine
                .choose_move(&position)
                .expect("engine should run")
                .expect("position has moves");
            if picked.chess_move.from().to_string() == "a7" {
                assert_eq!(picked.promotion, Some(PieceType::Queen));
            } else {
                assert_eq!(picked.promotion, None);
            }
        }
    }

    #[test]
    fn self_play_stays_legal() {
        let mut game = ChessGame::new();
        let mut engine = RandomEngine::with_seed(2024);

        for _ in 0..60 {
            let Some(picked) = engine
                .choose_move(game.current_position())
                .expect("engine should run")
            else {
                break;
            };
            let result = game
                .move_piece(picked.chess_move.from(), picked.chess_move.to(), picked.promotion)
                .expect("move should apply");
            assert_eq!(result, MoveResult::ValidMove, "{}", picked.chess_move);
            if game.game_state().is_terminal() {
                break;
            }
        }

        assert!(!game.history().is_empty());
    }
}
