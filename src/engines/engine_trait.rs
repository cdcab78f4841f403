//! Move-suggestion abstraction.
//!
//! Engines read a position and propose one legal move for the side to move.
//! They never mutate a game; callers play the suggestion through
//! [`ChessGame`](crate::game::chess_game::ChessGame).

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::PieceType;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::ChessMove;

/// A suggested move and, for a promoting pawn move, the piece to promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMove {
    pub chess_move: ChessMove,
    pub promotion: Option<PieceType>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// `None` when the side to move has no legal move.
    fn choose_move(&mut self, position: &Position) -> Result<Option<EngineMove>, ChessErrors>;
}
