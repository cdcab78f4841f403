//! Stateful game session.
//!
//! `ChessGame` owns the current position, its derived [`GameState`] and an
//! append-only history. It changes only through validated `move_piece`,
//! `move_san` and `castle` calls; every call reports a [`MoveResult`].
//!
//! A game is not synchronized. Share one behind a lock, or keep one game per
//! owner.

use tracing::{debug, trace};

use crate::chess_errors::ChessErrors;
use crate::game::game_rules::{
    calculate_state, classify_move, is_valid_castle, GameState, MoveResult,
};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::game_state::zobrist::zobrist_hash;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::move_generation::legal_move_generator::{legal_moves, legal_moves_from};
use crate::moves::move_descriptions::ChessMove;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::san::{resolve_san, San, SanAction};

/// One applied half-move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameHistoryEntry {
    /// Position after the move.
    pub position: Position,
    pub applied_move: ChessMove,
    pub promotion: Option<PieceType>,
    /// Side to move in `position`.
    pub player_to_move: PieceColor,
}

#[derive(Debug, Clone)]
pub struct ChessGame {
    position: Position,
    state: GameState,
    history: Vec<GameHistoryEntry>,
}

impl ChessGame {
    /// Game from the standard starting layout.
    pub fn new() -> Self {
        Self {
            position: Position::standard(),
            state: GameState::PlayerToMove,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        Self::from_position(parse_fen(fen)?)
    }

    /// Game starting from an arbitrary position.
    ///
    /// Both kings must be present and the side that just moved must not be
    /// left in check.
    pub fn from_position(position: Position) -> Result<Self, ChessErrors> {
        for color in PieceColor::ALL {
            position.king_square(color)?;
        }

        let waiting = position.player_to_move().opposite();
        if is_king_attacked(&position, waiting)? {
            return Err(ChessErrors::IllegalPosition(format!(
                "{waiting} king is in check with {} to move",
                position.player_to_move()
            )));
        }

        let state = calculate_state(&position)?;
        Ok(Self {
            position,
            state,
            history: Vec::new(),
        })
    }

    #[inline]
    pub fn current_position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn game_state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn player_to_move(&self) -> PieceColor {
        self.position.player_to_move()
    }

    #[inline]
    pub fn history(&self) -> &[GameHistoryEntry] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&GameHistoryEntry> {
        self.history.last()
    }

    pub fn fen(&self) -> String {
        generate_fen(&self.position)
    }

    pub fn position_hash(&self) -> u64 {
        zobrist_hash(&self.position)
    }

    /// Legal moves for the piece on `square` (empty when the square is).
    pub fn candidate_moves(&self, square: SquareName) -> Result<Vec<ChessMove>, ChessErrors> {
        legal_moves_from(&self.position, square)
    }

    /// Legal moves for the side to move; none once the game is over.
    pub fn legal_moves(&self) -> Result<Vec<ChessMove>, ChessErrors> {
        if self.state.is_terminal() {
            return Ok(Vec::new());
        }
        legal_moves(&self.position)
    }

    /// Move the piece on `from` to `to`, promoting to `promotion` if the
    /// move takes a pawn to its last rank.
    pub fn move_piece(
        &mut self,
        from: SquareName,
        to: SquareName,
        promotion: Option<PieceType>,
    ) -> Result<MoveResult, ChessErrors> {
        match classify_move(&self.position, self.state, from, to, promotion)? {
            (MoveResult::ValidMove, Some(chess_move)) => self.apply(chess_move, promotion),
            (result, _) => {
                debug!(%from, %to, ?promotion, ?result, "rejected move");
                Ok(result)
            }
        }
    }

    /// Castle to `side` for the side to move.
    pub fn castle(&mut self, side: CastlingSide) -> Result<MoveResult, ChessErrors> {
        let result = is_valid_castle(&self.position, self.state, side)?;
        if result != MoveResult::ValidMove {
            debug!(?side, ?result, "rejected castling");
            return Ok(result);
        }

        let chess_move = ChessMove::castling(self.position.player_to_move(), side);
        self.apply(chess_move, None)
    }

    /// Play a move written in SAN, e.g. `Nf3`, `exd6`, `e8=Q+` or `O-O`.
    ///
    /// Malformed, unmatched or ambiguous text is an error, not a
    /// [`MoveResult`].
    pub fn move_san(&mut self, san: &str) -> Result<MoveResult, ChessErrors> {
        let parsed: San = san.parse()?;
        trace!(san, ?parsed, "parsed SAN");

        match parsed.action {
            SanAction::Castle(side) => self.castle(side),
            SanAction::Move(_) => {
                let (chess_move, promotion) = resolve_san(&self.position, &parsed)?;
                self.move_piece(chess_move.from(), chess_move.to(), promotion)
            }
        }
    }

    fn apply(
        &mut self,
        chess_move: ChessMove,
        promotion: Option<PieceType>,
    ) -> Result<MoveResult, ChessErrors> {
        let next = apply_move(&self.position, &chess_move, promotion)?;
        let state = calculate_state(&next)?;

        self.history.push(GameHistoryEntry {
            position: next.clone(),
            applied_move: chess_move,
            promotion,
            player_to_move: next.player_to_move(),
        });
        self.position = next;
        self.state = state;

        debug!(
            mv = %chess_move,
            ?promotion,
            fen = %self.fen(),
            state = %self.state,
            "applied move"
        );
        Ok(MoveResult::ValidMove)
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}
