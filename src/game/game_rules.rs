//! Game-state derivation and move classification.
//!
//! Rule outcomes are values, not errors: every proposed move is classified as
//! a [`MoveResult`]. `Err` is reserved for corrupted positions.

use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{is_in_check, is_king_attacked, is_promotion_move};
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves_from};
use crate::moves::move_descriptions::{CastlingMove, ChessMove};
use crate::moves::move_rule::candidate_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    PlayerToMove,
    Check,
    Checkmate,
    Stalemate,
}

impl GameState {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameState::Checkmate | GameState::Stalemate)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameState::PlayerToMove => "player to move",
            GameState::Check => "check",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResult {
    ValidMove,
    GameOver,
    PieceWrongColor,
    MustMoveOutOfCheck,
    NotALegalMove,
    RequiresPromotion,
    CastlingNotAllowed,
    NotAValidPromotion,
}

/// Derive the state of the side to move.
pub fn calculate_state(position: &Position) -> Result<GameState, ChessErrors> {
    let in_check = is_in_check(position)?;
    let can_move = has_legal_move(position, position.player_to_move())?;

    Ok(match (in_check, can_move) {
        (true, true) => GameState::Check,
        (true, false) => GameState::Checkmate,
        (false, false) => GameState::Stalemate,
        (false, true) => GameState::PlayerToMove,
    })
}

/// Classify moving the piece on `from` to `to`.
///
/// Checks run in a fixed order: ownership, game over, check evasion,
/// legality, promotion piece validity, missing promotion piece.
pub fn is_valid_move(
    position: &Position,
    state: GameState,
    from: SquareName,
    to: SquareName,
    promotion: Option<PieceType>,
) -> Result<MoveResult, ChessErrors> {
    classify_move(position, state, from, to, promotion).map(|(result, _)| result)
}

/// Like [`is_valid_move`], also returning the matched legal move whenever
/// the attempt got past the legality check.
pub fn classify_move(
    position: &Position,
    state: GameState,
    from: SquareName,
    to: SquareName,
    promotion: Option<PieceType>,
) -> Result<(MoveResult, Option<ChessMove>), ChessErrors> {
    let mover = position.player_to_move();
    match position.piece_at(from) {
        Some(piece) if piece.color == mover => {}
        _ => return Ok((MoveResult::PieceWrongColor, None)),
    }

    if state.is_terminal() {
        return Ok((MoveResult::GameOver, None));
    }

    // Landing on a friendly piece is never a move; applying it would
    // overwrite the piece, possibly the king.
    if position.get_square(to).holds_color(mover) {
        return Ok((MoveResult::NotALegalMove, None));
    }

    if state == GameState::Check {
        let attempted = candidate_moves(position, from)
            .into_iter()
            .find(|mv| mv.to() == to)
            .unwrap_or_else(|| ChessMove::simple(from, to));
        let speculative = apply_move(position, &attempted, None)?;
        if is_king_attacked(&speculative, mover)? {
            return Ok((MoveResult::MustMoveOutOfCheck, None));
        }
    }

    let Some(chess_move) = find_legal_move(position, from, to)? else {
        return Ok((MoveResult::NotALegalMove, None));
    };

    let promotes = is_promotion_move(position, &chess_move);
    let result = match promotion {
        Some(piece_type) if !promotes || !piece_type.is_promotion_target() => {
            MoveResult::NotAValidPromotion
        }
        None if promotes => MoveResult::RequiresPromotion,
        _ => MoveResult::ValidMove,
    };
    Ok((result, Some(chess_move)))
}

/// Classify castling to `side` for the side to move.
pub fn is_valid_castle(
    position: &Position,
    state: GameState,
    side: CastlingSide,
) -> Result<MoveResult, ChessErrors> {
    if state.is_terminal() {
        return Ok(MoveResult::GameOver);
    }

    let castling = ChessMove::Castling(CastlingMove::new(position.player_to_move(), side));
    let legal = legal_moves_from(position, castling.from())?;
    if legal.contains(&castling) {
        Ok(MoveResult::ValidMove)
    } else {
        Ok(MoveResult::CastlingNotAllowed)
    }
}

/// The legal move from `from` landing on `to`, if any.
///
/// For castling, `to` is the king's landing square.
pub fn find_legal_move(
    position: &Position,
    from: SquareName,
    to: SquareName,
) -> Result<Option<ChessMove>, ChessErrors> {
    Ok(legal_moves_from(position, from)?
        .into_iter()
        .find(|mv| mv.from() == from && mv.to() == to))
}
