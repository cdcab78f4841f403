//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by parsing utilities,
//! position inspection and move application. Rule outcomes (an illegal move,
//! a finished game, a missing promotion piece) are *not* errors: they are
//! reported as [`MoveResult`](crate::game::game_rules::MoveResult) values.
//!
//! Usage guidelines:
//! - Text-parsing variants (`InvalidAlgebraicString`, `InvalidFenString`,
//!   `InvalidSanString`, `AmbiguousSan`, `NoMatchingSanMove`) are caller input
//!   errors and are suitable for presenting to end users.
//! - `KingNotFound` and `IllegalPosition` indicate a corrupted or unsupported
//!   position. A running `ChessGame` only produces them through a bug, so
//!   callers should treat them as fatal.

use thiserror::Error;

use crate::game_state::chess_types::{PieceColor, SquareName};

/// Unified error type for the rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A square name could not be parsed from text such as `"e4"`.
    ///
    /// Payload: the offending text.
    #[error("invalid algebraic square: {0:?}")]
    InvalidAlgebraicString(String),

    /// A FEN string did not match the six-field grammar.
    #[error("invalid FEN string {fen:?}: {reason}")]
    InvalidFenString { fen: String, reason: String },

    /// A SAN string did not match the move grammar.
    #[error("invalid SAN string: {0:?}")]
    InvalidSanString(String),

    /// A SAN string matched more than one legal move.
    #[error("ambiguous SAN move: {0:?}")]
    AmbiguousSan(String),

    /// A SAN string matched none of the legal moves.
    #[error("no legal move matches SAN: {0:?}")]
    NoMatchingSanMove(String),

    /// The position holds no king for the given color.
    ///
    /// This represents a corrupted position and is not recoverable.
    #[error("no {0} king on the board")]
    KingNotFound(PieceColor),

    /// The position cannot be played from (for example the side that just
    /// moved is still in check).
    #[error("illegal position: {0}")]
    IllegalPosition(String),

    /// A move was applied from an empty square.
    #[error("no piece on square {0}")]
    NoPieceOnSquare(SquareName),
}
