//! Standard Algebraic Notation codec.
//!
//! Grammar: optional piece letter (`K Q R B N`, absent for pawns), optional
//! source file and/or rank, optional `x`, destination square, optional
//! `=<piece>` promotion and optional `+`/`#`. Castling is `O-O` / `O-O-O`
//! (`0-0` / `0-0-0` are accepted too).
//!
//! Parsing is purely textual. [`resolve_san`] matches a parsed move against
//! the legal moves of a position, and [`move_to_san`] writes a legal move with
//! minimal disambiguation.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::chess_errors::ChessErrors;
use crate::game::game_rules::{calculate_state, GameState};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{apply_move, is_capture};
use crate::move_generation::legal_move_checks::is_promotion_move;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::ChessMove;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SanCheck {
    Check,
    Checkmate,
}

/// A non-castling SAN move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SanMove {
    pub piece_type: PieceType,
    pub from_file: Option<SquareFile>,
    pub from_rank: Option<SquareRank>,
    pub capture: bool,
    pub to: SquareName,
    pub promotion: Option<PieceType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SanAction {
    Castle(CastlingSide),
    Move(SanMove),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct San {
    pub action: SanAction,
    pub check: Option<SanCheck>,
}

impl FromStr for San {
    type Err = ChessErrors;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessErrors::InvalidSanString(text.to_owned());

        let (body, check) = if let Some(body) = text.strip_suffix('#') {
            (body, Some(SanCheck::Checkmate))
        } else if let Some(body) = text.strip_suffix('+') {
            (body, Some(SanCheck::Check))
        } else {
            (text, None)
        };

        let castle = match body {
            "O-O" | "0-0" => Some(CastlingSide::Kingside),
            "O-O-O" | "0-0-0" => Some(CastlingSide::Queenside),
            _ => None,
        };
        if let Some(side) = castle {
            return Ok(San {
                action: SanAction::Castle(side),
                check,
            });
        }

        if !body.is_ascii() || body.len() < 2 {
            return Err(invalid());
        }

        let (body, promotion) = match body.split_once('=') {
            Some((head, letter)) => {
                let mut chars = letter.chars();
                let (Some(ch), None) = (chars.next(), chars.next()) else {
                    return Err(invalid());
                };
                let piece_type = PieceType::from_san_letter(ch)
                    .filter(|piece| piece.is_promotion_target())
                    .ok_or_else(invalid)?;
                (head, Some(piece_type))
            }
            None => (body, None),
        };

        if body.len() < 2 {
            return Err(invalid());
        }
        let (prefix, destination) = body.split_at(body.len() - 2);
        let to = algebraic_to_square(destination).map_err(|_| invalid())?;

        let mut chars = prefix.chars().peekable();
        let piece_type = match chars.peek().copied().and_then(PieceType::from_san_letter) {
            Some(piece_type) => {
                chars.next();
                piece_type
            }
            None => PieceType::Pawn,
        };
        let from_file = chars
            .next_if(|ch| SquareFile::from_char(*ch).is_some())
            .and_then(SquareFile::from_char);
        let from_rank = chars
            .next_if(|ch| SquareRank::from_char(*ch).is_some())
            .and_then(SquareRank::from_char);
        let capture = chars.next_if_eq(&'x').is_some();

        if chars.next().is_some() || (promotion.is_some() && piece_type != PieceType::Pawn) {
            return Err(invalid());
        }

        Ok(San {
            action: SanAction::Move(SanMove {
                piece_type,
                from_file,
                from_rank,
                capture,
                to,
                promotion,
            }),
            check,
        })
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            SanAction::Castle(CastlingSide::Kingside) => write!(f, "O-O")?,
            SanAction::Castle(CastlingSide::Queenside) => write!(f, "O-O-O")?,
            SanAction::Move(mv) => {
                if let Some(letter) = mv.piece_type.san_letter() {
                    write!(f, "{letter}")?;
                }
                if let Some(file) = mv.from_file {
                    write!(f, "{file}")?;
                }
                if let Some(rank) = mv.from_rank {
                    write!(f, "{rank}")?;
                }
                if mv.capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", mv.to)?;
                if let Some(letter) = mv.promotion.and_then(PieceType::san_letter) {
                    write!(f, "={letter}")?;
                }
            }
        }

        match self.check {
            Some(SanCheck::Check) => write!(f, "+"),
            Some(SanCheck::Checkmate) => write!(f, "#"),
            None => Ok(()),
        }
    }
}

/// Match `san` against the legal moves of `position`.
///
/// Candidates landing on the destination are narrowed by piece type, then by
/// source file, then by source rank. Exactly one must remain. Castling is
/// returned as-is; its legality is checked when it is played.
pub fn resolve_san(
    position: &Position,
    san: &San,
) -> Result<(ChessMove, Option<PieceType>), ChessErrors> {
    let mv = match &san.action {
        SanAction::Castle(side) => {
            return Ok((ChessMove::castling(position.player_to_move(), *side), None));
        }
        SanAction::Move(mv) => mv,
    };

    let mut candidates: Vec<ChessMove> = legal_moves(position)?
        .into_iter()
        .filter(|candidate| !candidate.is_castling() && candidate.to() == mv.to)
        .collect();
    trace!(san = %san, remaining = candidates.len(), "matched destination");

    candidates.retain(|candidate| {
        matches!(position.piece_at(candidate.from()), Some(piece) if piece.piece_type == mv.piece_type)
    });
    trace!(san = %san, remaining = candidates.len(), "narrowed by piece type");

    if let Some(file) = mv.from_file {
        candidates.retain(|candidate| candidate.from().file() == file);
        trace!(san = %san, remaining = candidates.len(), "narrowed by file");
    }
    if let Some(rank) = mv.from_rank {
        candidates.retain(|candidate| candidate.from().rank() == rank);
        trace!(san = %san, remaining = candidates.len(), "narrowed by rank");
    }

    match candidates.as_slice() {
        [single] => Ok((*single, mv.promotion)),
        [] => Err(ChessErrors::NoMatchingSanMove(san.to_string())),
        _ => Err(ChessErrors::AmbiguousSan(san.to_string())),
    }
}

/// Write a legal move of `position` in SAN.
pub fn move_to_san(
    position: &Position,
    mv: &ChessMove,
    promotion: Option<PieceType>,
) -> Result<San, ChessErrors> {
    let after = apply_move(position, mv, promotion)?;
    let check = match calculate_state(&after)? {
        GameState::Check => Some(SanCheck::Check),
        GameState::Checkmate => Some(SanCheck::Checkmate),
        GameState::PlayerToMove | GameState::Stalemate => None,
    };

    let simple = match mv {
        ChessMove::Castling(castling) => {
            return Ok(San {
                action: SanAction::Castle(castling.side),
                check,
            });
        }
        ChessMove::Simple(simple) => simple,
    };

    let piece = position
        .piece_at(simple.from)
        .ok_or(ChessErrors::NoPieceOnSquare(simple.from))?;
    let capture = is_capture(position, mv);

    let (from_file, from_rank) = if piece.piece_type == PieceType::Pawn {
        (capture.then_some(simple.from.file()), None)
    } else {
        disambiguation(position, simple.from, simple.to, piece)?
    };

    let promotion = if is_promotion_move(position, mv) {
        promotion
    } else {
        None
    };

    Ok(San {
        action: SanAction::Move(SanMove {
            piece_type: piece.piece_type,
            from_file,
            from_rank,
            capture,
            to: simple.to,
            promotion,
        }),
        check,
    })
}

/// Minimal source qualifiers: file if unique among rivals, else rank, else
/// both.
fn disambiguation(
    position: &Position,
    from: SquareName,
    to: SquareName,
    piece: Piece,
) -> Result<(Option<SquareFile>, Option<SquareRank>), ChessErrors> {
    let rivals: Vec<SquareName> = legal_moves(position)?
        .into_iter()
        .filter(|candidate| !candidate.is_castling() && candidate.to() == to && candidate.from() != from)
        .map(|candidate| candidate.from())
        .filter(|square| position.piece_at(*square) == Some(piece))
        .collect();

    if rivals.is_empty() {
        Ok((None, None))
    } else if rivals.iter().all(|square| square.file() != from.file()) {
        Ok((Some(from.file()), None))
    } else if rivals.iter().all(|square| square.rank() != from.rank()) {
        Ok((None, Some(from.rank())))
    } else {
        Ok((Some(from.file()), Some(from.rank())))
    }
}
