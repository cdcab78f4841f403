//! Full legal move generation pipeline.
//!
//! Gathers raw rule candidates per square, applies each one speculatively and
//! keeps it only when the mover's king is unattacked in the resulting
//! position. Castling is instead checked against the current attack map (king
//! start, transit and landing squares must all be safe).

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::attack_map::AttackMap;
use crate::move_generation::legal_move_apply::{apply_move, is_capture, is_en_passant_capture};
use crate::move_generation::legal_move_checks::{can_castle, is_king_attacked, is_promotion_move};
use crate::moves::move_descriptions::ChessMove;
use crate::moves::move_rule::candidate_moves;

/// Pieces offered for every promoting pawn move.
pub const PROMOTION_PIECES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// A legal move together with the position it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMove {
    pub chess_move: ChessMove,
    pub promotion: Option<PieceType>,
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub position_after: Position,
}

pub trait MoveGenerator: Send + Sync {
    /// Every legal move for the side to move, promotions expanded per piece.
    fn generate_legal_moves(&self, position: &Position) -> Result<Vec<GeneratedMove>, ChessErrors>;
}

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position) -> Result<Vec<GeneratedMove>, ChessErrors> {
        let attack_map = AttackMap::compute(position);
        let mover = position.player_to_move();
        let mut out = Vec::new();

        for (square, _) in position.pieces(mover) {
            for chess_move in legal_moves_with_map(position, square, &attack_map)? {
                let promotions: Vec<Option<PieceType>> = if is_promotion_move(position, &chess_move) {
                    PROMOTION_PIECES.into_iter().map(Some).collect()
                } else {
                    vec![None]
                };

                let en_passant = match &chess_move {
                    ChessMove::Simple(simple) => is_en_passant_capture(position, simple),
                    ChessMove::Castling(_) => false,
                };

                for promotion in promotions {
                    out.push(GeneratedMove {
                        chess_move,
                        promotion,
                        is_capture: is_capture(position, &chess_move),
                        is_en_passant: en_passant,
                        position_after: apply_move(position, &chess_move, promotion)?,
                    });
                }
            }
        }

        Ok(out)
    }
}

/// Legal moves for the piece on `square`, whichever color it is.
///
/// Empty squares yield no moves. Promotions are reported once per move.
pub fn legal_moves_from(position: &Position, square: SquareName) -> Result<Vec<ChessMove>, ChessErrors> {
    if position.piece_at(square).is_none() {
        return Ok(Vec::new());
    }
    let attack_map = AttackMap::compute(position);
    legal_moves_with_map(position, square, &attack_map)
}

/// Legal moves for every piece of the side to move.
pub fn legal_moves(position: &Position) -> Result<Vec<ChessMove>, ChessErrors> {
    let attack_map = AttackMap::compute(position);
    let mut out = Vec::new();
    for (square, _) in position.pieces(position.player_to_move()) {
        out.extend(legal_moves_with_map(position, square, &attack_map)?);
    }
    Ok(out)
}

/// Whether `color` has at least one legal move.
pub fn has_legal_move(position: &Position, color: PieceColor) -> Result<bool, ChessErrors> {
    let attack_map = AttackMap::compute(position);
    for (square, _) in position.pieces(color) {
        if !legal_moves_with_map(position, square, &attack_map)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Whether `mv` keeps the mover's king safe.
pub fn is_legal_move(
    position: &Position,
    mv: &ChessMove,
    attack_map: &AttackMap,
) -> Result<bool, ChessErrors> {
    match mv {
        ChessMove::Castling(castling) => Ok(can_castle(position, castling, attack_map)),
        ChessMove::Simple(simple) => {
            let mover = position
                .piece_at(simple.from)
                .ok_or(ChessErrors::NoPieceOnSquare(simple.from))?;
            let next = apply_move(position, mv, None)?;
            Ok(!is_king_attacked(&next, mover.color)?)
        }
    }
}

fn legal_moves_with_map(
    position: &Position,
    square: SquareName,
    attack_map: &AttackMap,
) -> Result<Vec<ChessMove>, ChessErrors> {
    let mut legal = Vec::new();
    for mv in candidate_moves(position, square) {
        if is_legal_move(position, &mv, attack_map)? {
            legal.push(mv);
        }
    }
    Ok(legal)
}
