//! Move application.
//!
//! Produces the successor position for a move with full bookkeeping: half-move
//! clock, castling-right revocation, en-passant set and consume, promotion,
//! full-move counter and side to move. No legality checks are performed.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::game_state::position_builder::PositionBuilder;
use crate::moves::en_passant_moves::en_passant_victim_square;
use crate::moves::move_descriptions::{CastlingMove, ChessMove, SimpleMove};

/// Apply `mv` to `position`.
///
/// `promotion` replaces a pawn landing on its last rank; it is ignored for
/// every other move.
pub fn apply_move(
    position: &Position,
    mv: &ChessMove,
    promotion: Option<PieceType>,
) -> Result<Position, ChessErrors> {
    let mut builder = position.to_builder();

    let mover = match mv {
        ChessMove::Simple(simple) => apply_simple_move(&mut builder, position, simple, promotion)?,
        ChessMove::Castling(castling) => {
            apply_castling_move(&mut builder, castling);
            castling.color
        }
    };

    if mover == PieceColor::Black {
        builder.increment_full_moves();
    }
    builder.switch_color();

    Ok(builder.build())
}

/// Whether applying `mv` captures a piece, en passant included.
pub fn is_capture(position: &Position, mv: &ChessMove) -> bool {
    match mv {
        ChessMove::Simple(simple) => {
            position.piece_at(simple.to).is_some() || is_en_passant_capture(position, simple)
        }
        ChessMove::Castling(_) => false,
    }
}

/// Whether `mv` is a pawn landing on the current en-passant target.
pub fn is_en_passant_capture(position: &Position, mv: &SimpleMove) -> bool {
    let Some(target) = position.en_passant_target() else {
        return false;
    };
    mv.to == target
        && mv.from.file() != mv.to.file()
        && position.piece_at(mv.to).is_none()
        && matches!(position.piece_at(mv.from), Some(piece) if piece.piece_type == PieceType::Pawn)
}

fn apply_simple_move(
    builder: &mut PositionBuilder,
    position: &Position,
    mv: &SimpleMove,
    promotion: Option<PieceType>,
) -> Result<PieceColor, ChessErrors> {
    let piece = position
        .piece_at(mv.from)
        .ok_or(ChessErrors::NoPieceOnSquare(mv.from))?;
    let captured = position.piece_at(mv.to);
    let en_passant = is_en_passant_capture(position, mv);

    if piece.piece_type == PieceType::Pawn || captured.is_some() || en_passant {
        builder.reset_half_moves();
    } else {
        builder.increment_half_moves();
    }

    revoke_castling_rights(builder, piece, mv.from);
    if let Some(victim) = captured {
        revoke_castling_rights(builder, victim, mv.to);
    }

    if en_passant {
        builder.remove_piece(en_passant_victim_square(mv.from, mv.to));
    }

    builder.with_en_passant_target(double_step_target(piece, mv));
    builder.move_piece(mv.from, mv.to);

    if let Some(promoted) = promotion {
        if piece.piece_type == PieceType::Pawn && mv.to.rank() == piece.color.promotion_rank() {
            builder.set_square(mv.to, Piece::new(promoted, piece.color));
        }
    }

    Ok(piece.color)
}

fn apply_castling_move(builder: &mut PositionBuilder, mv: &CastlingMove) {
    builder
        .move_piece(mv.king_from(), mv.king_to())
        .move_piece(mv.rook_from(), mv.rook_to())
        .revoke_castling_rights(mv.color)
        .with_en_passant_target(None)
        .increment_half_moves();
}

/// A king or rook leaving (or being captured on) its home square loses the
/// matching rights for good.
fn revoke_castling_rights(builder: &mut PositionBuilder, piece: Piece, square: SquareName) {
    match piece.piece_type {
        PieceType::King => {
            builder.revoke_castling_rights(piece.color);
        }
        PieceType::Rook => {
            for side in CastlingSide::ALL {
                if square == SquareName::new(side.rook_file(), piece.color.home_rank()) {
                    builder.revoke_castling_right(piece.color, side);
                }
            }
        }
        _ => {}
    }
}

/// Square passed over by a two-square pawn advance.
fn double_step_target(piece: Piece, mv: &SimpleMove) -> Option<SquareName> {
    if piece.piece_type != PieceType::Pawn {
        return None;
    }
    let from_rank = mv.from.rank().index() as i8;
    let to_rank = mv.to.rank().index() as i8;
    if (to_rank - from_rank).abs() != 2 || mv.from.file() != mv.to.file() {
        return None;
    }
    mv.from.offset(0, (to_rank - from_rank) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_generator::generate_fen;
    use crate::utils::fen_parser::parse_fen;

    fn sq(text: &str) -> SquareName {
        text.parse().expect("test square should parse")
    }

    fn apply_fen(fen: &str, mv: ChessMove, promotion: Option<PieceType>) -> String {
        let position = parse_fen(fen).expect("FEN should parse");
        let next = apply_move(&position, &mv, promotion).expect("move should apply");
        generate_fen(&next)
    }

    #[test]
    fn double_step_sets_target_and_counters() {
        let after = apply_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            ChessMove::simple(sq("e2"), sq("e4")),
            None,
        );
        assert_eq!(after, "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");

        let reply = apply_fen(&after, ChessMove::simple(sq("g8"), sq("f6")), None);
        assert_eq!(reply, "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2");
    }

    #[test]
    fn en_passant_removes_the_pawn_beside_the_target() {
        let after = apply_fen(
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
            ChessMove::simple(sq("e5"), sq("d6")),
            None,
        );
        assert_eq!(after, "4k3/8/3P4/8/8/8/8/4K3 b - - 0 2");
    }

    #[test]
    fn castling_moves_king_and_rook() {
        let after = apply_fen(
            "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10",
            ChessMove::castling(PieceColor::Black, CastlingSide::Queenside),
            None,
        );
        assert_eq!(after, "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 4 11");
    }

    #[test]
    fn rook_moves_and_captures_revoke_rights() {
        let rook_moved = apply_fen(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            ChessMove::simple(sq("h1"), sq("h5")),
            None,
        );
        assert_eq!(rook_moved, "r3k2r/8/8/7R/8/8/8/R3K3 b Qkq - 1 1");

        let rook_captured = apply_fen(
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            ChessMove::simple(sq("a1"), sq("a8")),
            None,
        );
        assert_eq!(rook_captured, "R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let after = apply_fen(
            "8/1P2k3/8/8/8/8/8/4K3 w - - 5 40",
            ChessMove::simple(sq("b7"), sq("b8")),
            Some(PieceType::Knight),
        );
        assert_eq!(after, "1N6/4k3/8/8/8/8/8/4K3 b - - 0 40");
    }

    #[test]
    fn empty_source_square_is_an_error() {
        let position = Position::standard();
        assert_eq!(
            apply_move(&position, &ChessMove::simple(sq("e4"), sq("e5")), None),
            Err(ChessErrors::NoPieceOnSquare(sq("e4")))
        );
    }
}
