//! King-safety queries built on the attack map.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::attack_map::AttackMap;
use crate::moves::move_descriptions::{CastlingMove, ChessMove};

/// Whether `color`'s king stands on a square the opponent attacks.
pub fn is_king_attacked(position: &Position, color: PieceColor) -> Result<bool, ChessErrors> {
    let king_square = position.king_square(color)?;
    Ok(AttackMap::compute(position).is_attacked(color.opposite(), king_square))
}

/// Whether the side to move is in check.
#[inline]
pub fn is_in_check(position: &Position) -> Result<bool, ChessErrors> {
    is_king_attacked(position, position.player_to_move())
}

/// Castling conditions against the current position.
///
/// Requires the right, king and rook on their home squares, every square
/// between them empty, and the king's start, transit and landing squares
/// unattacked by the opponent. Kingside and queenside are checked
/// independently.
pub fn can_castle(position: &Position, castling: &CastlingMove, attack_map: &AttackMap) -> bool {
    let color = castling.color;
    if !position.can_castle(color, castling.side) {
        return false;
    }

    let king = Piece::new(PieceType::King, color);
    let rook = Piece::new(PieceType::Rook, color);
    if position.piece_at(castling.king_from()) != Some(king)
        || position.piece_at(castling.rook_from()) != Some(rook)
    {
        return false;
    }

    if castling
        .squares_between()
        .iter()
        .any(|square| position.piece_at(*square).is_some())
    {
        return false;
    }

    castling
        .king_path()
        .iter()
        .all(|square| !attack_map.is_attacked(color.opposite(), *square))
}

/// Whether `mv` is a pawn move onto its last rank.
pub fn is_promotion_move(position: &Position, mv: &ChessMove) -> bool {
    let ChessMove::Simple(simple) = mv else {
        return false;
    };
    matches!(
        position.piece_at(simple.from),
        Some(piece) if piece.piece_type == PieceType::Pawn && simple.to.rank() == piece.color.promotion_rank()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn castle_allowed(fen: &str, color: PieceColor, side: CastlingSide) -> bool {
        let position = parse_fen(fen).expect("FEN should parse");
        let map = AttackMap::compute(&position);
        can_castle(&position, &CastlingMove::new(color, side), &map)
    }

    #[test]
    fn detects_check() {
        let position = parse_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").expect("FEN should parse");
        assert_eq!(is_in_check(&position), Ok(true));
        assert_eq!(is_king_attacked(&position, PieceColor::Black), Ok(false));
    }

    #[test]
    fn missing_king_is_an_error() {
        let position = parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            is_king_attacked(&position, PieceColor::Black),
            Err(ChessErrors::KingNotFound(PieceColor::Black))
        );
    }

    #[test]
    fn castling_checks_both_sides_independently() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert!(castle_allowed(fen, PieceColor::White, CastlingSide::Kingside));
        assert!(castle_allowed(fen, PieceColor::White, CastlingSide::Queenside));

        // f1 attacked: kingside forbidden, queenside unaffected.
        let through_check = "r3k2r/8/8/8/8/8/5r2/R3K2R w KQ - 0 1";
        assert!(!castle_allowed(through_check, PieceColor::White, CastlingSide::Kingside));
        assert!(castle_allowed(through_check, PieceColor::White, CastlingSide::Queenside));
    }

    #[test]
    fn castling_blocked_by_pieces_or_check() {
        // b1 occupied blocks queenside only.
        let blocked = "4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1";
        assert!(!castle_allowed(blocked, PieceColor::White, CastlingSide::Queenside));
        assert!(castle_allowed(blocked, PieceColor::White, CastlingSide::Kingside));

        let in_check = "4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1";
        assert!(!castle_allowed(in_check, PieceColor::White, CastlingSide::Kingside));
        assert!(!castle_allowed(in_check, PieceColor::White, CastlingSide::Queenside));

        // b1 attacked does not matter: the king never crosses it.
        let b_file = "1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1";
        assert!(castle_allowed(b_file, PieceColor::White, CastlingSide::Queenside));
    }
}
