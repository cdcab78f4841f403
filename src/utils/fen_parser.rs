//! FEN-to-Position parser.
//!
//! Accepts exactly six whitespace-separated fields. Kings are not required
//! here; [`ChessGame`](crate::game::chess_game::ChessGame) enforces that.

use tracing::warn;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::game_state::position_builder::PositionBuilder;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<Position, ChessErrors> {
    let invalid = |reason: String| invalid_fen(fen, reason);

    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout".to_owned()))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move".to_owned()))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights".to_owned()))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square".to_owned()))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock".to_owned()))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number".to_owned()))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields".to_owned()));
    }

    let mut builder = PositionBuilder::new();

    parse_board(board_part, &mut builder).map_err(invalid)?;
    let side_to_move = parse_side_to_move(side_part).map_err(invalid)?;
    let castling_rights = parse_castling_rights(castling_part).map_err(invalid)?;
    let en_passant = parse_en_passant_square(fen, en_passant_part, side_to_move)
        .map_err(invalid)?;
    let half_moves = halfmove_part
        .parse::<u32>()
        .map_err(|_| invalid(format!("invalid halfmove clock: {halfmove_part}")))?;
    let full_moves = fullmove_part
        .parse::<u32>()
        .map_err(|_| invalid(format!("invalid fullmove number: {fullmove_part}")))?;

    builder
        .with_player_to_move(side_to_move)
        .with_castling_rights(castling_rights)
        .with_en_passant_target(en_passant)
        .with_half_moves(half_moves)
        .with_full_moves(full_moves);

    warn_on_unsupported_castling(fen, &builder);

    Ok(builder.build())
}

fn invalid_fen(fen: &str, reason: String) -> ChessErrors {
    ChessErrors::InvalidFenString {
        fen: fen.to_owned(),
        reason,
    }
}

fn parse_board(board_part: &str, builder: &mut PositionBuilder) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("board layout must contain 8 ranks".to_owned());
    }

    for (rank, rank_str) in SquareRank::ALL.iter().rev().zip(ranks) {
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("invalid empty-square count '{ch}'"));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(format!("rank {rank} has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| format!("invalid piece character '{ch}' in board layout"))?;
            let square_file =
                SquareFile::from_index(file).ok_or_else(|| format!("rank {rank} has too many files"))?;

            builder.set_square(SquareName::new(square_file, *rank), piece);
            file += 1;
        }

        if file != 8 {
            return Err(format!("rank {rank} does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<PieceColor, String> {
    match side_part {
        "w" => Ok(PieceColor::White),
        "b" => Ok(PieceColor::Black),
        _ => Err(format!("invalid side-to-move field: {side_part}")),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, String> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        let (color, side) = match ch {
            'K' => (PieceColor::White, CastlingSide::Kingside),
            'Q' => (PieceColor::White, CastlingSide::Queenside),
            'k' => (PieceColor::Black, CastlingSide::Kingside),
            'q' => (PieceColor::Black, CastlingSide::Queenside),
            _ => return Err(format!("invalid castling rights character: {ch}")),
        };
        if rights.contains(color, side) {
            return Err(format!("repeated castling rights character: {ch}"));
        }
        rights.insert(color, side);
    }

    Ok(rights)
}

/// Any square is accepted. A target off the rank a double-stepping pawn of
/// the side that just moved passes over (rank 6 with White to move, rank 3
/// with Black to move) is kept as written and logged.
fn parse_en_passant_square(
    fen: &str,
    en_passant_part: &str,
    side_to_move: PieceColor,
) -> Result<Option<SquareName>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part).map_err(|e| e.to_string())?;
    let expected_rank = match side_to_move {
        PieceColor::White => SquareRank::R6,
        PieceColor::Black => SquareRank::R3,
    };
    if square.rank() != expected_rank {
        warn!(fen, %square, %expected_rank, "en-passant square off the double-step rank");
    }

    Ok(Some(square))
}

fn warn_on_unsupported_castling(fen: &str, builder: &PositionBuilder) {
    for (color, side) in builder.castling_rights().iter() {
        let king = builder.piece_at(SquareName::new(SquareFile::E, color.home_rank()));
        let rook = builder.piece_at(SquareName::new(side.rook_file(), color.home_rank()));
        if king != Some(Piece::new(PieceType::King, color))
            || rook != Some(Piece::new(PieceType::Rook, color))
        {
            warn!(fen, %color, ?side, "castling right without king and rook on their home squares");
        }
    }
}
