//! Zobrist hashing support for fast position identity and repetition tracking.
//!
//! The keys are drawn from a fixed-seed generator so hashes are deterministic
//! across runs, which is useful for testing and debugging.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [[u64; 2]; 2],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for key in piece {
                *key = rng.next_u64();
            }
        }
    }

    let side_to_move = rng.next_u64();

    let mut castling = [[0u64; 2]; 2];
    for color in &mut castling {
        for key in color {
            *key = rng.next_u64();
        }
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.next_u64();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Key for a piece standing on `square`.
#[inline]
pub fn piece_square_key(piece: Piece, square: SquareName) -> u64 {
    tables().piece_square[piece.color.index()][piece.piece_type.index()][square.index()]
}

/// Key for a single `(color, side)` castling right.
#[inline]
pub fn castling_key(color: PieceColor, side: CastlingSide) -> u64 {
    let side_index = match side {
        CastlingSide::Kingside => 0,
        CastlingSide::Queenside => 1,
    };
    tables().castling[color.index()][side_index]
}

#[inline]
pub fn en_passant_file_key(file: SquareFile) -> u64 {
    tables().en_passant_file[file.index() as usize]
}

/// Side-to-move toggle key (xored in when Black is to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Full hash of board, side to move, castling rights and en-passant file.
///
/// Move counters are not part of the hash.
pub fn zobrist_hash(position: &Position) -> u64 {
    let mut key = 0u64;

    for square in position.squares() {
        if let Some(piece) = square.piece() {
            key ^= piece_square_key(piece, square.name());
        }
    }

    if position.player_to_move() == PieceColor::Black {
        key ^= side_to_move_key();
    }

    for (color, side) in position.castling_rights().iter() {
        key ^= castling_key(color, side);
    }

    if let Some(target) = position.en_passant_target() {
        key ^= en_passant_file_key(target.file());
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn hash_is_deterministic_and_ignores_counters() {
        let a = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("FEN should parse");
        let b = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 7 30")
            .expect("FEN should parse");
        assert_eq!(zobrist_hash(&a), zobrist_hash(&b));
        assert_eq!(zobrist_hash(&a), zobrist_hash(&Position::standard()));
    }

    #[test]
    fn hash_changes_with_each_component() {
        let base = parse_fen("r3k2r/8/8/8/4Pp2/8/8/R3K2R b KQkq - 0 1")
            .expect("FEN should parse");
        let variants = [
            "r3k2r/8/8/8/4Pp2/8/8/R3K2R w KQkq - 0 1",
            "r3k2r/8/8/8/4Pp2/8/8/R3K2R b Kkq - 0 1",
            "r3k2r/8/8/8/4Pp2/8/8/R3K2R b KQkq e3 0 1",
            "r3k2r/8/8/8/4Pp2/8/8/R2K3R b kq - 0 1",
        ];

        let base_hash = zobrist_hash(&base);
        for fen in variants {
            let other = parse_fen(fen).expect("FEN should parse");
            assert_ne!(zobrist_hash(&other), base_hash, "{fen}");
        }
    }
}
