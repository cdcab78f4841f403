//! Position-to-FEN serializer.
//!
//! [`FenParts`] selects which of the six fields are emitted; fields keep their
//! FEN order and are separated by single spaces.

use std::ops::BitOr;

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::square_to_algebraic;

/// Bit-set of FEN fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FenParts(u8);

impl FenParts {
    pub const BOARD: FenParts = FenParts(1 << 0);
    pub const TURN: FenParts = FenParts(1 << 1);
    pub const CASTLING: FenParts = FenParts(1 << 2);
    pub const EN_PASSANT: FenParts = FenParts(1 << 3);
    pub const HALF_MOVES: FenParts = FenParts(1 << 4);
    pub const FULL_MOVES: FenParts = FenParts(1 << 5);
    pub const ALL: FenParts = FenParts(0b11_1111);

    #[inline]
    pub const fn contains(self, other: FenParts) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for FenParts {
    fn default() -> Self {
        FenParts::ALL
    }
}

impl BitOr for FenParts {
    type Output = FenParts;

    fn bitor(self, rhs: FenParts) -> FenParts {
        FenParts(self.0 | rhs.0)
    }
}

pub fn generate_fen(position: &Position) -> String {
    generate_fen_parts(position, FenParts::ALL)
}

pub fn generate_fen_parts(position: &Position, parts: FenParts) -> String {
    let mut fields: Vec<String> = Vec::with_capacity(6);

    if parts.contains(FenParts::BOARD) {
        fields.push(generate_board_field(position));
    }
    if parts.contains(FenParts::TURN) {
        let side_to_move = match position.player_to_move() {
            PieceColor::White => "w",
            PieceColor::Black => "b",
        };
        fields.push(side_to_move.to_owned());
    }
    if parts.contains(FenParts::CASTLING) {
        fields.push(generate_castling_field(position.castling_rights()));
    }
    if parts.contains(FenParts::EN_PASSANT) {
        fields.push(generate_en_passant_field(position.en_passant_target()));
    }
    if parts.contains(FenParts::HALF_MOVES) {
        fields.push(position.half_moves().to_string());
    }
    if parts.contains(FenParts::FULL_MOVES) {
        fields.push(position.full_moves().to_string());
    }

    fields.join(" ")
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for (i, rank) in SquareRank::ALL.iter().rev().enumerate() {
        let mut empty_count = 0u8;

        for file in SquareFile::ALL {
            match position.piece_at(SquareName::new(file, *rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if i < 7 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    if rights.is_empty() {
        return "-".to_owned();
    }

    rights
        .iter()
        .map(|(color, side)| {
            let letter = match side {
                CastlingSide::Kingside => 'k',
                CastlingSide::Queenside => 'q',
            };
            match color {
                PieceColor::White => letter.to_ascii_uppercase(),
                PieceColor::Black => letter,
            }
        })
        .collect()
}

fn generate_en_passant_field(target: Option<SquareName>) -> String {
    target.map_or_else(|| "-".to_owned(), square_to_algebraic)
}
