//! Core value types shared by every layer of the rules engine.
//!
//! Coordinates, pieces and castling rights are small `Copy` values. None of
//! them can be mutated in place; positions change only through
//! [`PositionBuilder`](crate::game_state::position_builder::PositionBuilder).

use std::fmt;
use std::str::FromStr;

use crate::chess_errors::ChessErrors;
use crate::utils::algebraic::algebraic_to_square;

/// Side to move / owner of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub const ALL: [PieceColor; 2] = [PieceColor::White, PieceColor::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceColor::White => 0,
            PieceColor::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Rank holding the king and rooks at the start of the game.
    #[inline]
    pub const fn home_rank(self) -> SquareRank {
        match self {
            PieceColor::White => SquareRank::R1,
            PieceColor::Black => SquareRank::R8,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> SquareRank {
        match self {
            PieceColor::White => SquareRank::R2,
            PieceColor::Black => SquareRank::R7,
        }
    }

    /// Rank on which this color's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> SquareRank {
        match self {
            PieceColor::White => SquareRank::R8,
            PieceColor::Black => SquareRank::R1,
        }
    }

    /// Rank step of a forward pawn move.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            PieceColor::White => 1,
            PieceColor::Black => -1,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => write!(f, "white"),
            PieceColor::Black => write!(f, "black"),
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
        PieceType::Pawn,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceType::King => 0,
            PieceType::Queen => 1,
            PieceType::Bishop => 2,
            PieceType::Knight => 3,
            PieceType::Rook => 4,
            PieceType::Pawn => 5,
        }
    }

    /// Upper-case letter used by SAN. Pawns have no letter.
    #[inline]
    pub const fn san_letter(self) -> Option<char> {
        match self {
            PieceType::King => Some('K'),
            PieceType::Queen => Some('Q'),
            PieceType::Bishop => Some('B'),
            PieceType::Knight => Some('N'),
            PieceType::Rook => Some('R'),
            PieceType::Pawn => None,
        }
    }

    pub fn from_san_letter(letter: char) -> Option<Self> {
        match letter {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'R' => Some(PieceType::Rook),
            _ => None,
        }
    }

    /// Whether a pawn may promote to this piece type.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight
        )
    }
}

/// A colored chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: PieceColor,
}

impl Piece {
    #[inline]
    pub const fn new(piece_type: PieceType, color: PieceColor) -> Self {
        Self { piece_type, color }
    }

    #[inline]
    pub fn is_opponent(&self, color: PieceColor) -> bool {
        self.color != color
    }

    /// FEN letter: upper case for White, lower case for Black.
    pub fn fen_char(&self) -> char {
        let base = match self.piece_type {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Rook => 'r',
            PieceType::Pawn => 'p',
        };

        match self.color {
            PieceColor::White => base.to_ascii_uppercase(),
            PieceColor::Black => base,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            PieceColor::White
        } else if ch.is_ascii_lowercase() {
            PieceColor::Black
        } else {
            return None;
        };

        let piece_type = match ch.to_ascii_lowercase() {
            'k' => PieceType::King,
            'q' => PieceType::Queen,
            'b' => PieceType::Bishop,
            'n' => PieceType::Knight,
            'r' => PieceType::Rook,
            'p' => PieceType::Pawn,
            _ => return None,
        };

        Some(Piece::new(piece_type, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

/// Board file `a`..`h`, stored as a zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareFile(u8);

impl SquareFile {
    pub const A: SquareFile = SquareFile(0);
    pub const B: SquareFile = SquareFile(1);
    pub const C: SquareFile = SquareFile(2);
    pub const D: SquareFile = SquareFile(3);
    pub const E: SquareFile = SquareFile(4);
    pub const F: SquareFile = SquareFile(5);
    pub const G: SquareFile = SquareFile(6);
    pub const H: SquareFile = SquareFile(7);

    pub const ALL: [SquareFile; 8] = [
        SquareFile::A,
        SquareFile::B,
        SquareFile::C,
        SquareFile::D,
        SquareFile::E,
        SquareFile::F,
        SquareFile::G,
        SquareFile::H,
    ];

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(SquareFile(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    pub fn from_char(ch: char) -> Option<Self> {
        if ('a'..='h').contains(&ch) {
            Some(SquareFile(ch as u8 - b'a'))
        } else {
            None
        }
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// File `delta` columns away, or `None` past the board edge.
    pub fn offset(self, delta: i8) -> Option<Self> {
        let target = self.0 as i8 + delta;
        if (0..8).contains(&target) {
            Some(SquareFile(target as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for SquareFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Board rank `1`..`8`, stored as a zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareRank(u8);

impl SquareRank {
    pub const R1: SquareRank = SquareRank(0);
    pub const R2: SquareRank = SquareRank(1);
    pub const R3: SquareRank = SquareRank(2);
    pub const R4: SquareRank = SquareRank(3);
    pub const R5: SquareRank = SquareRank(4);
    pub const R6: SquareRank = SquareRank(5);
    pub const R7: SquareRank = SquareRank(6);
    pub const R8: SquareRank = SquareRank(7);

    pub const ALL: [SquareRank; 8] = [
        SquareRank::R1,
        SquareRank::R2,
        SquareRank::R3,
        SquareRank::R4,
        SquareRank::R5,
        SquareRank::R6,
        SquareRank::R7,
        SquareRank::R8,
    ];

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(SquareRank(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Human rank number, `1`..=`8`.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    pub fn from_char(ch: char) -> Option<Self> {
        if ('1'..='8').contains(&ch) {
            Some(SquareRank(ch as u8 - b'1'))
        } else {
            None
        }
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self.0) as char
    }

    pub fn offset(self, delta: i8) -> Option<Self> {
        let target = self.0 as i8 + delta;
        if (0..8).contains(&target) {
            Some(SquareRank(target as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for SquareRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Board address, e.g. `e4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareName {
    file: SquareFile,
    rank: SquareRank,
}

impl SquareName {
    #[inline]
    pub const fn new(file: SquareFile, rank: SquareRank) -> Self {
        Self { file, rank }
    }

    #[inline]
    pub const fn file(self) -> SquareFile {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> SquareRank {
        self.rank
    }

    /// Square for a `0..64` index laid out `a1, b1, .., h1, a2, .., h8`.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 64 {
            return None;
        }
        Some(Self {
            file: SquareFile((index % 8) as u8),
            rank: SquareRank((index / 8) as u8),
        })
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.rank.0 as usize * 8 + self.file.0 as usize
    }

    /// Square displaced by `(d_file, d_rank)`, or `None` off the board.
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        Some(Self {
            file: self.file.offset(d_file)?,
            rank: self.rank.offset(d_rank)?,
        })
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = SquareName> {
        (0..64).filter_map(SquareName::from_index)
    }
}

impl fmt::Display for SquareName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl FromStr for SquareName {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(s)
    }
}

/// A board square together with its occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    name: SquareName,
    piece: Option<Piece>,
}

impl Square {
    #[inline]
    pub const fn new(name: SquareName, piece: Option<Piece>) -> Self {
        Self { name, piece }
    }

    #[inline]
    pub const fn name(&self) -> SquareName {
        self.name
    }

    #[inline]
    pub const fn piece(&self) -> Option<Piece> {
        self.piece
    }

    #[inline]
    pub const fn has_piece(&self) -> bool {
        self.piece.is_some()
    }

    /// Whether the square holds a piece of `color`.
    pub fn holds_color(&self, color: PieceColor) -> bool {
        matches!(self.piece, Some(piece) if piece.color == color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    /// File the rook starts on.
    #[inline]
    pub const fn rook_file(self) -> SquareFile {
        match self {
            CastlingSide::Kingside => SquareFile::H,
            CastlingSide::Queenside => SquareFile::A,
        }
    }
}

/// Set of `(color, side)` castling rights stored as a 4-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0x0F);

    #[inline]
    const fn bit(color: PieceColor, side: CastlingSide) -> u8 {
        let shift = color.index() * 2
            + match side {
                CastlingSide::Kingside => 0,
                CastlingSide::Queenside => 1,
            };
        1u8 << shift
    }

    #[inline]
    pub const fn contains(self, color: PieceColor, side: CastlingSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    #[inline]
    pub fn insert(&mut self, color: PieceColor, side: CastlingSide) {
        self.0 |= Self::bit(color, side);
    }

    #[inline]
    pub fn remove(&mut self, color: PieceColor, side: CastlingSide) {
        self.0 &= !Self::bit(color, side);
    }

    pub fn remove_color(&mut self, color: PieceColor) {
        for side in CastlingSide::ALL {
            self.remove(color, side);
        }
    }

    /// Sides `color` may still castle to, kingside first.
    pub fn sides(self, color: PieceColor) -> Vec<CastlingSide> {
        CastlingSide::ALL
            .into_iter()
            .filter(|side| self.contains(color, *side))
            .collect()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Every right held, White before Black, kingside before queenside.
    pub fn iter(self) -> impl Iterator<Item = (PieceColor, CastlingSide)> {
        PieceColor::ALL.into_iter().flat_map(move |color| {
            CastlingSide::ALL
                .into_iter()
                .filter(move |side| self.contains(color, *side))
                .map(move |side| (color, side))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_name_parses_and_displays() {
        let e4: SquareName = "e4".parse().expect("e4 should parse");
        assert_eq!(e4.file(), SquareFile::E);
        assert_eq!(e4.rank(), SquareRank::R4);
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.to_string(), "e4");
        assert!("i9".parse::<SquareName>().is_err());
        assert!("e".parse::<SquareName>().is_err());
    }

    #[test]
    fn square_offsets_stop_at_board_edges() {
        let a1 = SquareName::new(SquareFile::A, SquareRank::R1);
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(
            a1.offset(7, 7),
            Some(SquareName::new(SquareFile::H, SquareRank::R8))
        );
        assert_eq!(SquareName::all().count(), 64);
    }

    #[test]
    fn piece_fen_chars_round_trip() {
        for ch in ['K', 'Q', 'B', 'N', 'R', 'P', 'k', 'q', 'b', 'n', 'r', 'p'] {
            let piece = Piece::from_fen_char(ch).expect("piece letter should parse");
            assert_eq!(piece.fen_char(), ch);
        }
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('3'), None);
    }

    #[test]
    fn castling_rights_insert_and_remove() {
        let mut rights = CastlingRights::NONE;
        rights.insert(PieceColor::Black, CastlingSide::Queenside);
        assert!(rights.contains(PieceColor::Black, CastlingSide::Queenside));
        assert!(!rights.contains(PieceColor::Black, CastlingSide::Kingside));
        assert_eq!(rights.sides(PieceColor::Black), vec![CastlingSide::Queenside]);

        let mut all = CastlingRights::ALL;
        all.remove_color(PieceColor::White);
        assert_eq!(
            all.iter().collect::<Vec<_>>(),
            vec![
                (PieceColor::Black, CastlingSide::Kingside),
                (PieceColor::Black, CastlingSide::Queenside)
            ]
        );
    }
}
