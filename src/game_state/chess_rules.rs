//! Canonical chess-rule constants.
//!
//! Stores the standard starting position, both as FEN text and as a lazily
//! built immutable [`Position`] shared by every game that starts from it.

use std::sync::OnceLock;

use crate::game_state::position::Position;
use crate::game_state::position_builder::PositionBuilder;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

static STANDARD_POSITION: OnceLock<Position> = OnceLock::new();

/// The standard starting layout with full castling rights, White to move.
pub fn standard_position() -> &'static Position {
    STANDARD_POSITION.get_or_init(|| {
        PositionBuilder::new()
            .add_standard_pieces()
            .add_all_castling_rights()
            .build()
    })
}
