//! Crate root module declarations for the chess rules engine.
//!
//! This file exposes the subsystems (position model, movement rules, legality
//! filtering, game session, notation codecs and engines) so callers, tests and
//! benches can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
    pub mod position_builder;
    pub mod zobrist;
}

pub mod moves {
    pub mod diagonal_moves;
    pub mod en_passant_moves;
    pub mod file_and_rank_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod move_rule;
    pub mod pawn_moves;
}

pub mod move_generation {
    pub mod attack_map;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod game {
    pub mod chess_game;
    pub mod game_rules;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod san;
}
