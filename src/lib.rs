//! Crate root module declarations for the King's Cooking engine.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! piece selection, and the peer synchronization protocol) so hosts, tests,
//! and external tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod cooking_rules;
    pub mod game_state;
    pub mod game_types;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_generator;
}

pub mod selection {
    pub mod board_setup;
    pub mod piece_pool;
    pub mod seeded_random;
}

pub mod sync {
    pub mod divergence;
    pub mod state_codec;
    pub mod transport;
}

pub mod utils {
    pub mod notation;
    pub mod random_playout;
    pub mod render_game_state;
}
