//! Seeded random playout harness.
//!
//! Plays uniformly random legal moves until the game is decided or a ply
//! cap is reached. Deterministic for a given seed and starting state; used
//! by property tests to reach a spread of real game states without a
//! scripted opponent.

use rand::{rngs::StdRng, RngExt, SeedableRng};

use crate::errors::IllegalMoveError;
use crate::game_state::cooking_rules::GameOutcome;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::utils::notation::render_history;

#[derive(Debug, Clone)]
pub struct PlayoutConfig {
    pub max_plies: u32,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self { max_plies: 200 }
    }
}

#[derive(Debug, Clone)]
pub struct PlayoutResult {
    pub final_state: GameState,
    pub outcome: GameOutcome,
    pub plies: u32,
    pub ledger_lines: Vec<String>,
}

/// Plays one seeded random game from `start`.
pub fn random_playout(
    start: &GameState,
    seed: u64,
    config: &PlayoutConfig,
) -> Result<PlayoutResult, IllegalMoveError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = start.clone();
    let mut plies = 0u32;

    while plies < config.max_plies {
        if state.outcome() != GameOutcome::InProgress {
            break;
        }
        let legal = all_legal_moves(&state);
        if legal.is_empty() {
            break;
        }
        let (from, to) = legal[rng.random_range(0..legal.len())];
        state = apply_move(&state, from, to)?;
        plies += 1;
    }

    Ok(PlayoutResult {
        outcome: state.outcome(),
        ledger_lines: render_history(&state.move_history),
        plies,
        final_state: state,
    })
}
