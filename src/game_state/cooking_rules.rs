//! Rule knobs and terminal-state evaluation.
//!
//! The winning condition is data, not code: it travels inside the game
//! state so that both peers of a session evaluate the same predicate. The
//! evaluation is total; every state maps to exactly one outcome.

use serde::{Deserialize, Serialize};

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Color, Destination};
use crate::move_generation::legal_move_generator::all_legal_moves;

/// How a finished game is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryCondition {
    /// A side wins the moment all of its pieces have exited the board.
    /// A side whose last on-board piece is captured before that loses.
    ExitAllPieces,
    /// The game ends as soon as either side has no pieces on the board;
    /// the side with more exited pieces wins, equal counts draw.
    LastSideStanding,
}

/// Total verdict for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Won(Color),
    Draw,
}

/// Rule configuration fixed at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub victory: VictoryCondition,
    /// Whether pawns may capture one step diagonally forward.
    pub pawns_capture_diagonally: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            victory: VictoryCondition::ExitAllPieces,
            pawns_capture_diagonally: true,
        }
    }
}

/// Per-side piece accounting derived from the board and the ledger.
/// `on_board + exited + captured` always equals the side's initial count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideTally {
    pub on_board: u8,
    pub exited: u8,
    pub captured: u8,
}

pub fn tally(game: &GameState, color: Color) -> SideTally {
    let mut result = SideTally {
        on_board: game.register.count_for(color) as u8,
        ..SideTally::default()
    };
    for entry in &game.move_history {
        if entry.piece.color == color && matches!(entry.to, Destination::Exited) {
            result.exited += 1;
        }
        if let Some(captured) = &entry.captured {
            if captured.color == color {
                result.captured += 1;
            }
        }
    }
    result
}

/// Evaluates the state's victory condition. Called after every accepted
/// move; a side with pieces but no legal move draws the game rather than
/// leaving it undecidable.
pub fn evaluate_outcome(game: &GameState) -> GameOutcome {
    let light = tally(game, Color::Light);
    let dark = tally(game, Color::Dark);

    let decided = match game.rules.victory {
        VictoryCondition::ExitAllPieces => {
            // A side with nothing left on the board is done: it wins if
            // every piece it owned marched off, and loses if any were
            // captured, since exiting them all is no longer possible.
            if light.on_board == 0 {
                Some(if light.captured == 0 {
                    GameOutcome::Won(Color::Light)
                } else {
                    GameOutcome::Won(Color::Dark)
                })
            } else if dark.on_board == 0 {
                Some(if dark.captured == 0 {
                    GameOutcome::Won(Color::Dark)
                } else {
                    GameOutcome::Won(Color::Light)
                })
            } else {
                None
            }
        }
        VictoryCondition::LastSideStanding => {
            if light.on_board == 0 || dark.on_board == 0 {
                if light.exited > dark.exited {
                    Some(GameOutcome::Won(Color::Light))
                } else if dark.exited > light.exited {
                    Some(GameOutcome::Won(Color::Dark))
                } else {
                    Some(GameOutcome::Draw)
                }
            } else {
                None
            }
        }
    };

    if let Some(outcome) = decided {
        return outcome;
    }
    if all_legal_moves(game).is_empty() {
        return GameOutcome::Draw;
    }
    GameOutcome::InProgress
}
