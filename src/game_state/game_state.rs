//! Central game state for a King's Cooking session.
//!
//! `GameState` is a single-owner value: the engine never mutates one in
//! place, it derives the next state from the previous. The board is always
//! the fold of the move history over the initial post-setup board, and the
//! side to move alternates strictly.

use serde::{Deserialize, Serialize};

use crate::errors::SelectionError;
use crate::game_state::board::PieceRegister;
use crate::game_state::cooking_rules::{evaluate_outcome, GameOutcome, RuleSet};
use crate::game_state::game_types::{Color, PlacedMove, PlayerInfo};
use crate::selection::board_setup::{create_board_with_pieces, ColorAssignment};
use crate::selection::piece_pool::PieceSelectionData;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub register: PieceRegister,
    pub move_history: Vec<PlacedMove>,
    pub light_player: PlayerInfo,
    pub dark_player: PlayerInfo,
    pub turn: Color,
    pub rules: RuleSet,
}

impl GameState {
    /// Builds the starting state from a completed selection. Light always
    /// moves first; which player is Light comes from `assignment`.
    pub fn new_game(
        selection: &PieceSelectionData,
        assignment: ColorAssignment,
        player1: PlayerInfo,
        player2: PlayerInfo,
        rules: RuleSet,
    ) -> Result<Self, SelectionError> {
        selection.validate()?;
        let (register, player1_color) = create_board_with_pieces(
            &selection.player1_pieces,
            &selection.player2_pieces,
            assignment,
        );
        let (light_player, dark_player) = match player1_color {
            Color::Light => (player1, player2),
            Color::Dark => (player2, player1),
        };
        tracing::debug!(mode = ?selection.mode, ?player1_color, "starting new game");
        Ok(Self {
            register,
            move_history: Vec::new(),
            light_player,
            dark_player,
            turn: Color::Light,
            rules,
        })
    }

    /// Starting state for the selection flow that records player 1's color
    /// inside the selection data itself.
    pub fn new_game_from_selection(
        selection: &PieceSelectionData,
        player1: PlayerInfo,
        player2: PlayerInfo,
        rules: RuleSet,
    ) -> Result<Self, SelectionError> {
        let assignment = ColorAssignment::ExplicitColor(selection.player1_color);
        Self::new_game(selection, assignment, player1, player2, rules)
    }

    pub fn outcome(&self) -> GameOutcome {
        evaluate_outcome(self)
    }

    pub fn player_for(&self, color: Color) -> &PlayerInfo {
        match color {
            Color::Light => &self.light_player,
            Color::Dark => &self.dark_player,
        }
    }
}
