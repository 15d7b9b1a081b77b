//! Piece pool limits and pre-game selection data.
//!
//! Each side draws its three-piece loadout from a standard per-side set:
//! two rooks, two knights, two bishops, one queen, eight pawns. Selection
//! data is validated against those maxima before any board is built.

use serde::{Deserialize, Serialize};

use crate::errors::SelectionError;
use crate::game_state::game_types::{Color, PieceKind};

/// Pieces each side brings to the table.
pub const PIECES_PER_SIDE: u8 = 3;

/// Largest number of `kind` one side may field.
pub const fn max_pool_count(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::Rook => 2,
        PieceKind::Knight => 2,
        PieceKind::Bishop => 2,
        PieceKind::Queen => 1,
        PieceKind::Pawn => 8,
    }
}

fn count_of(selected: &[PieceKind], kind: PieceKind) -> u8 {
    selected.iter().filter(|k| **k == kind).count() as u8
}

/// Pool members still below their maximum given the pieces already chosen
/// for one side. Drives incremental selection and bounds random draws.
pub fn available_pieces(selected: &[PieceKind]) -> Vec<PieceKind> {
    PieceKind::ALL
        .into_iter()
        .filter(|kind| count_of(selected, *kind) < max_pool_count(*kind))
        .collect()
}

/// Validates one side's loadout against the pool maxima.
pub fn validate_loadout(pieces: &[PieceKind; 3]) -> Result<(), SelectionError> {
    for kind in PieceKind::ALL {
        let max = max_pool_count(kind);
        if count_of(pieces, kind) > max {
            return Err(SelectionError::TooManyOfKind { kind, max });
        }
    }
    Ok(())
}

/// How the two loadouts were negotiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Player 2 plays the same three pieces as player 1.
    Mirrored,
    /// Each player picks freely.
    Independent,
    /// Both loadouts come from the seeded generator.
    Random,
}

/// Outcome of the pre-game negotiation, as stored and transported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSelectionData {
    pub mode: SelectionMode,
    pub player1_pieces: [PieceKind; 3],
    pub player2_pieces: [PieceKind; 3],
    pub player1_color: Color,
}

impl PieceSelectionData {
    pub fn mirrored(pieces: [PieceKind; 3], player1_color: Color) -> Self {
        Self {
            mode: SelectionMode::Mirrored,
            player1_pieces: pieces,
            player2_pieces: pieces,
            player1_color,
        }
    }

    pub fn independent(
        player1_pieces: [PieceKind; 3],
        player2_pieces: [PieceKind; 3],
        player1_color: Color,
    ) -> Self {
        Self {
            mode: SelectionMode::Independent,
            player1_pieces,
            player2_pieces,
            player1_color,
        }
    }

    /// Random-mode selection: both loadouts come from the deterministic
    /// generator, so peers holding the same seeds derive the same data.
    pub fn random(seed_player1: &str, seed_player2: &str, player1_color: Color) -> Self {
        Self {
            mode: SelectionMode::Random,
            player1_pieces: crate::selection::seeded_random::generate_random_pieces(seed_player1),
            player2_pieces: crate::selection::seeded_random::generate_random_pieces(seed_player2),
            player1_color,
        }
    }

    /// Checks both loadouts against the per-side pool maxima.
    pub fn validate(&self) -> Result<(), SelectionError> {
        validate_loadout(&self.player1_pieces)?;
        validate_loadout(&self.player2_pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pool_is_available_to_an_empty_selection() {
        assert_eq!(available_pieces(&[]), PieceKind::ALL.to_vec());
    }

    #[test]
    fn queen_leaves_the_pool_after_one_pick() {
        let available = available_pieces(&[PieceKind::Queen]);
        assert!(!available.contains(&PieceKind::Queen));
        assert_eq!(available.len(), 4);
    }

    #[test]
    fn rooks_leave_the_pool_after_two_picks() {
        let available = available_pieces(&[PieceKind::Rook, PieceKind::Rook]);
        assert!(!available.contains(&PieceKind::Rook));
        assert!(available.contains(&PieceKind::Knight));
    }

    #[test]
    fn loadout_validation_enforces_the_maxima() {
        assert!(validate_loadout(&[PieceKind::Rook, PieceKind::Rook, PieceKind::Queen]).is_ok());
        assert_eq!(
            validate_loadout(&[PieceKind::Queen, PieceKind::Queen, PieceKind::Pawn]),
            Err(SelectionError::TooManyOfKind {
                kind: PieceKind::Queen,
                max: 1,
            })
        );
    }

    #[test]
    fn selection_data_validates_both_sides() {
        let mut selection = PieceSelectionData::mirrored(
            [PieceKind::Pawn, PieceKind::Pawn, PieceKind::Pawn],
            Color::Light,
        );
        assert!(selection.validate().is_ok());

        selection.player2_pieces = [PieceKind::Rook, PieceKind::Rook, PieceKind::Rook];
        assert!(selection.validate().is_err());
    }
}
