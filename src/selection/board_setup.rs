//! Initial board construction from a completed selection.
//!
//! Home rows bind to color: Light starts on row 0 and marches up, Dark
//! starts on row 2 and marches down. Which player is Light comes from the
//! negotiation outcome, expressed either as an explicit color choice or as
//! a first-mover designation.

use serde::{Deserialize, Serialize};

use crate::game_state::board::PieceRegister;
use crate::game_state::game_types::{Color, Piece, PieceId, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerNumber {
    One,
    Two,
}

/// How the pre-game negotiation fixed the sides. Older selection flows
/// record player 1's color directly; newer ones record who moves first,
/// and the first mover plays Light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorAssignment {
    ExplicitColor(Color),
    FirstMover(PlayerNumber),
}

impl ColorAssignment {
    /// Player 1's color under this assignment.
    pub fn player1_color(self) -> Color {
        match self {
            ColorAssignment::ExplicitColor(color) => color,
            ColorAssignment::FirstMover(PlayerNumber::One) => Color::Light,
            ColorAssignment::FirstMover(PlayerNumber::Two) => Color::Dark,
        }
    }
}

/// Places both loadouts on their home rows, column = loadout index. Piece
/// ids are dense: player 1 takes 0..=2, player 2 takes 3..=5. Returns the
/// register and player 1's resolved color.
pub fn create_board_with_pieces(
    player1_pieces: &[PieceKind; 3],
    player2_pieces: &[PieceKind; 3],
    assignment: ColorAssignment,
) -> (PieceRegister, Color) {
    let player1_color = assignment.player1_color();
    let mut register = PieceRegister::default();
    place_loadout(&mut register, player1_pieces, player1_color, 0);
    place_loadout(&mut register, player2_pieces, player1_color.opposite(), 3);
    (register, player1_color)
}

fn place_loadout(
    register: &mut PieceRegister,
    pieces: &[PieceKind; 3],
    color: Color,
    id_base: PieceId,
) {
    let row = color.home_row();
    for (column, kind) in pieces.iter().enumerate() {
        let location = (row, column as i8);
        *register.at(&location) = Some(Piece {
            id: id_base + column as PieceId,
            kind: *kind,
            color,
            location,
            move_count: 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOADOUT_1: [PieceKind; 3] = [PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop];
    const LOADOUT_2: [PieceKind; 3] = [PieceKind::Queen, PieceKind::Pawn, PieceKind::Pawn];

    #[test]
    fn explicit_light_puts_player1_on_row_zero() {
        let (register, player1_color) = create_board_with_pieces(
            &LOADOUT_1,
            &LOADOUT_2,
            ColorAssignment::ExplicitColor(Color::Light),
        );
        assert_eq!(player1_color, Color::Light);

        for (column, kind) in LOADOUT_1.iter().enumerate() {
            let piece = register.view(&(0, column as i8)).expect("home row filled");
            assert_eq!(piece.kind, *kind);
            assert_eq!(piece.color, Color::Light);
            assert_eq!(piece.id, column as PieceId);
            assert_eq!(piece.move_count, 0);
        }
        for (column, kind) in LOADOUT_2.iter().enumerate() {
            let piece = register.view(&(2, column as i8)).expect("home row filled");
            assert_eq!(piece.kind, *kind);
            assert_eq!(piece.color, Color::Dark);
            assert_eq!(piece.id, 3 + column as PieceId);
        }
        assert!(register.view(&(1, 0)).is_none());
    }

    #[test]
    fn explicit_dark_swaps_the_rows() {
        let (register, player1_color) = create_board_with_pieces(
            &LOADOUT_1,
            &LOADOUT_2,
            ColorAssignment::ExplicitColor(Color::Dark),
        );
        assert_eq!(player1_color, Color::Dark);
        // Player 1's loadout sits on Dark's home row with player 1's ids.
        assert_eq!(register.view(&(2, 0)).map(|p| p.id), Some(0));
        assert_eq!(register.view(&(0, 0)).map(|p| p.id), Some(3));
    }

    #[test]
    fn first_mover_designation_covers_both_players() {
        let (_, color_when_p1_first) = create_board_with_pieces(
            &LOADOUT_1,
            &LOADOUT_2,
            ColorAssignment::FirstMover(PlayerNumber::One),
        );
        assert_eq!(color_when_p1_first, Color::Light);

        let (_, color_when_p2_first) = create_board_with_pieces(
            &LOADOUT_1,
            &LOADOUT_2,
            ColorAssignment::FirstMover(PlayerNumber::Two),
        );
        assert_eq!(color_when_p2_first, Color::Dark);
    }
}
