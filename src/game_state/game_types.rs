//! Core value types shared across the engine.
//!
//! Kings never appear in these types: in this variant both kings sit off
//! the board, and pieces march toward them by exiting past the far rank.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game_state::board::BoardLocation;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row direction of advance: Light marches toward higher rows.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Row where this side's pieces start the game.
    #[inline]
    pub const fn home_row(self) -> i8 {
        match self {
            Color::Light => 0,
            Color::Dark => 2,
        }
    }

    /// Last on-board row in this side's direction of advance; one more
    /// forward step leaves the board.
    #[inline]
    pub const fn far_rank(self) -> i8 {
        match self {
            Color::Light => 2,
            Color::Dark => 0,
        }
    }
}

/// Piece kind. Closed set; there is deliberately no king variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    Rook,
    Knight,
    Bishop,
    Queen,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 5] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::Pawn,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Rook => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Queen => 3,
            PieceKind::Pawn => 4,
        }
    }
}

/// Opaque piece identifier, stable for the life of a game.
pub type PieceId = u8;

/// One piece. `location` always matches the register cell holding it;
/// `move_count` only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub location: BoardLocation,
    pub move_count: u32,
}

/// Where a move ends: on a square, or off the board past the far rank.
///
/// Exiting is its own variant rather than a nullable location so that
/// "left the board" can never be confused with a real square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    OnBoard(BoardLocation),
    Exited,
}

/// One accepted move in the ledger. `piece` snapshots the mover before the
/// move was applied; `captured` snapshots the removed occupant, if any.
/// Exits never capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMove {
    pub from: BoardLocation,
    pub to: Destination,
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Wall-clock milliseconds since the unix epoch, recorded when the
    /// move was accepted. Never part of ledger comparison.
    pub timestamp_ms: i64,
}

/// A participant in the game. The id survives renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: Uuid,
    pub name: String,
}

impl PlayerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn with_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_accessors_are_consistent() {
        assert_eq!(Color::Light.opposite(), Color::Dark);
        assert_eq!(Color::Dark.opposite(), Color::Light);
        assert_eq!(Color::Light.home_row(), 0);
        assert_eq!(Color::Dark.home_row(), 2);
        for color in [Color::Light, Color::Dark] {
            assert_eq!(color.home_row() + color.forward() * 2, color.far_rank());
        }
    }

    #[test]
    fn exited_is_distinct_from_every_square() {
        for row in 0..3 {
            for column in 0..3 {
                assert_ne!(Destination::Exited, Destination::OnBoard((row, column)));
            }
        }
    }

    #[test]
    fn player_info_keeps_id_across_rename() {
        let player = PlayerInfo::new("Ada");
        let renamed = PlayerInfo::with_id(player.id, "Countess");
        assert_eq!(player.id, renamed.id);
        assert_ne!(player.name, renamed.name);
    }
}
