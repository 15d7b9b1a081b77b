//! Board geometry and the piece register.
//!
//! The playing field is a fixed 3x3 grid. Locations are zero-based
//! `(row, column)` pairs; the register owns at most one piece per square
//! and keeps each piece's recorded location in agreement with its cell.

use serde::{Deserialize, Serialize};

use crate::game_state::game_types::{Color, Piece};

/// Zero-based `(row, column)` square coordinates.
pub type BoardLocation = (i8, i8);

/// Number of rows and columns on the board.
pub const BOARD_SIZE: i8 = 3;

/// True when the location lies on the grid.
#[inline]
pub fn in_bounds(x: &BoardLocation) -> bool {
    (0..BOARD_SIZE).contains(&x.0) && (0..BOARD_SIZE).contains(&x.1)
}

/// Moves a board location by a row and column offset. `None` when the
/// result leaves the grid.
pub fn offset_location(x: &BoardLocation, d_row: i8, d_col: i8) -> Option<BoardLocation> {
    let y: BoardLocation = (x.0 + d_row, x.1 + d_col);
    if in_bounds(&y) {
        Some(y)
    } else {
        None
    }
}

/// 3x3 mapping from square to optional piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PieceRegister {
    buffer: [[Option<Piece>; 3]; 3],
}

impl PieceRegister {
    /// The piece on `x`, if the location is on the grid and occupied.
    pub fn view(&self, x: &BoardLocation) -> Option<&Piece> {
        if !in_bounds(x) {
            return None;
        }
        self.buffer[x.0 as usize][x.1 as usize].as_ref()
    }

    /// Mutable access to the cell at `x`. The location must be on the grid.
    pub fn at(&mut self, x: &BoardLocation) -> &mut Option<Piece> {
        &mut self.buffer[x.0 as usize][x.1 as usize]
    }

    /// Places `piece` on the square its own `location` names. Fails when
    /// the location is off the grid or already occupied.
    pub fn add_piece(&mut self, piece: Piece) -> bool {
        let location = piece.location;
        if !in_bounds(&location) {
            return false;
        }
        let cell = self.at(&location);
        if cell.is_some() {
            return false;
        }
        *cell = Some(piece);
        true
    }

    /// Removes and returns the piece on `x`, if any.
    pub fn remove_piece(&mut self, x: &BoardLocation) -> Option<Piece> {
        if !in_bounds(x) {
            return None;
        }
        self.buffer[x.0 as usize][x.1 as usize].take()
    }

    /// Occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (BoardLocation, &Piece)> + '_ {
        self.buffer.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(column, cell)| {
                cell.as_ref()
                    .map(|piece| ((row as i8, column as i8), piece))
            })
        })
    }

    /// Number of pieces the given side still has on the board.
    pub fn count_for(&self, color: Color) -> usize {
        self.iter().filter(|(_, piece)| piece.color == color).count()
    }
}
