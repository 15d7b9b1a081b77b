//! Per-piece destination generation.
//!
//! All generators are pure reads of the register: they never mutate state,
//! never return the origin square, and never return a friendly-occupied
//! square. Turn ownership is enforced only by the public
//! `legal_destinations` query; the per-piece calculators answer for any
//! piece regardless of whose turn it is.
//!
//! Exits are uniform across piece kinds: a movement that leaves the grid
//! through the side's far rank yields `Destination::Exited`. Leaving the
//! grid sideways or backward is not a move. Pawns additionally exit by
//! *entering* the far rank on a forward march.

use crate::game_state::board::{offset_location, BoardLocation, PieceRegister};
use crate::game_state::cooking_rules::RuleSet;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Color, Destination, Piece, PieceKind};

const ORTHOGONAL_VECTORS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_VECTORS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// True when a row index lies past the side's far rank, off the board on
/// the opponent-king side of the table.
#[inline]
fn beyond_far_rank(color: Color, row: i8) -> bool {
    match color {
        Color::Light => row > Color::Light.far_rank(),
        Color::Dark => row < Color::Dark.far_rank(),
    }
}

/// Destinations for the piece at `start`. Empty when the square is off the
/// grid, empty, or holds a piece the side to move does not own. Never
/// fails.
pub fn legal_destinations(game: &GameState, start: &BoardLocation) -> Vec<Destination> {
    let Some(piece) = game.register.view(start) else {
        return Vec::new();
    };
    if piece.color != game.turn {
        return Vec::new();
    }
    potential_destinations(&game.register, piece, &game.rules)
}

/// Destinations for `piece` regardless of whose turn it is.
pub fn potential_destinations(
    register: &PieceRegister,
    piece: &Piece,
    rules: &RuleSet,
) -> Vec<Destination> {
    let destinations = match piece.kind {
        PieceKind::Rook => slider_destinations(register, piece, &ORTHOGONAL_VECTORS),
        PieceKind::Bishop => slider_destinations(register, piece, &DIAGONAL_VECTORS),
        PieceKind::Queen => {
            let mut collected = slider_destinations(register, piece, &ORTHOGONAL_VECTORS);
            collected.extend(slider_destinations(register, piece, &DIAGONAL_VECTORS));
            collected
        }
        PieceKind::Knight => knight_destinations(register, piece),
        PieceKind::Pawn => pawn_destinations(register, piece, rules),
    };
    dedupe_exits(destinations)
}

/// Every legal `(from, to)` pair for the side to move.
pub fn all_legal_moves(game: &GameState) -> Vec<(BoardLocation, Destination)> {
    let mut result = Vec::new();
    for (location, piece) in game.register.iter() {
        if piece.color != game.turn {
            continue;
        }
        for destination in potential_destinations(&game.register, piece, &game.rules) {
            result.push((location, destination));
        }
    }
    result
}

/// Follows each movement vector square by square until blocked. The slide
/// stops at the first occupied square, including it only as a capture; a
/// slide that runs off the grid through the far rank exits.
fn slider_destinations(
    register: &PieceRegister,
    piece: &Piece,
    vectors: &[(i8, i8)],
) -> Vec<Destination> {
    let mut result = Vec::new();
    for (d_row, d_col) in vectors {
        let mut cursor = piece.location;
        loop {
            match offset_location(&cursor, *d_row, *d_col) {
                Some(stop) => match register.view(&stop) {
                    None => {
                        result.push(Destination::OnBoard(stop));
                        cursor = stop;
                    }
                    Some(target) => {
                        if target.color != piece.color {
                            result.push(Destination::OnBoard(stop));
                        }
                        break;
                    }
                },
                None => {
                    if beyond_far_rank(piece.color, cursor.0 + d_row) {
                        result.push(Destination::Exited);
                    }
                    break;
                }
            }
        }
    }
    result
}

fn knight_destinations(register: &PieceRegister, piece: &Piece) -> Vec<Destination> {
    let mut result = Vec::new();
    for (d_row, d_col) in &KNIGHT_OFFSETS {
        match offset_location(&piece.location, *d_row, *d_col) {
            Some(stop) => match register.view(&stop) {
                None => result.push(Destination::OnBoard(stop)),
                Some(target) => {
                    if target.color != piece.color {
                        result.push(Destination::OnBoard(stop));
                    }
                }
            },
            None => {
                if beyond_far_rank(piece.color, piece.location.0 + d_row) {
                    result.push(Destination::Exited);
                }
            }
        }
    }
    result
}

fn pawn_destinations(register: &PieceRegister, piece: &Piece, rules: &RuleSet) -> Vec<Destination> {
    let mut result = Vec::new();
    let forward = piece.color.forward();

    // Forward march. A march into the far rank carries the pawn off the
    // board; a pawn already standing there steps straight off.
    match offset_location(&piece.location, forward, 0) {
        Some(stop) => {
            if register.view(&stop).is_none() {
                if stop.0 == piece.color.far_rank() {
                    result.push(Destination::Exited);
                } else {
                    result.push(Destination::OnBoard(stop));
                }
            }
        }
        None => result.push(Destination::Exited),
    }

    if rules.pawns_capture_diagonally {
        for d_col in [-1, 1] {
            if let Some(stop) = offset_location(&piece.location, forward, d_col) {
                if let Some(target) = register.view(&stop) {
                    if target.color != piece.color {
                        result.push(Destination::OnBoard(stop));
                    }
                }
            }
        }
    }

    result
}

/// Collapses repeated exit entries into one; distinct vectors can run off
/// the far rank independently but the destination set carries one exit.
fn dedupe_exits(mut destinations: Vec<Destination>) -> Vec<Destination> {
    let mut seen_exit = false;
    destinations.retain(|destination| match destination {
        Destination::Exited => {
            let keep = !seen_exit;
            seen_exit = true;
            keep
        }
        Destination::OnBoard(_) => true,
    });
    destinations
}
