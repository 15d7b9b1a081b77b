//! Move application.
//!
//! `apply_move` derives the successor state from the current one: the
//! register is updated, the move is appended to the ledger with pre-move
//! snapshots, and the turn flips. Rejection returns the error without
//! touching the input state.

use chrono::Utc;

use crate::errors::IllegalMoveError;
use crate::game_state::board::BoardLocation;
use crate::game_state::cooking_rules::GameOutcome;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Destination, Piece, PlacedMove};
use crate::move_generation::legal_move_generator::legal_destinations;

pub fn apply_move(
    game: &GameState,
    from: BoardLocation,
    to: Destination,
) -> Result<GameState, IllegalMoveError> {
    if game.outcome() != GameOutcome::InProgress {
        return Err(IllegalMoveError::GameAlreadyDecided);
    }
    let piece = match game.register.view(&from) {
        Some(piece) => *piece,
        None => return Err(IllegalMoveError::NoPieceAtStart(from)),
    };
    if piece.color != game.turn {
        return Err(IllegalMoveError::OutOfTurn {
            location: from,
            owner: piece.color,
        });
    }
    if !legal_destinations(game, &from).contains(&to) {
        return Err(IllegalMoveError::DestinationNotAllowed { from, to });
    }

    let mut next = game.clone();
    next.register.remove_piece(&from);

    let captured = match to {
        Destination::OnBoard(stop) => {
            let captured = next.register.remove_piece(&stop);
            *next.register.at(&stop) = Some(Piece {
                location: stop,
                move_count: piece.move_count + 1,
                ..piece
            });
            captured
        }
        // The mover leaves the table; exits never capture.
        Destination::Exited => None,
    };

    tracing::debug!(
        ?from,
        ?to,
        kind = ?piece.kind,
        capture = captured.is_some(),
        "move applied"
    );

    next.move_history.push(PlacedMove {
        from,
        to,
        piece,
        captured,
        timestamp_ms: Utc::now().timestamp_millis(),
    });
    next.turn = game.turn.opposite();
    Ok(next)
}
