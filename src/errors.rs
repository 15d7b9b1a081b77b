//! Errors used throughout the King's Cooking engine.
//!
//! Three error families cover the crate's recoverable failure modes: move
//! rejection by the rules engine, structural failures while decoding a
//! transported snapshot, and piece-selection pool violations. All core
//! functions return `Result` with one of these types; a rejected operation
//! never leaves the input state modified.

use thiserror::Error;

use crate::game_state::board::BoardLocation;
use crate::game_state::game_types::{Color, Destination, PieceId, PieceKind};

/// An attempted move the rules engine refused. The game state that rejected
/// the move is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// There is no piece on the origin square.
    #[error("no piece at {0:?}")]
    NoPieceAtStart(BoardLocation),

    /// The origin square holds a piece the side to move does not own.
    #[error("piece at {location:?} belongs to {owner:?}, who is not on turn")]
    OutOfTurn {
        location: BoardLocation,
        owner: Color,
    },

    /// The requested destination is not in the piece's legal set.
    #[error("destination {to:?} is not reachable from {from:?}")]
    DestinationNotAllowed {
        from: BoardLocation,
        to: Destination,
    },

    /// The game already has a winner (or is drawn); no further moves apply.
    #[error("the game has already been decided")]
    GameAlreadyDecided,
}

/// A transported snapshot or delta that failed decoding or structural
/// validation. Decoding never yields a partially-valid state: the caller
/// keeps its current state and should request a fresh snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedStateError {
    /// The transport string is not valid url-safe base64 or not UTF-8.
    #[error("transport string is unreadable: {0}")]
    Transport(String),

    /// The payload did not parse as a snapshot of the expected shape.
    #[error("snapshot payload did not parse: {0}")]
    Syntax(String),

    /// A square holds a piece whose recorded location disagrees with the
    /// cell containing it.
    #[error("piece in cell {cell:?} records location {recorded:?}")]
    PieceCellMismatch {
        cell: BoardLocation,
        recorded: BoardLocation,
    },

    /// The same piece id appears twice across the board and retired pieces.
    #[error("piece id {0} appears more than once")]
    DuplicatePieceId(PieceId),

    /// The side to move is inconsistent with the history length.
    #[error("side to move is {found:?} but the history length requires {expected:?}")]
    TurnParityMismatch { expected: Color, found: Color },

    /// A history entry does not replay against the board it claims to
    /// have produced.
    #[error("history entry {index} does not replay against the board")]
    HistoryBoardMismatch { index: usize },

    /// A history entry was made by the wrong side for its position in the
    /// ledger.
    #[error("history entry {index} was made out of turn")]
    HistoryTurnMismatch { index: usize },

    /// Rewinding the history did not arrive at a valid starting board.
    #[error("history does not rewind to a valid starting board")]
    InitialBoardInvalid,

    /// A delta was built against a different history length than ours.
    #[error("delta expects a history of length {found}, ours has {expected}")]
    DeltaBaseMismatch { expected: usize, found: usize },

    /// A move carried by a delta was rejected by the rules engine.
    #[error("delta move {index} was rejected")]
    DeltaMoveRejected {
        index: usize,
        #[source]
        source: IllegalMoveError,
    },

    /// The delta applied cleanly but the resulting ledgers disagree; the
    /// peers have diverged and need a full-state reconciliation.
    #[error("histories disagree after applying the delta")]
    DeltaDiverged,
}

/// A piece-selection tuple that violates the pool limits. Raised before any
/// board is constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// One side picked more of a piece kind than the pool holds.
    #[error("selection holds more than {max} of {kind:?}")]
    TooManyOfKind { kind: PieceKind, max: u8 },
}
