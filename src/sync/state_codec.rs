//! Transport codec for game snapshots and per-turn deltas.
//!
//! Snapshots are serde JSON wrapped in url-safe unpadded base64 so they can
//! ride in a URL fragment or a clipboard paste without escaping. Decoding
//! validates every structural invariant and replays the ledger backward
//! against the board before a state is accepted; a snapshot is either fully
//! valid or rejected outright.
//!
//! Routine turn exchange uses `TurnDelta`: the moves the peer has not seen
//! plus a digest of the full ledger. Applying a delta pushes each move
//! through the rules engine, so a delta can never smuggle in an illegal
//! move, and the digest catches silently diverged ledgers.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::errors::MalformedStateError;
use crate::game_state::board::PieceRegister;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Color, Destination, PieceId, PlacedMove};
use crate::move_generation::legal_move_apply::apply_move;
use crate::selection::piece_pool::PIECES_PER_SIDE;

/// Renders a full snapshot as a url-fragment-safe string.
pub fn encode_state(game: &GameState) -> String {
    let json = serde_json::to_string(game).expect("game state serialization is infallible");
    URL_SAFE_NO_PAD.encode(json)
}

/// Parses and fully validates a transported snapshot.
pub fn decode_state(text: &str) -> Result<GameState, MalformedStateError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(text.trim())
        .map_err(|error| MalformedStateError::Transport(error.to_string()))?;
    let json = String::from_utf8(bytes)
        .map_err(|error| MalformedStateError::Transport(error.to_string()))?;
    let game: GameState =
        serde_json::from_str(&json).map_err(|error| MalformedStateError::Syntax(error.to_string()))?;
    if let Err(error) = validate_state(&game) {
        tracing::warn!(%error, "decoded snapshot failed validation");
        return Err(error);
    }
    Ok(game)
}

/// Checks every structural invariant of a snapshot: board/piece agreement,
/// id uniqueness, strict turn alternation, and a full backward replay of
/// the ledger onto a valid starting board.
pub fn validate_state(game: &GameState) -> Result<(), MalformedStateError> {
    let mut seen_ids: Vec<PieceId> = Vec::new();
    for (cell, piece) in game.register.iter() {
        if piece.location != cell {
            return Err(MalformedStateError::PieceCellMismatch {
                cell,
                recorded: piece.location,
            });
        }
        claim_id(&mut seen_ids, piece.id)?;
    }

    // Pieces retired by exit or capture keep their ids reserved.
    for entry in &game.move_history {
        if matches!(entry.to, Destination::Exited) {
            claim_id(&mut seen_ids, entry.piece.id)?;
        }
        if let Some(captured) = &entry.captured {
            claim_id(&mut seen_ids, captured.id)?;
        }
    }

    let expected_turn = turn_for_ply(game.move_history.len());
    if game.turn != expected_turn {
        return Err(MalformedStateError::TurnParityMismatch {
            expected: expected_turn,
            found: game.turn,
        });
    }
    for (index, entry) in game.move_history.iter().enumerate() {
        if entry.piece.color != turn_for_ply(index) {
            return Err(MalformedStateError::HistoryTurnMismatch { index });
        }
    }

    rewind_history(game)
}

fn claim_id(seen: &mut Vec<PieceId>, id: PieceId) -> Result<(), MalformedStateError> {
    if seen.contains(&id) {
        return Err(MalformedStateError::DuplicatePieceId(id));
    }
    seen.push(id);
    Ok(())
}

/// Light moves first and turns alternate strictly.
#[inline]
fn turn_for_ply(ply: usize) -> Color {
    if ply % 2 == 0 {
        Color::Light
    } else {
        Color::Dark
    }
}

/// Undoes the ledger newest-first onto a scratch board and checks that the
/// result is a plausible starting position.
fn rewind_history(game: &GameState) -> Result<(), MalformedStateError> {
    let mut register = game.register.clone();
    for (index, entry) in game.move_history.iter().enumerate().rev() {
        if !undo_move(&mut register, entry) {
            return Err(MalformedStateError::HistoryBoardMismatch { index });
        }
    }

    let mut light = 0u8;
    let mut dark = 0u8;
    for (cell, piece) in register.iter() {
        if piece.move_count != 0 || cell.0 != piece.color.home_row() {
            return Err(MalformedStateError::InitialBoardInvalid);
        }
        match piece.color {
            Color::Light => light += 1,
            Color::Dark => dark += 1,
        }
    }
    if light != PIECES_PER_SIDE || dark != PIECES_PER_SIDE {
        return Err(MalformedStateError::InitialBoardInvalid);
    }
    Ok(())
}

/// Reverses one ledger entry. The mover must sit where the move put it
/// (or be off-board for an exit) with one more move than its snapshot,
/// and the origin square must be free to take it back.
fn undo_move(register: &mut PieceRegister, entry: &PlacedMove) -> bool {
    if entry.piece.location != entry.from {
        return false;
    }
    match entry.to {
        Destination::OnBoard(stop) => {
            let Some(current) = register.remove_piece(&stop) else {
                return false;
            };
            if current.id != entry.piece.id
                || current.kind != entry.piece.kind
                || current.color != entry.piece.color
                || current.move_count != entry.piece.move_count + 1
            {
                return false;
            }
            if let Some(captured) = &entry.captured {
                if captured.location != stop || !register.add_piece(*captured) {
                    return false;
                }
            }
            register.add_piece(entry.piece)
        }
        Destination::Exited => {
            if entry.captured.is_some() {
                return false;
            }
            register.add_piece(entry.piece)
        }
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a fold over each move's origin and destination cells. Cheap enough
/// to compute on every exchange; timestamps and snapshots are excluded so
/// equal ledgers always digest equally.
pub fn history_digest(moves: &[PlacedMove]) -> u64 {
    let mut hash = FNV_OFFSET;
    for entry in moves {
        for value in digest_bytes(entry) {
            hash = (hash ^ u64::from(value)).wrapping_mul(FNV_PRIME);
        }
    }
    hash
}

fn digest_bytes(entry: &PlacedMove) -> [u8; 5] {
    let (from_row, from_col) = (entry.from.0 as u8, entry.from.1 as u8);
    match entry.to {
        Destination::OnBoard(stop) => [from_row, from_col, 1, stop.0 as u8, stop.1 as u8],
        Destination::Exited => [from_row, from_col, 2, 0xFF, 0xFF],
    }
}

/// The lighter transfer for routine turn exchange: everything after the
/// ledger prefix the peer already holds, plus a digest of the full ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnDelta {
    pub base_len: usize,
    pub moves: Vec<PlacedMove>,
    pub history_digest: u64,
}

/// Builds the delta a peer needs, given how much of our ledger it already
/// holds. `None` when the peer claims more moves than we have (that is a
/// divergence, not a delta).
pub fn make_delta(game: &GameState, peer_known_len: usize) -> Option<TurnDelta> {
    if peer_known_len > game.move_history.len() {
        return None;
    }
    Some(TurnDelta {
        base_len: peer_known_len,
        moves: game.move_history[peer_known_len..].to_vec(),
        history_digest: history_digest(&game.move_history),
    })
}

pub fn encode_delta(delta: &TurnDelta) -> String {
    let json = serde_json::to_string(delta).expect("delta serialization is infallible");
    URL_SAFE_NO_PAD.encode(json)
}

pub fn decode_delta(text: &str) -> Result<TurnDelta, MalformedStateError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(text.trim())
        .map_err(|error| MalformedStateError::Transport(error.to_string()))?;
    let json = String::from_utf8(bytes)
        .map_err(|error| MalformedStateError::Transport(error.to_string()))?;
    serde_json::from_str(&json).map_err(|error| MalformedStateError::Syntax(error.to_string()))
}

/// Replays a peer's delta through the rules engine. Every carried move is
/// re-validated; the peer's timestamps are kept so both ledgers stay
/// byte-identical. A digest mismatch after a clean replay means the peers
/// diverged earlier and need a full-state reconciliation.
pub fn apply_delta(game: &GameState, delta: &TurnDelta) -> Result<GameState, MalformedStateError> {
    if delta.base_len != game.move_history.len() {
        return Err(MalformedStateError::DeltaBaseMismatch {
            expected: game.move_history.len(),
            found: delta.base_len,
        });
    }
    let mut next = game.clone();
    for (offset, entry) in delta.moves.iter().enumerate() {
        let index = delta.base_len + offset;
        next = apply_move(&next, entry.from, entry.to)
            .map_err(|source| MalformedStateError::DeltaMoveRejected { index, source })?;
        let replayed = next
            .move_history
            .last_mut()
            .expect("apply_move appends an entry");
        if replayed.piece.id != entry.piece.id
            || replayed.captured.as_ref().map(|p| p.id) != entry.captured.as_ref().map(|p| p.id)
        {
            return Err(MalformedStateError::DeltaDiverged);
        }
        replayed.timestamp_ms = entry.timestamp_ms;
    }
    if history_digest(&next.move_history) != delta.history_digest {
        return Err(MalformedStateError::DeltaDiverged);
    }
    tracing::debug!(applied = delta.moves.len(), "delta applied");
    Ok(next)
}
