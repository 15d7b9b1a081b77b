//! Divergence detection between two move ledgers.
//!
//! Two browsers hold independent copies of the same game and exchange
//! moves out of band, so their ledgers can drift apart. The detector walks
//! both ledgers in lock step and finds the earliest index of disagreement;
//! the resolver turns a chosen reconciliation action into a value the
//! surrounding application can act on. Nothing here performs I/O.

use crate::errors::MalformedStateError;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::PlacedMove;
use crate::sync::state_codec::{encode_state, validate_state};
use crate::utils::notation::render_history;

/// Two ledger entries agree when their origins match and their
/// destinations match by variant and value. Snapshots and timestamps are
/// deliberately ignored.
fn moves_agree(mine: &PlacedMove, theirs: &PlacedMove) -> bool {
    mine.from == theirs.from && mine.to == theirs.to
}

/// Where and whether two ledgers part ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivergenceReport {
    /// First index at which the ledgers disagree. When every compared pair
    /// agrees this is `min(len)`: the point after which one side has moves
    /// the other lacks.
    pub index: usize,
    /// True when the ledgers cannot both describe the same game: a
    /// mismatched pair exists, or one ledger extends the other.
    pub diverged: bool,
    pub mine_len: usize,
    pub theirs_len: usize,
}

impl DivergenceReport {
    pub fn compare(mine: &[PlacedMove], theirs: &[PlacedMove]) -> Self {
        let shared = mine.len().min(theirs.len());
        for index in 0..shared {
            if !moves_agree(&mine[index], &theirs[index]) {
                return Self {
                    index,
                    diverged: true,
                    mine_len: mine.len(),
                    theirs_len: theirs.len(),
                };
            }
        }
        Self {
            index: shared,
            diverged: mine.len() != theirs.len(),
            mine_len: mine.len(),
            theirs_len: theirs.len(),
        }
    }
}

/// Reconciliation actions the surrounding application can take once a
/// divergence is on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionAction {
    /// Hand our full state to the peer for adoption.
    TransmitLocal,
    /// Replace our state with the peer's.
    AdoptRemote,
    /// Show both ledgers and let the players sort it out.
    ManualReview,
    /// Walk away; nothing changes.
    Abort,
}

/// Result of a resolution step. The caller owns all side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Encoded local snapshot, ready for the caller's transport.
    Transmit(String),
    /// Fully validated remote state the caller should adopt.
    Adopted(GameState),
    /// Both ledgers rendered for side-by-side review.
    Deferred {
        mine: Vec<String>,
        theirs: Vec<String>,
    },
    /// No change.
    Aborted,
}

/// Executes one reconciliation action. Adoption re-validates the remote
/// state in full; a corrupt remote never replaces a healthy local state.
pub fn resolve(
    local: &GameState,
    remote: &GameState,
    action: ResolutionAction,
) -> Result<Resolution, MalformedStateError> {
    match action {
        ResolutionAction::TransmitLocal => Ok(Resolution::Transmit(encode_state(local))),
        ResolutionAction::AdoptRemote => {
            validate_state(remote)?;
            Ok(Resolution::Adopted(remote.clone()))
        }
        ResolutionAction::ManualReview => Ok(Resolution::Deferred {
            mine: render_history(&local.move_history),
            theirs: render_history(&remote.move_history),
        }),
        ResolutionAction::Abort => Ok(Resolution::Aborted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::BoardLocation;
    use crate::game_state::game_types::{Color, Destination, Piece, PieceKind};

    /// Ledger entry with throwaway snapshots; comparison only reads the
    /// origin and destination.
    fn entry(from: BoardLocation, to: Destination) -> PlacedMove {
        PlacedMove {
            from,
            to,
            piece: Piece {
                id: 0,
                kind: PieceKind::Rook,
                color: Color::Light,
                location: from,
                move_count: 0,
            },
            captured: None,
            timestamp_ms: 0,
        }
    }

    #[test]
    fn empty_ledgers_never_diverge() {
        let report = DivergenceReport::compare(&[], &[]);
        assert_eq!(report.index, 0);
        assert!(!report.diverged);
    }

    #[test]
    fn an_extra_move_diverges_at_the_shared_length() {
        let mine = vec![entry((0, 0), Destination::OnBoard((1, 0)))];
        let report = DivergenceReport::compare(&mine, &[]);
        assert_eq!(report.index, 0);
        assert!(report.diverged);

        let theirs = vec![
            entry((0, 0), Destination::OnBoard((1, 0))),
            entry((2, 2), Destination::OnBoard((1, 1))),
        ];
        let report = DivergenceReport::compare(&mine, &theirs);
        assert_eq!(report.index, 1);
        assert!(report.diverged);
    }

    #[test]
    fn identical_ledgers_agree_through_their_length() {
        let moves = vec![
            entry((0, 0), Destination::OnBoard((1, 0))),
            entry((2, 2), Destination::OnBoard((1, 1))),
            entry((1, 0), Destination::Exited),
        ];
        let report = DivergenceReport::compare(&moves, &moves.clone());
        assert_eq!(report.index, moves.len());
        assert!(!report.diverged);
    }

    #[test]
    fn first_disagreement_wins_over_later_agreement() {
        let mine = vec![
            entry((0, 0), Destination::OnBoard((1, 0))),
            entry((2, 2), Destination::OnBoard((1, 1))),
        ];
        let mut theirs = mine.clone();
        theirs[0] = entry((0, 1), Destination::OnBoard((1, 1)));
        let report = DivergenceReport::compare(&mine, &theirs);
        assert_eq!(report.index, 0);
        assert!(report.diverged);
    }

    #[test]
    fn exit_and_square_destinations_never_match() {
        let mine = vec![
            entry((0, 0), Destination::OnBoard((1, 0))),
            entry((2, 2), Destination::OnBoard((1, 1))),
            entry((1, 0), Destination::OnBoard((2, 0))),
        ];
        let mut theirs = mine.clone();
        theirs[2] = entry((1, 0), Destination::Exited);
        let report = DivergenceReport::compare(&mine, &theirs);
        assert_eq!(report.index, 2);
        assert!(report.diverged);
    }

    mod resolving {
        use super::*;
        use crate::game_state::cooking_rules::RuleSet;
        use crate::game_state::game_types::PlayerInfo;
        use crate::move_generation::legal_move_apply::apply_move;
        use crate::selection::piece_pool::PieceSelectionData;
        use crate::sync::state_codec::decode_state;

        fn opening_game() -> GameState {
            let selection = PieceSelectionData::mirrored(
                [PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop],
                Color::Light,
            );
            GameState::new_game_from_selection(
                &selection,
                PlayerInfo::new("one"),
                PlayerInfo::new("two"),
                RuleSet::default(),
            )
            .expect("selection is valid")
        }

        #[test]
        fn transmit_yields_a_decodable_snapshot() {
            let local = opening_game();
            let remote =
                apply_move(&local, (0, 0), Destination::OnBoard((1, 0))).expect("legal move");

            let resolution =
                resolve(&local, &remote, ResolutionAction::TransmitLocal).expect("no validation");
            let Resolution::Transmit(encoded) = resolution else {
                panic!("expected a transmit resolution");
            };
            assert_eq!(decode_state(&encoded).expect("own state decodes"), local);
        }

        #[test]
        fn adoption_validates_the_remote_state() {
            let local = opening_game();
            let remote =
                apply_move(&local, (0, 0), Destination::OnBoard((1, 0))).expect("legal move");

            match resolve(&local, &remote, ResolutionAction::AdoptRemote) {
                Ok(Resolution::Adopted(adopted)) => assert_eq!(adopted, remote),
                other => panic!("expected adoption, got {other:?}"),
            }

            let mut corrupt = remote.clone();
            corrupt.turn = Color::Light;
            assert!(resolve(&local, &corrupt, ResolutionAction::AdoptRemote).is_err());
        }

        #[test]
        fn review_and_abort_change_nothing() {
            let local = opening_game();
            let remote =
                apply_move(&local, (0, 0), Destination::OnBoard((1, 0))).expect("legal move");

            match resolve(&local, &remote, ResolutionAction::ManualReview) {
                Ok(Resolution::Deferred { mine, theirs }) => {
                    assert!(mine.is_empty());
                    assert_eq!(theirs.len(), 1);
                }
                other => panic!("expected deferral, got {other:?}"),
            }
            assert_eq!(
                resolve(&local, &remote, ResolutionAction::Abort),
                Ok(Resolution::Aborted)
            );
        }
    }
}
