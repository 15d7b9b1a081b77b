//! Text rendering for squares, destinations, and ledger entries.
//!
//! Used for logs, diagnostics, and the side-by-side ledger review during
//! divergence resolution. Files run a..c across columns, ranks 1..3 up the
//! rows.

use crate::game_state::board::BoardLocation;
use crate::game_state::game_types::{Destination, PieceKind, PlacedMove};

pub fn location_to_text(x: &BoardLocation) -> String {
    let file = (b'a' + x.1 as u8) as char;
    let rank = (b'1' + x.0 as u8) as char;
    format!("{file}{rank}")
}

pub fn destination_to_text(destination: &Destination) -> String {
    match destination {
        Destination::OnBoard(stop) => location_to_text(stop),
        Destination::Exited => "exit".to_owned(),
    }
}

pub fn piece_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Rook => 'R',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Queen => 'Q',
        PieceKind::Pawn => 'P',
    }
}

/// One ledger entry, e.g. `Ra1-a2`, `Nb1xc3`, `Pa2-exit`.
pub fn move_to_text(entry: &PlacedMove) -> String {
    let join = if entry.captured.is_some() { 'x' } else { '-' };
    format!(
        "{}{}{}{}",
        piece_letter(entry.piece.kind),
        location_to_text(&entry.from),
        join,
        destination_to_text(&entry.to)
    )
}

/// Whole ledger, numbered from one.
pub fn render_history(moves: &[PlacedMove]) -> Vec<String> {
    moves
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("{}. {}", index + 1, move_to_text(entry)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_types::{Color, Piece};

    fn entry(from: BoardLocation, to: Destination, captured: bool) -> PlacedMove {
        let piece = Piece {
            id: 0,
            kind: PieceKind::Knight,
            color: Color::Light,
            location: from,
            move_count: 0,
        };
        PlacedMove {
            from,
            to,
            piece,
            captured: captured.then_some(Piece {
                id: 1,
                kind: PieceKind::Rook,
                color: Color::Dark,
                location: (2, 0),
                move_count: 0,
            }),
            timestamp_ms: 0,
        }
    }

    #[test]
    fn squares_render_file_then_rank() {
        assert_eq!(location_to_text(&(0, 0)), "a1");
        assert_eq!(location_to_text(&(2, 1)), "b3");
        assert_eq!(location_to_text(&(1, 2)), "c2");
    }

    #[test]
    fn moves_render_captures_and_exits() {
        assert_eq!(
            move_to_text(&entry((0, 1), Destination::OnBoard((2, 0)), true)),
            "Nb1xa3"
        );
        assert_eq!(
            move_to_text(&entry((1, 0), Destination::Exited, false)),
            "Na2-exit"
        );
    }

    #[test]
    fn history_lines_are_numbered_from_one() {
        let lines = render_history(&[
            entry((0, 1), Destination::OnBoard((2, 0)), false),
            entry((2, 0), Destination::Exited, false),
        ]);
        assert_eq!(lines, vec!["1. Nb1-a3".to_owned(), "2. Na3-exit".to_owned()]);
    }
}
