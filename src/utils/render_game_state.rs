//! Terminal-oriented Unicode board renderer.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board with rank 8 at the top, followed by a status line.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");
    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        for file in 0..8u8 {
            out.push(' ');
            out.push(
                game_state
                    .piece_at(make_square(file, rank))
                    .map(piece_to_unicode)
                    .unwrap_or('·'),
            );
        }
        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");

    let side = match game_state.side_to_move {
        Color::White => "white",
        Color::Black => "black",
    };
    let status = &game_state.status;
    let note = if status.is_checkmate {
        " (checkmate)"
    } else if status.is_stalemate {
        " (stalemate)"
    } else if status.is_fifty_move_draw {
        " (fifty-move draw)"
    } else if status.in_check {
        " (check)"
    } else {
        ""
    };
    out.push_str(&format!("{side} to move{note}"));

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_game_state;
    use crate::game_state::game_state::GameState;

    #[test]
    fn renders_start_position() {
        let text = render_game_state(&GameState::new_game());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
        assert_eq!(lines[10], "white to move");
    }
}
