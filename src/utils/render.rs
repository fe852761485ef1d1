//! Terminal-oriented Unicode rendering of positions and games.

use crate::position::board::Position;
use crate::position::game::Game;
use crate::position::types::{Color, PieceKind};
use crate::utils::algebraic::square_to_text;
use crate::utils::fen::castling_text;

/// Renders the board plus the non-board state as terminal text.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_position(position: &Position) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");
    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');
        for file in 0..8u8 {
            match position.piece_at(rank * 8 + file) {
                Some((color, kind)) => out.push(piece_glyph(color, kind)),
                None => out.push('·'),
            }
            if file < 7 {
                out.push(' ');
            }
        }
        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");

    out.push_str("side to move: ");
    out.push_str(match position.side_to_move {
        Color::White => "white",
        Color::Black => "black",
    });
    out.push('\n');
    out.push_str("castling: ");
    out.push_str(&castling_text(position.castling_rights));
    out.push('\n');
    out.push_str("en passant: ");
    match position.en_passant_square {
        Some(square) => out.push_str(&square_to_text(square)),
        None => out.push('-'),
    }
    out.push('\n');
    out.push_str(&format!("hash: {:016x}\n", position.zobrist_key));
    out.push_str("fen: ");
    out.push_str(&position.to_fen());

    out
}

/// `render_position` plus the key history the repetition rule reads.
pub fn render_game(game: &Game) -> String {
    let mut out = render_position(&game.position);
    out.push_str("\nhistory keys:");
    for key in &game.history {
        out.push_str(&format!("\n  {key:016x}"));
    }
    out
}

fn piece_glyph(color: Color, kind: PieceKind) -> char {
    match (color, kind) {
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
    use super::{render_game, render_position};
    use crate::position::game::Game;
    use crate::position::rules::STARTING_POSITION_FEN;
    use crate::search::zobrist::ZobristTable;

    #[test]
    fn starting_position_lays_out_both_back_ranks() {
        let zobrist = ZobristTable::default();
        let game = Game::new(&zobrist);
        let text = render_position(&game.position);

        assert!(text.starts_with("  a b c d e f g h\n8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8\n"));
        assert!(text.contains("1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1\n"));
        assert!(text.contains("side to move: white\n"));
        assert!(text.contains("castling: KQkq\n"));
        assert!(text.contains("en passant: -\n"));
        assert!(text.contains(STARTING_POSITION_FEN));
    }

    #[test]
    fn game_rendering_appends_every_history_key() {
        let zobrist = ZobristTable::default();
        let mut game = Game::new(&zobrist);
        let first_key = game.position.zobrist_key;
        game.history.push(0xabcd);

        let text = render_game(&game);
        assert!(text.contains("history keys:"));
        assert!(text.contains(&format!("{first_key:016x}")));
        assert!(text.contains("000000000000abcd"));
    }
}
