//! Long algebraic move text, the coordinate form UCI speaks ("e2e4", "e7e8q").

use crate::movegen::generator::generate_legal_moves;
use crate::moves::encoding::{dest_square, promotion_piece, source_square, Move};
use crate::position::board::Position;
use crate::position::types::PieceKind;
use crate::search::zobrist::ZobristTable;
use crate::utils::algebraic::{square_from_text, square_to_text};

/// Renders a move as source and destination coordinates, plus a lowercase
/// promotion letter when one applies.
pub fn move_to_text(mv: Move) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_text(source_square(mv)));
    out.push_str(&square_to_text(dest_square(mv)));
    if let Some(kind) = promotion_piece(mv) {
        out.push(promotion_letter(kind));
    }
    out
}

fn promotion_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::Pawn | PieceKind::King => '?',
    }
}

/// Resolves move text against the legal moves of `position`.
///
/// Matching through generation means the result always carries the right
/// capture, en passant, castling, and double-push annotations, and that
/// illegal or malformed text simply resolves to nothing.
pub fn move_from_text(text: &str, position: &Position, zobrist: &ZobristTable) -> Option<Move> {
    let text = text.trim();
    if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
        return None;
    }

    let source = square_from_text(&text[..2]).ok()?;
    let dest = square_from_text(&text[2..4]).ok()?;
    let promotion = if text.len() == 5 {
        Some(promotion_from_letter(text.as_bytes()[4])?)
    } else {
        None
    };

    generate_legal_moves(position, zobrist)
        .into_iter()
        .find(|&mv| {
            source_square(mv) == source
                && dest_square(mv) == dest
                && promotion_piece(mv) == promotion
        })
}

fn promotion_from_letter(letter: u8) -> Option<PieceKind> {
    match letter.to_ascii_lowercase() {
        b'n' => Some(PieceKind::Knight),
        b'b' => Some(PieceKind::Bishop),
        b'r' => Some(PieceKind::Rook),
        b'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
