//! Answers "is this square attacked", the primitive behind the legality
//! filter, castling gates, and terminal search scoring.

use crate::attacks::king::king_attacks;
use crate::attacks::knight::knight_attacks;
use crate::attacks::pawn::pawn_attacks;
use crate::attacks::sliding::{bishop_attacks, rook_attacks};
use crate::position::board::Position;
use crate::position::types::{Color, PieceKind, Square};

/// True when any piece of `by` attacks `square`. Slider rays use the union
/// occupancy as the blocker set, so the nearest piece on a ray decides.
pub fn is_square_attacked(position: &Position, square: Square, by: Color) -> bool {
    let pieces = &position.pieces[by.index()];

    // A pawn of `by` attacks `square` exactly when a pawn of the other color
    // standing on `square` would attack the pawn's own square.
    if pawn_attacks(by.opposite(), square) & pieces[PieceKind::Pawn.index()] != 0 {
        return true;
    }
    if knight_attacks(square) & pieces[PieceKind::Knight.index()] != 0 {
        return true;
    }

    let occupancy = position.all_occupancy();
    let diagonal_sliders = pieces[PieceKind::Bishop.index()] | pieces[PieceKind::Queen.index()];
    if bishop_attacks(square, occupancy) & diagonal_sliders != 0 {
        return true;
    }
    let orthogonal_sliders = pieces[PieceKind::Rook.index()] | pieces[PieceKind::Queen.index()];
    if rook_attacks(square, occupancy) & orthogonal_sliders != 0 {
        return true;
    }

    king_attacks(square) & pieces[PieceKind::King.index()] != 0
}

pub fn king_square(position: &Position, color: Color) -> Option<Square> {
    let kings = position.pieces[color.index()][PieceKind::King.index()];
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

/// A board without a king is never "in check".
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    match king_square(position, color) {
        Some(square) => is_square_attacked(position, square, color.opposite()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::zobrist::ZobristTable;

    fn position_from(fen: &str) -> Position {
        let zobrist = ZobristTable::default();
        Position::from_fen(fen, &zobrist).expect("test FEN should parse")
    }

    #[test]
    fn starting_position_central_squares_are_safe() {
        let position = position_from("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let e4 = 28;
        assert!(!is_square_attacked(&position, e4, Color::White));
        assert!(!is_square_attacked(&position, e4, Color::Black));
        // f3 is covered by the g1 knight and the e2/g2 pawns.
        assert!(is_square_attacked(&position, 21, Color::White));
    }

    #[test]
    fn pawn_attacks_respect_direction() {
        let position = position_from("8/8/8/3p4/8/8/8/8 w - - 0 1");
        // The d5 pawn attacks c4 and e4, not c6 or e6.
        assert!(is_square_attacked(&position, 26, Color::Black));
        assert!(is_square_attacked(&position, 28, Color::Black));
        assert!(!is_square_attacked(&position, 42, Color::Black));
        assert!(!is_square_attacked(&position, 44, Color::Black));
    }

    #[test]
    fn blocker_shields_the_square_behind_it() {
        let open = position_from("8/8/8/8/8/8/8/R3k3 w - - 0 1");
        assert!(is_square_attacked(&open, 4, Color::White));

        let shielded = position_from("8/8/8/8/8/8/8/R1N1k3 w - - 0 1");
        assert!(!is_square_attacked(&shielded, 4, Color::White));
    }

    #[test]
    fn queen_attacks_along_both_line_kinds() {
        let position = position_from("8/8/8/3q4/8/8/8/8 b - - 0 1");
        // d5 queen: d1 orthogonally, a2 diagonally.
        assert!(is_square_attacked(&position, 3, Color::Black));
        assert!(is_square_attacked(&position, 8, Color::Black));
        assert!(!is_square_attacked(&position, 18, Color::Black));
    }

    #[test]
    fn king_lookup_and_check_report() {
        let position = position_from("4k3/8/8/8/8/8/3R4/4K3 b - - 0 1");
        assert_eq!(king_square(&position, Color::Black), Some(60));
        assert_eq!(king_square(&position, Color::White), Some(4));
        assert!(!is_king_in_check(&position, Color::Black));

        let checked = position_from("4k3/8/8/8/8/8/8/4RK2 b - - 0 1");
        assert!(is_king_in_check(&checked, Color::Black));
        assert!(!is_king_in_check(&checked, Color::White));
    }

    #[test]
    fn kingless_board_is_never_in_check() {
        let position = position_from("8/8/8/3q4/8/8/8/8 w - - 0 1");
        assert_eq!(king_square(&position, Color::White), None);
        assert!(!is_king_in_check(&position, Color::White));
    }
}
