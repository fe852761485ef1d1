//! Packed move representation.
//!
//! A move is one `u64` word so move lists stay flat and copyable:
//! bits 0-5 source square, 6-11 destination square, 12-14 promotion piece code,
//! 15-17 captured piece code (codes: 0 none, 1 pawn .. 6 king), bit 18
//! en-passant capture, bit 19 castling, bit 20 double pawn push, bits 21-28 a
//! signed 8-bit auxiliary score. Everything above bit 28 is zero.

use crate::position::types::{PieceKind, Square};

pub type Move = u64;

/// The "no move" sentinel. Decodes as nothing moving from a1 to a1.
pub const NO_MOVE: Move = 0;

pub const FLAG_EN_PASSANT: Move = 1 << 18;
pub const FLAG_CASTLING: Move = 1 << 19;
pub const FLAG_DOUBLE_PUSH: Move = 1 << 20;

const SQUARE_MASK: u64 = 0x3F;
const PIECE_MASK: u64 = 0x7;
const SCORE_MASK: u64 = 0xFF;
const DEST_SHIFT: u32 = 6;
const PROMOTION_SHIFT: u32 = 12;
const CAPTURED_SHIFT: u32 = 15;
const SCORE_SHIFT: u32 = 21;

#[inline]
const fn piece_code(kind: Option<PieceKind>) -> u64 {
    match kind {
        None => 0,
        Some(kind) => kind.index() as u64 + 1,
    }
}

#[inline]
const fn piece_from_code(code: u64) -> Option<PieceKind> {
    match code {
        1 => Some(PieceKind::Pawn),
        2 => Some(PieceKind::Knight),
        3 => Some(PieceKind::Bishop),
        4 => Some(PieceKind::Rook),
        5 => Some(PieceKind::Queen),
        6 => Some(PieceKind::King),
        _ => None,
    }
}

/// Packs all move fields into one word. `flags` is an OR of the `FLAG_*` bits.
#[inline]
pub const fn encode_move(
    source: Square,
    dest: Square,
    promotion: Option<PieceKind>,
    captured: Option<PieceKind>,
    flags: Move,
    score: i8,
) -> Move {
    (source as u64 & SQUARE_MASK)
        | ((dest as u64 & SQUARE_MASK) << DEST_SHIFT)
        | (piece_code(promotion) << PROMOTION_SHIFT)
        | (piece_code(captured) << CAPTURED_SHIFT)
        | flags
        | ((score as u8 as u64) << SCORE_SHIFT)
}

#[inline]
pub const fn source_square(mv: Move) -> Square {
    (mv & SQUARE_MASK) as Square
}

#[inline]
pub const fn dest_square(mv: Move) -> Square {
    ((mv >> DEST_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub const fn promotion_piece(mv: Move) -> Option<PieceKind> {
    piece_from_code((mv >> PROMOTION_SHIFT) & PIECE_MASK)
}

#[inline]
pub const fn captured_piece(mv: Move) -> Option<PieceKind> {
    piece_from_code((mv >> CAPTURED_SHIFT) & PIECE_MASK)
}

#[inline]
pub const fn is_en_passant(mv: Move) -> bool {
    mv & FLAG_EN_PASSANT != 0
}

#[inline]
pub const fn is_castling(mv: Move) -> bool {
    mv & FLAG_CASTLING != 0
}

#[inline]
pub const fn is_double_push(mv: Move) -> bool {
    mv & FLAG_DOUBLE_PUSH != 0
}

/// Sign-extends the 8-bit score field.
#[inline]
pub const fn move_score(mv: Move) -> i8 {
    ((mv >> SCORE_SHIFT) & SCORE_MASK) as u8 as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_double_push_layout_matches_contract() {
        // e2 (12) to e4 (28), double-push flag, nothing else set.
        let mv = encode_move(12, 28, None, None, FLAG_DOUBLE_PUSH, 0);
        assert_eq!(mv, 12 | (28 << 6) | (1 << 20));
        assert_eq!(source_square(mv), 12);
        assert_eq!(dest_square(mv), 28);
        assert!(is_double_push(mv));
        assert!(!is_en_passant(mv));
        assert!(!is_castling(mv));
        assert_eq!(promotion_piece(mv), None);
        assert_eq!(captured_piece(mv), None);
    }

    #[test]
    fn promotion_capture_round_trips_every_field() {
        let mv = encode_move(
            48,
            57,
            Some(PieceKind::Queen),
            Some(PieceKind::Rook),
            0,
            0,
        );
        assert_eq!(source_square(mv), 48);
        assert_eq!(dest_square(mv), 57);
        assert_eq!(promotion_piece(mv), Some(PieceKind::Queen));
        assert_eq!(captured_piece(mv), Some(PieceKind::Rook));
        assert_eq!(mv >> 12 & 0x7, 5);
        assert_eq!(mv >> 15 & 0x7, 4);
    }

    #[test]
    fn en_passant_and_castle_flags_are_independent_bits() {
        let ep = encode_move(28, 21, None, Some(PieceKind::Pawn), FLAG_EN_PASSANT, 0);
        assert!(is_en_passant(ep));
        assert!(!is_castling(ep));
        let castle = encode_move(4, 6, None, None, FLAG_CASTLING, 0);
        assert!(is_castling(castle));
        assert!(!is_en_passant(castle));
        assert!(!is_double_push(castle));
    }

    #[test]
    fn score_field_sign_extends() {
        let plus = encode_move(0, 1, None, None, 0, 27);
        assert_eq!(move_score(plus), 27);
        let minus = encode_move(0, 1, None, None, 0, -96);
        assert_eq!(move_score(minus), -96);
        // Score bits stay above the flag fields.
        assert_eq!(source_square(minus), 0);
        assert_eq!(dest_square(minus), 1);
        assert!(!is_double_push(minus));
    }

    #[test]
    fn no_move_sentinel_decodes_as_empty() {
        assert_eq!(source_square(NO_MOVE), 0);
        assert_eq!(dest_square(NO_MOVE), 0);
        assert_eq!(promotion_piece(NO_MOVE), None);
        assert_eq!(captured_piece(NO_MOVE), None);
        assert_eq!(move_score(NO_MOVE), 0);
    }
}
