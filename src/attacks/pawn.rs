//! Pawn capture maps, one mask per origin square and color.

use crate::position::types::Color;

pub const PAWN_ATTACKS: [[u64; 64]; 2] = [
    generate_pawn_attacks(1),
    generate_pawn_attacks(-1),
];

/// Squares a pawn of `color` on `square` attacks diagonally.
#[inline]
pub const fn pawn_attacks(color: Color, square: u8) -> u64 {
    PAWN_ATTACKS[color.index()][square as usize]
}

const fn generate_pawn_attacks(forward: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        table[sq] =
            target_bit(file - 1, rank + forward) | target_bit(file + 1, rank + forward);
        sq += 1;
    }

    table
}

const fn target_bit(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << ((rank as usize) * 8 + (file as usize))
}
