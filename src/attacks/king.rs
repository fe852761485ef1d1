//! King step maps, one mask per origin square.

const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: u8) -> u64 {
    KING_ATTACKS[square as usize]
}

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut offset = 0usize;

        while offset < KING_OFFSETS.len() {
            let (file_step, rank_step) = KING_OFFSETS[offset];
            attacks |= target_bit(file + file_step, rank + rank_step);
            offset += 1;
        }

        table[sq] = attacks;
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

#[cfg(test)]
mod tests {
    use super::king_attacks;

    #[test]
    fn king_in_the_middle_reaches_eight_squares() {
        assert_eq!(king_attacks(27).count_ones(), 8);
    }

    #[test]
    fn king_in_the_corner_reaches_three_squares() {
        let a1 = 0u8;
        assert_eq!(king_attacks(a1), (1u64 << 1) | (1u64 << 8) | (1u64 << 9));
    }

    #[test]
    fn king_never_attacks_its_own_square() {
        for square in 0..64u8 {
            assert_eq!(king_attacks(square) & (1u64 << square), 0);
        }
    }
}
