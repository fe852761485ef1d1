//! Slider attacks: blocker-aware ray walks for bishops, rooks, and queens.
//!
//! A ray includes the first occupied square it meets (a potential capture) and
//! stops there. Callers mask own-side squares out themselves.

const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[inline]
pub fn bishop_attacks(square: u8, occupancy: u64) -> u64 {
    walk_rays(square, occupancy, &DIAGONAL_DIRECTIONS)
}

#[inline]
pub fn rook_attacks(square: u8, occupancy: u64) -> u64 {
    walk_rays(square, occupancy, &ORTHOGONAL_DIRECTIONS)
}

#[inline]
pub fn queen_attacks(square: u8, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn walk_rays(square: u8, occupancy: u64, directions: &[(i32, i32); 4]) -> u64 {
    let origin_file = (square % 8) as i32;
    let origin_rank = (square / 8) as i32;
    let mut attacks = 0u64;

    for &(file_step, rank_step) in directions {
        let mut file = origin_file + file_step;
        let mut rank = origin_rank + rank_step;

        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;

            if occupancy & bit != 0 {
                break;
            }

            file += file_step;
            rank += rank_step;
        }
    }

    attacks
}
