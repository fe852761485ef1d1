//! Zobrist hashing: an explicit, immutable table of random keys built once
//! and passed by reference wherever positions are hashed or mutated.
//!
//! Keeping the table a value (instead of ambient global state) lets tests run
//! deterministic fixed tables side by side and keeps hashing free of hidden
//! initialization order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::position::board::Position;
use crate::position::types::{castling_flag, square_file, CastleSide, Color, PieceKind, Square};

/// Random keys for every hashable position feature.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    piece_square: [[[u64; 64]; 6]; 2],
    castling: [[u64; 2]; 2],
    en_passant_file: [u64; 8],
    side_to_move: u64,
}

impl ZobristTable {
    /// Seed used by every production entry point, so keys are stable across
    /// runs and log output stays comparable.
    pub const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for per_color in &mut piece_square {
            for per_kind in per_color.iter_mut() {
                for key in per_kind.iter_mut() {
                    *key = rng.random();
                }
            }
        }

        let mut castling = [[0u64; 2]; 2];
        for per_color in &mut castling {
            for key in per_color.iter_mut() {
                *key = rng.random();
            }
        }

        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.random();
        }

        ZobristTable {
            piece_square,
            castling,
            en_passant_file,
            side_to_move: rng.random(),
        }
    }

    /// Key for a `(color, kind, square)` occupancy term.
    #[inline]
    pub fn piece_square_key(&self, color: Color, kind: PieceKind, square: Square) -> u64 {
        self.piece_square[color.index()][kind.index()][square as usize]
    }

    /// Key for one castle right; hashed while that right is held.
    #[inline]
    pub fn castling_key(&self, color: Color, side: CastleSide) -> u64 {
        self.castling[color.index()][side.index()]
    }

    #[inline]
    pub fn en_passant_file_key(&self, file: u8) -> u64 {
        self.en_passant_file[file as usize]
    }

    /// Toggle key, hashed in whenever Black is to move.
    #[inline]
    pub fn side_to_move_key(&self) -> u64 {
        self.side_to_move
    }

    /// Hash of a position from scratch. Incremental maintenance in move
    /// application must always agree with this.
    pub fn compute_key(&self, position: &Position) -> u64 {
        let mut key = 0u64;

        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                let mut board = position.pieces[color.index()][kind.index()];
                while board != 0 {
                    let square = board.trailing_zeros() as Square;
                    key ^= self.piece_square_key(color, kind, square);
                    board &= board - 1;
                }
            }
        }

        for color in [Color::White, Color::Black] {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if position.castling_rights & castling_flag(color, side) != 0 {
                    key ^= self.castling_key(color, side);
                }
            }
        }

        if let Some(square) = position.en_passant_square {
            key ^= self.en_passant_file_key(square_file(square));
        }
        if position.side_to_move == Color::Black {
            key ^= self.side_to_move;
        }

        key
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}
