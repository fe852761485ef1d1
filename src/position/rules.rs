//! Fixed rule constants: the starting position and the named squares the
//! castling logic is anchored to.

use crate::position::types::{CastleSide, Color, Square};

pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Upper bound on moves in any reachable position; used as a capacity hint.
pub const MAX_MOVES: usize = 218;

pub const A1: Square = 0;
pub const B1: Square = 1;
pub const C1: Square = 2;
pub const D1: Square = 3;
pub const E1: Square = 4;
pub const F1: Square = 5;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const B8: Square = 57;
pub const C8: Square = 58;
pub const D8: Square = 59;
pub const E8: Square = 60;
pub const F8: Square = 61;
pub const G8: Square = 62;
pub const H8: Square = 63;

/// Square a king must stand on for its castle moves to exist.
#[inline]
pub const fn king_home_square(color: Color) -> Square {
    match color {
        Color::White => E1,
        Color::Black => E8,
    }
}

/// Corner square a rook must leave (or be captured on) to void a castle right.
#[inline]
pub const fn rook_home_square(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => H1,
        (Color::White, CastleSide::Queenside) => A1,
        (Color::Black, CastleSide::Kingside) => H8,
        (Color::Black, CastleSide::Queenside) => A8,
    }
}
