//! Board scoring from the side-to-move perspective.
//!
//! Scores are centipawns. Positive favors the player whose turn it is, which
//! lets the negamax driver negate scores instead of branching on color.

use crate::position::board::Position;
use crate::position::types::{Color, PieceKind};

/// Score granted for delivering checkmate, before depth adjustment.
pub const MATE_SCORE: i32 = 100_000;
/// Score of a drawn line (stalemate or threefold repetition).
pub const DRAW_SCORE: i32 = 0;

/// Anything that can put a number on a position.
pub trait BoardScorer: Send + Sync {
    fn score(&self, position: &Position) -> i32;
}

/// Material count plus a handful of placement terms for knights and pawns.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialPositionalScorer;

const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 333,
        PieceKind::Rook => 510,
        PieceKind::Queen => 950,
        PieceKind::King => 10_000,
    }
}

// The four central squares (d4, e4, d5, e5).
const CENTRAL_SQUARES: u64 = 0x0000_0018_1800_0000;
const CORNER_SQUARES: u64 = 0x8100_0000_0000_0081;
// Board edge minus the corners.
const RIM_SQUARES: u64 = 0x7E81_8181_8181_817E;

// Natural development squares for the knights (c3/f3, c6/f6).
const WHITE_KNIGHT_POSTS: u64 = 0x0000_0000_0024_0000;
const BLACK_KNIGHT_POSTS: u64 = 0x0000_2400_0000_0000;

// Ranks 6-7 for White, ranks 2-3 for Black: pawns deep in enemy territory.
const WHITE_ADVANCED_PAWNS: u64 = 0x00FF_FF00_0000_0000;
const BLACK_ADVANCED_PAWNS: u64 = 0x0000_0000_00FF_FF00;

impl BoardScorer for MaterialPositionalScorer {
    fn score(&self, position: &Position) -> i32 {
        let mut white = side_score(position, Color::White);
        let mut black = side_score(position, Color::Black);
        if position.side_to_move == Color::Black {
            std::mem::swap(&mut white, &mut black);
        }
        white - black
    }
}

fn side_score(position: &Position, side: Color) -> i32 {
    let mut total = 0;

    for kind in PieceKind::ALL {
        let board = position.pieces[side.index()][kind.index()];
        total += board.count_ones() as i32 * piece_value(kind);
    }

    let knights = position.pieces[side.index()][PieceKind::Knight.index()];
    let posts = match side {
        Color::White => WHITE_KNIGHT_POSTS,
        Color::Black => BLACK_KNIGHT_POSTS,
    };
    total += knight_placement(knights, posts);

    let pawns = position.pieces[side.index()][PieceKind::Pawn.index()];
    let advanced = match side {
        Color::White => WHITE_ADVANCED_PAWNS,
        Color::Black => BLACK_ADVANCED_PAWNS,
    };
    total += (pawns & advanced).count_ones() as i32 * 20;

    total
}

fn knight_placement(knights: u64, posts: u64) -> i32 {
    let mut bonus = 0;
    bonus += (knights & CENTRAL_SQUARES).count_ones() as i32 * 10;
    bonus += (knights & posts).count_ones() as i32 * 10;
    bonus -= (knights & CORNER_SQUARES).count_ones() as i32 * 20;
    bonus -= (knights & RIM_SQUARES).count_ones() as i32 * 10;
    bonus
}

// Home squares for the pieces the opening wants moved.
const WHITE_HOME_BISHOPS: u64 = 0x0000_0000_0000_0024;
const WHITE_HOME_KNIGHTS: u64 = 0x0000_0000_0000_0042;
const WHITE_HOME_CENTRAL_PAWNS: u64 = 0x0000_0000_0000_1800;
const BLACK_HOME_BISHOPS: u64 = 0x2400_0000_0000_0000;
const BLACK_HOME_KNIGHTS: u64 = 0x4200_0000_0000_0000;
const BLACK_HOME_CENTRAL_PAWNS: u64 = 0x0018_0000_0000_0000;

/// Penalty charged at the search root against the side that just moved, to
/// push the opening toward developing minor pieces and freeing the center.
pub fn development_penalty(position: &Position, side: Color) -> i32 {
    let (home_bishops, home_knights, home_pawns) = match side {
        Color::White => (
            WHITE_HOME_BISHOPS,
            WHITE_HOME_KNIGHTS,
            WHITE_HOME_CENTRAL_PAWNS,
        ),
        Color::Black => (
            BLACK_HOME_BISHOPS,
            BLACK_HOME_KNIGHTS,
            BLACK_HOME_CENTRAL_PAWNS,
        ),
    };

    let bishops = position.pieces[side.index()][PieceKind::Bishop.index()];
    let knights = position.pieces[side.index()][PieceKind::Knight.index()];
    let pawns = position.pieces[side.index()][PieceKind::Pawn.index()];

    let mut penalty = 0;
    penalty += (bishops & home_bishops).count_ones() as i32 * 10;
    penalty += (knights & home_knights).count_ones() as i32 * 10;
    if pawns & home_pawns == home_pawns {
        penalty += 200;
    }
    penalty
}
