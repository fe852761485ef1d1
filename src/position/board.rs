//! Bitboard position state and the bookkeeping that keeps the piece boards,
//! occupancy caches, and hash key consistent with each other.

use crate::position::rules::STARTING_POSITION_FEN;
use crate::position::types::{CastlingRights, Color, PieceKind, Square};
use crate::search::zobrist::ZobristTable;
use crate::utils::fen;

/// One chess position.
///
/// Fields are public on purpose: move application, generation, and scoring all
/// read them directly, and the mutating helpers below keep the occupancy
/// caches in step with the piece boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Piece bitboards keyed `[color][kind]`.
    pub pieces: [[u64; 6]; 2],
    /// Per-side occupancy, always the union of that side's piece boards.
    pub occupancy: [u64; 2],
    pub side_to_move: Color,
    /// Square a double push just passed over, if any.
    pub en_passant_square: Option<Square>,
    pub castling_rights: CastlingRights,
    /// Incrementally maintained Zobrist key of this position.
    pub zobrist_key: u64,
}

impl Position {
    /// Empty board, White to move, no rights, zero key.
    pub fn empty() -> Self {
        Position {
            pieces: [[0; 6]; 2],
            occupancy: [0; 2],
            side_to_move: Color::White,
            en_passant_square: None,
            castling_rights: 0,
            zobrist_key: 0,
        }
    }

    /// The standard starting position.
    pub fn new_game(zobrist: &ZobristTable) -> Self {
        fen::parse_fen(STARTING_POSITION_FEN, zobrist)
            .expect("the starting position FEN always parses")
    }

    pub fn from_fen(text: &str, zobrist: &ZobristTable) -> Result<Self, String> {
        fen::parse_fen(text, zobrist)
    }

    pub fn to_fen(&self) -> String {
        fen::generate_fen(self)
    }

    #[inline]
    pub fn all_occupancy(&self) -> u64 {
        self.occupancy[0] | self.occupancy[1]
    }

    #[inline]
    pub fn place_piece(&mut self, color: Color, kind: PieceKind, mask: u64) {
        self.pieces[color.index()][kind.index()] |= mask;
        self.occupancy[color.index()] |= mask;
    }

    #[inline]
    pub fn remove_piece(&mut self, color: Color, kind: PieceKind, mask: u64) {
        self.pieces[color.index()][kind.index()] &= !mask;
        self.occupancy[color.index()] &= !mask;
    }

    /// Which of `color`'s pieces stands on `square`, if any.
    pub fn piece_kind_at(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = 1u64 << square;
        if self.occupancy[color.index()] & mask == 0 {
            return None;
        }
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
    }

    /// Owner and kind on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        for color in [Color::White, Color::Black] {
            if let Some(kind) = self.piece_kind_at(color, square) {
                return Some((color, kind));
            }
        }
        None
    }
}
