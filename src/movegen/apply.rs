//! In-place move application with incremental hash maintenance.
//!
//! The caller guarantees the move came from the generator for this position;
//! nothing here re-validates legality. Every board mutation XORs the matching
//! Zobrist key so the position's hash stays equal to a from-scratch recompute.

use crate::moves::encoding::{self, Move};
use crate::position::board::Position;
use crate::position::rules::{
    king_home_square, rook_home_square, A1, A8, C1, C8, D1, D8, F1, F8, G1, G8, H1, H8,
};
use crate::position::types::{castling_flag, square_file, CastleSide, Color, PieceKind};
use crate::search::zobrist::ZobristTable;

pub fn apply_move(position: &mut Position, mv: Move, zobrist: &ZobristTable) {
    let mover = position.side_to_move;
    let opponent = mover.opposite();
    let source = encoding::source_square(mv);
    let dest = encoding::dest_square(mv);
    let source_mask = 1u64 << source;
    let dest_mask = 1u64 << dest;
    let promotion = encoding::promotion_piece(mv);

    // A promotion always moves a pawn, whatever lands on the destination.
    let moving_kind = match promotion {
        Some(_) => PieceKind::Pawn,
        None => match position.piece_kind_at(mover, source) {
            Some(kind) => kind,
            None => return,
        },
    };

    position.remove_piece(mover, moving_kind, source_mask);
    position.zobrist_key ^= zobrist.piece_square_key(mover, moving_kind, source);

    if let Some(captured) = encoding::captured_piece(mv) {
        if !encoding::is_en_passant(mv) {
            position.remove_piece(opponent, captured, dest_mask);
            position.zobrist_key ^= zobrist.piece_square_key(opponent, captured, dest);
            if captured == PieceKind::Rook {
                if dest == rook_home_square(opponent, CastleSide::Kingside) {
                    revoke_right(position, zobrist, opponent, CastleSide::Kingside);
                } else if dest == rook_home_square(opponent, CastleSide::Queenside) {
                    revoke_right(position, zobrist, opponent, CastleSide::Queenside);
                }
            }
        }
    }

    let placed_kind = promotion.unwrap_or(moving_kind);
    position.place_piece(mover, placed_kind, dest_mask);
    position.zobrist_key ^= zobrist.piece_square_key(mover, placed_kind, dest);

    if moving_kind == PieceKind::Rook {
        if source == rook_home_square(mover, CastleSide::Kingside) {
            revoke_right(position, zobrist, mover, CastleSide::Kingside);
        } else if source == rook_home_square(mover, CastleSide::Queenside) {
            revoke_right(position, zobrist, mover, CastleSide::Queenside);
        }
    } else if moving_kind == PieceKind::King && source == king_home_square(mover) {
        revoke_right(position, zobrist, mover, CastleSide::Kingside);
        revoke_right(position, zobrist, mover, CastleSide::Queenside);
    }

    // The old en-passant file hashes out even when the square only clears.
    if let Some(old_square) = position.en_passant_square {
        position.zobrist_key ^= zobrist.en_passant_file_key(square_file(old_square));
    }
    if encoding::is_double_push(mv) {
        let passed_over = (source + dest) / 2;
        position.en_passant_square = Some(passed_over);
        position.zobrist_key ^= zobrist.en_passant_file_key(square_file(passed_over));
    } else {
        position.en_passant_square = None;
    }

    if encoding::is_en_passant(mv) {
        let behind = match mover {
            Color::White => dest - 8,
            Color::Black => dest + 8,
        };
        position.remove_piece(opponent, PieceKind::Pawn, 1u64 << behind);
        position.zobrist_key ^= zobrist.piece_square_key(opponent, PieceKind::Pawn, behind);
    }

    if encoding::is_castling(mv) {
        let relocation = match (mover, dest) {
            (Color::White, G1) => Some((H1, F1)),
            (Color::White, C1) => Some((A1, D1)),
            (Color::Black, G8) => Some((H8, F8)),
            (Color::Black, C8) => Some((A8, D8)),
            _ => None,
        };
        if let Some((rook_source, rook_dest)) = relocation {
            position.remove_piece(mover, PieceKind::Rook, 1u64 << rook_source);
            position.zobrist_key ^= zobrist.piece_square_key(mover, PieceKind::Rook, rook_source);
            position.place_piece(mover, PieceKind::Rook, 1u64 << rook_dest);
            position.zobrist_key ^= zobrist.piece_square_key(mover, PieceKind::Rook, rook_dest);
        }
        revoke_right(position, zobrist, mover, CastleSide::Kingside);
        revoke_right(position, zobrist, mover, CastleSide::Queenside);
    }

    position.side_to_move = opponent;
    position.zobrist_key ^= zobrist.side_to_move_key();
}

/// Clears one castle right and hashes it out, but only while it is still held;
/// a second revocation must not toggle the key back in.
fn revoke_right(position: &mut Position, zobrist: &ZobristTable, color: Color, side: CastleSide) {
    let flag = castling_flag(color, side);
    if position.castling_rights & flag != 0 {
        position.castling_rights &= !flag;
        position.zobrist_key ^= zobrist.castling_key(color, side);
    }
}
