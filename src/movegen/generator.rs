//! Pseudo-legal move generation and the clone-apply-test legality filter.
//!
//! Generation is square-major: each board square in ascending order emits its
//! piece's moves before the next square is visited. Within one piece the
//! destination order follows bitboard scan order (lowest square first), and
//! promotions fan out queen, rook, bishop, knight.

use crate::attacks::detection::{is_square_attacked, king_square};
use crate::attacks::king::king_attacks;
use crate::attacks::knight::knight_attacks;
use crate::attacks::pawn::pawn_attacks;
use crate::attacks::sliding::{bishop_attacks, rook_attacks};
use crate::movegen::apply::apply_move;
use crate::moves::encoding::{
    encode_move, Move, FLAG_CASTLING, FLAG_DOUBLE_PUSH, FLAG_EN_PASSANT,
};
use crate::position::board::Position;
use crate::position::rules::{king_home_square, B1, B8, C1, C8, D1, D8, F1, F8, G1, G8, MAX_MOVES};
use crate::position::types::{castling_flag, square_rank, CastleSide, Color, PieceKind, Square};
use crate::search::zobrist::ZobristTable;

const PROMOTION_ORDER: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Moves that are legal to play: pseudo-legal moves minus everything that
/// would leave the mover's own king attacked.
pub fn generate_legal_moves(position: &Position, zobrist: &ZobristTable) -> Vec<Move> {
    generate_pseudo_legal_moves(position)
        .into_iter()
        .filter(|&mv| keeps_own_king_safe(position, mv, zobrist))
        .collect()
}

/// Moves that obey piece movement rules but may expose the own king.
pub fn generate_pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(MAX_MOVES);
    let mover = position.side_to_move;
    let occupancy = position.all_occupancy();

    for square in 0..64u8 {
        match position.piece_kind_at(mover, square) {
            Some(PieceKind::Pawn) => pawn_moves(position, square, &mut moves),
            Some(PieceKind::Knight) => {
                push_targets(position, square, knight_attacks(square), &mut moves)
            }
            Some(PieceKind::Bishop) => {
                push_targets(position, square, bishop_attacks(square, occupancy), &mut moves)
            }
            Some(PieceKind::Rook) => {
                push_targets(position, square, rook_attacks(square, occupancy), &mut moves)
            }
            Some(PieceKind::Queen) => {
                push_targets(position, square, bishop_attacks(square, occupancy), &mut moves);
                push_targets(position, square, rook_attacks(square, occupancy), &mut moves);
            }
            Some(PieceKind::King) => {
                push_targets(position, square, king_attacks(square), &mut moves);
                castle_moves(position, square, &mut moves);
            }
            None => {}
        }
    }

    moves
}

/// Emits one move per target square, skipping own-piece squares and recording
/// the captured kind on enemy squares.
fn push_targets(position: &Position, source: Square, targets: u64, moves: &mut Vec<Move>) {
    let mover = position.side_to_move;
    let opponent = mover.opposite();
    let mut remaining = targets & !position.occupancy[mover.index()];

    while remaining != 0 {
        let dest = remaining.trailing_zeros() as Square;
        let captured = position.piece_kind_at(opponent, dest);
        moves.push(encode_move(source, dest, None, captured, 0, 0));
        remaining &= remaining - 1;
    }
}

fn pawn_moves(position: &Position, source: Square, moves: &mut Vec<Move>) {
    let mover = position.side_to_move;
    let opponent = mover.opposite();
    let occupancy = position.all_occupancy();
    let rank = square_rank(source);

    let (forward, home_rank, pre_promotion_rank, last_rank) = match mover {
        Color::White => (8i8, 1u8, 6u8, 7u8),
        Color::Black => (-8i8, 6u8, 1u8, 0u8),
    };
    if rank == last_rank {
        return;
    }

    let push_dest = (source as i8 + forward) as Square;
    if occupancy & (1u64 << push_dest) == 0 {
        push_pawn_move(source, push_dest, None, 0, rank == pre_promotion_rank, moves);
        if rank == home_rank {
            let double_dest = (source as i8 + 2 * forward) as Square;
            if occupancy & (1u64 << double_dest) == 0 {
                moves.push(encode_move(source, double_dest, None, None, FLAG_DOUBLE_PUSH, 0));
            }
        }
    }

    let mut captures = pawn_attacks(mover, source) & position.occupancy[opponent.index()];
    while captures != 0 {
        let dest = captures.trailing_zeros() as Square;
        let captured = position.piece_kind_at(opponent, dest);
        push_pawn_move(source, dest, captured, 0, rank == pre_promotion_rank, moves);
        captures &= captures - 1;
    }

    if let Some(ep_square) = position.en_passant_square {
        if pawn_attacks(mover, source) & (1u64 << ep_square) != 0
            && occupancy & (1u64 << ep_square) == 0
        {
            moves.push(encode_move(
                source,
                ep_square,
                None,
                Some(PieceKind::Pawn),
                FLAG_EN_PASSANT,
                0,
            ));
        }
    }
}

fn push_pawn_move(
    source: Square,
    dest: Square,
    captured: Option<PieceKind>,
    flags: Move,
    promotes: bool,
    moves: &mut Vec<Move>,
) {
    if promotes {
        for kind in PROMOTION_ORDER {
            moves.push(encode_move(source, dest, Some(kind), captured, flags, 0));
        }
    } else {
        moves.push(encode_move(source, dest, None, captured, flags, 0));
    }
}

fn castle_moves(position: &Position, source: Square, moves: &mut Vec<Move>) {
    let mover = position.side_to_move;
    if source != king_home_square(mover) {
        return;
    }
    let opponent = mover.opposite();
    let occupancy = position.all_occupancy();
    let (f_square, g_square, d_square, c_square, b_square) = match mover {
        Color::White => (F1, G1, D1, C1, B1),
        Color::Black => (F8, G8, D8, C8, B8),
    };

    if position.castling_rights & castling_flag(mover, CastleSide::Kingside) != 0
        && occupancy & ((1u64 << f_square) | (1u64 << g_square)) == 0
        && !is_square_attacked(position, source, opponent)
        && !is_square_attacked(position, f_square, opponent)
        && !is_square_attacked(position, g_square, opponent)
    {
        moves.push(encode_move(source, g_square, None, None, FLAG_CASTLING, 0));
    }

    // The b-file square only has to be empty, not safe; the king never
    // crosses it.
    if position.castling_rights & castling_flag(mover, CastleSide::Queenside) != 0
        && occupancy & ((1u64 << d_square) | (1u64 << c_square) | (1u64 << b_square)) == 0
        && !is_square_attacked(position, source, opponent)
        && !is_square_attacked(position, d_square, opponent)
        && !is_square_attacked(position, c_square, opponent)
    {
        moves.push(encode_move(source, c_square, None, None, FLAG_CASTLING, 0));
    }
}

fn keeps_own_king_safe(position: &Position, mv: Move, zobrist: &ZobristTable) -> bool {
    let mover = position.side_to_move;
    let mut next = position.clone();
    apply_move(&mut next, mv, zobrist);
    match king_square(&next, mover) {
        Some(square) => !is_square_attacked(&next, square, mover.opposite()),
        None => true,
    }
}
