//! FEN parsing and generation for `Position`.
//!
//! The four core fields (board, side, castling, en passant) are required and
//! validated. Move clocks are accepted but not tracked, so generated FEN
//! always carries `0 1` as its tail.

use crate::position::board::Position;
use crate::position::types::{
    CastlingRights, Color, PieceKind, Square, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
    CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};
use crate::search::zobrist::ZobristTable;
use crate::utils::algebraic::{square_from_text, square_to_text};

pub fn parse_fen(text: &str, zobrist: &ZobristTable) -> Result<Position, String> {
    let mut parts = text.split_whitespace();

    let board_part = parts.next().ok_or("missing board layout in FEN")?;
    let side_part = parts.next().ok_or("missing side to move in FEN")?;
    let castling_part = parts.next().ok_or("missing castling rights in FEN")?;
    let en_passant_part = parts.next().ok_or("missing en passant square in FEN")?;
    // Halfmove clock and fullmove number are accepted but not tracked.

    let mut position = Position::empty();
    parse_board(board_part, &mut position)?;
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castling_rights = parse_castling_rights(castling_part)?;
    position.en_passant_square = parse_en_passant_square(en_passant_part)?;
    position.zobrist_key = zobrist.compute_key(&position);

    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("board layout must contain 8 ranks".to_owned());
    }

    for (fen_rank_index, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_index as u8;
        let mut file = 0u8;

        for ch in rank_text.chars() {
            if let Some(count) = ch.to_digit(10) {
                if !(1..=8).contains(&count) {
                    return Err(format!("invalid empty-square count '{ch}'"));
                }
                file += count as u8;
                if file > 8 {
                    return Err(format!("rank {} has too many files", rank + 1));
                }
                continue;
            }

            let (color, kind) = piece_from_letter(ch)
                .ok_or_else(|| format!("invalid piece letter '{ch}' in board layout"))?;
            if file >= 8 {
                return Err(format!("rank {} has too many files", rank + 1));
            }
            position.place_piece(color, kind, 1u64 << (rank * 8 + file));
            file += 1;
        }

        if file != 8 {
            return Err(format!("rank {} does not sum to 8 files", rank + 1));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(format!("invalid side-to-move field: {side_part}")),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, String> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(format!("invalid castling rights character: {ch}")),
        }
    }
    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    Ok(Some(square_from_text(en_passant_part)?))
}

pub fn piece_from_letter(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}

pub fn piece_letter(color: Color, kind: PieceKind) -> char {
    let lower = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match color {
        Color::White => lower.to_ascii_uppercase(),
        Color::Black => lower,
    }
}

/// Castling rights as FEN text, `-` when no right remains.
pub fn castling_text(rights: CastlingRights) -> String {
    if rights == 0 {
        return "-".to_owned();
    }
    let mut out = String::new();
    if rights & CASTLE_WHITE_KINGSIDE != 0 {
        out.push('K');
    }
    if rights & CASTLE_WHITE_QUEENSIDE != 0 {
        out.push('Q');
    }
    if rights & CASTLE_BLACK_KINGSIDE != 0 {
        out.push('k');
    }
    if rights & CASTLE_BLACK_QUEENSIDE != 0 {
        out.push('q');
    }
    out
}

pub fn generate_fen(position: &Position) -> String {
    let mut out = String::new();

    for fen_rank_index in 0..8u8 {
        let rank = 7 - fen_rank_index;
        let mut empty_run = 0;
        for file in 0..8u8 {
            match position.piece_at(rank * 8 + file) {
                Some((color, kind)) => {
                    if empty_run > 0 {
                        out.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    out.push(piece_letter(color, kind));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match position.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });
    out.push(' ');
    out.push_str(&castling_text(position.castling_rights));
    out.push(' ');
    match position.en_passant_square {
        Some(square) => out.push_str(&square_to_text(square)),
        None => out.push('-'),
    }
    out.push_str(" 0 1");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::rules::STARTING_POSITION_FEN;

    #[test]
    fn starting_fen_populates_every_field() {
        let zobrist = ZobristTable::default();
        let position = parse_fen(STARTING_POSITION_FEN, &zobrist).expect("should parse");

        assert_eq!(position.side_to_move, Color::White);
        assert_eq!(position.castling_rights, 0b1111);
        assert_eq!(position.en_passant_square, None);
        assert_eq!(
            position.pieces[Color::White.index()][PieceKind::Pawn.index()],
            0x0000_0000_0000_FF00
        );
        assert_eq!(
            position.pieces[Color::Black.index()][PieceKind::King.index()],
            1 << 60
        );
        assert_eq!(position.all_occupancy().count_ones(), 32);
        assert_eq!(position.zobrist_key, zobrist.compute_key(&position));
    }

    #[test]
    fn generate_reproduces_the_parsed_text() {
        let zobrist = ZobristTable::default();
        for fen in [
            STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        ] {
            let position = parse_fen(fen, &zobrist).expect("should parse");
            assert_eq!(generate_fen(&position), fen);
        }
    }

    #[test]
    fn clocks_are_optional() {
        let zobrist = ZobristTable::default();
        let with = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 12 34", &zobrist).expect("should parse");
        let without = parse_fen("4k3/8/8/8/8/8/8/4K3 w - -", &zobrist).expect("should parse");
        assert_eq!(with, without);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        let zobrist = ZobristTable::default();
        assert!(parse_fen("", &zobrist).is_err());
        assert!(parse_fen("8/8/8/8/8/8/8 w - -", &zobrist).is_err());
        assert!(parse_fen("9/8/8/8/8/8/8/8 w - -", &zobrist).is_err());
        assert!(parse_fen("x7/8/8/8/8/8/8/8 w - -", &zobrist).is_err());
        assert!(parse_fen("ppppppppp/8/8/8/8/8/8/8 w - -", &zobrist).is_err());
        assert!(parse_fen("8888/8/8/8/8/8/8/8 w - -", &zobrist).is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 white - -", &zobrist).is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w KQxq -", &zobrist).is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - e9", &zobrist).is_err());
    }
}
