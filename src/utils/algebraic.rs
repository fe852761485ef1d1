//! Coordinate text for single squares, "e4" style.

use crate::position::types::{make_square, square_file, square_rank, Square};

/// Parses a two-character coordinate such as "e4" into a square index.
#[inline]
pub fn square_from_text(text: &str) -> Result<Square, String> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("invalid square: {text}"));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("invalid file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("invalid rank: {}", rank as char));
    }

    Ok(make_square(file - b'a', rank - b'1'))
}

/// Renders a square index as its two-character coordinate.
#[inline]
pub fn square_to_text(square: Square) -> String {
    let file = char::from(b'a' + square_file(square));
    let rank = char::from(b'1' + square_rank(square));
    format!("{file}{rank}")
}
