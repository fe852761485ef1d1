//! Perft: exhaustive move-path counting, the primary correctness oracle for
//! generation and application.
//!
//! The root fans out across one thread per root move; everything below the
//! root walks sequentially with clone-on-recurse, the same shape the search
//! uses.

use std::fs;
use std::path::Path;
use std::thread;

use crate::movegen::apply::apply_move;
use crate::movegen::generator::generate_legal_moves;
use crate::moves::encoding::{self, Move};
use crate::position::board::Position;
use crate::search::zobrist::ZobristTable;

/// Node totals plus per-kind leaf classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    pub fn merge(&mut self, other: PerftCounts) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passant += other.en_passant;
        self.castles += other.castles;
        self.promotions += other.promotions;
    }
}

/// Threaded perft: one worker per root move, merged after join.
pub fn perft(position: &Position, depth: u8, zobrist: &ZobristTable) -> PerftCounts {
    if depth == 0 {
        return PerftCounts { nodes: 1, ..PerftCounts::default() };
    }

    let root_moves = generate_legal_moves(position, zobrist);
    let mut totals = PerftCounts::default();

    thread::scope(|scope| {
        let mut workers = Vec::with_capacity(root_moves.len());
        for &mv in &root_moves {
            workers.push(scope.spawn(move || {
                let mut counts = PerftCounts::default();
                if depth == 1 {
                    count_leaf(mv, &mut counts);
                } else {
                    let mut next = position.clone();
                    apply_move(&mut next, mv, zobrist);
                    walk(&next, depth - 1, zobrist, &mut counts);
                }
                counts
            }));
        }
        for worker in workers {
            if let Ok(counts) = worker.join() {
                totals.merge(counts);
            }
        }
    });

    totals
}

/// Single-threaded perft, used below the root and directly by benchmarks.
pub fn perft_single_thread(position: &Position, depth: u8, zobrist: &ZobristTable) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    walk(position, depth, zobrist, &mut counts);
    counts
}

fn walk(position: &Position, depth: u8, zobrist: &ZobristTable, counts: &mut PerftCounts) {
    let moves = generate_legal_moves(position, zobrist);
    if depth == 1 {
        for &mv in &moves {
            count_leaf(mv, counts);
        }
        return;
    }
    for mv in moves {
        let mut next = position.clone();
        apply_move(&mut next, mv, zobrist);
        walk(&next, depth - 1, zobrist, counts);
    }
}

fn count_leaf(mv: Move, counts: &mut PerftCounts) {
    counts.nodes += 1;
    if encoding::captured_piece(mv).is_some() {
        counts.captures += 1;
    }
    if encoding::is_en_passant(mv) {
        counts.en_passant += 1;
    }
    if encoding::is_castling(mv) {
        counts.castles += 1;
    }
    if encoding::promotion_piece(mv).is_some() {
        counts.promotions += 1;
    }
}

/// One failed `D<depth>` check from an EPD suite line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpdMismatch {
    pub line_number: usize,
    pub fen: String,
    pub depth: u8,
    pub expected: u64,
    pub actual: u64,
}

#[derive(Debug, Default)]
pub struct EpdSummary {
    pub lines_checked: usize,
    pub checks_passed: usize,
    pub mismatches: Vec<EpdMismatch>,
}

impl EpdSummary {
    pub fn all_passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Runs every `FEN ;D1 n1 ;D2 n2 ...` line of an EPD file through perft up to
/// `max_depth` and collects pass totals and mismatches.
pub fn run_epd_suite(
    path: &Path,
    max_depth: u8,
    zobrist: &ZobristTable,
) -> Result<EpdSummary, String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    let mut summary = EpdSummary::default();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((fen_part, tail)) = line.split_once(';') else {
            continue;
        };
        let fen_text = fen_part.trim();
        let position = Position::from_fen(fen_text, zobrist)
            .map_err(|err| format!("line {}: bad FEN: {err}", index + 1))?;
        summary.lines_checked += 1;

        for depth in 1..=max_depth {
            let token = format!("D{depth} ");
            let Some(found) = tail.find(&token) else {
                continue;
            };
            let Some(value_text) = tail[found + token.len()..].split_whitespace().next() else {
                continue;
            };
            let Ok(expected) = value_text.parse::<u64>() else {
                continue;
            };

            let actual = perft(&position, depth, zobrist).nodes;
            if actual == expected {
                summary.checks_passed += 1;
            } else {
                summary.mismatches.push(EpdMismatch {
                    line_number: index + 1,
                    fen: fen_text.to_string(),
                    depth,
                    expected,
                    actual,
                });
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::rules::STARTING_POSITION_FEN;

    fn parse(fen: &str, zobrist: &ZobristTable) -> Position {
        Position::from_fen(fen, zobrist).expect("test FEN should parse")
    }

    #[test]
    fn starting_position_matches_the_oracle_counts() {
        let zobrist = ZobristTable::default();
        let position = Position::new_game(&zobrist);

        assert_eq!(perft_single_thread(&position, 0, &zobrist).nodes, 1);
        assert_eq!(perft_single_thread(&position, 1, &zobrist).nodes, 20);
        assert_eq!(perft_single_thread(&position, 2, &zobrist).nodes, 400);
        assert_eq!(perft_single_thread(&position, 3, &zobrist).nodes, 8_902);
        assert_eq!(perft(&position, 4, &zobrist).nodes, 197_281);
    }

    #[test]
    fn starting_position_depth_one_has_no_special_moves() {
        let zobrist = ZobristTable::default();
        let position = Position::new_game(&zobrist);
        let counts = perft(&position, 1, &zobrist);
        assert_eq!(
            counts,
            PerftCounts { nodes: 20, ..PerftCounts::default() }
        );
    }

    #[test]
    fn threaded_and_sequential_perft_agree() {
        let zobrist = ZobristTable::default();
        let position = Position::new_game(&zobrist);
        for depth in 1..=3u8 {
            assert_eq!(
                perft(&position, depth, &zobrist),
                perft_single_thread(&position, depth, &zobrist)
            );
        }
    }

    #[test]
    fn kiwipete_counts_include_castles_and_captures() {
        let zobrist = ZobristTable::default();
        let position = parse(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            &zobrist,
        );

        let depth_one = perft(&position, 1, &zobrist);
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);

        let depth_two = perft(&position, 2, &zobrist);
        assert_eq!(depth_two.nodes, 2_039);
        assert_eq!(depth_two.captures, 351);
        assert_eq!(depth_two.en_passant, 1);
        assert_eq!(depth_two.castles, 91);
    }

    #[test]
    fn endgame_position_counts_en_passant_paths() {
        let zobrist = ZobristTable::default();
        let position = parse("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", &zobrist);

        assert_eq!(perft(&position, 1, &zobrist).nodes, 14);
        assert_eq!(perft(&position, 2, &zobrist).nodes, 191);
        let depth_three = perft(&position, 3, &zobrist);
        assert_eq!(depth_three.nodes, 2_812);
        assert_eq!(depth_three.en_passant, 2);
    }

    #[test]
    fn promotion_heavy_position_counts_promotions() {
        let zobrist = ZobristTable::default();
        let position = parse("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1", &zobrist);

        let depth_one = perft(&position, 1, &zobrist);
        assert_eq!(depth_one.nodes, 24);
        assert_eq!(depth_one.promotions, 12);
        assert_eq!(perft(&position, 2, &zobrist).nodes, 496);
    }

    #[test]
    fn epd_suite_reports_passes_and_mismatches() {
        let zobrist = ZobristTable::default();
        let path = std::env::temp_dir().join(format!(
            "quince_perft_suite_{}.epd",
            std::process::id()
        ));
        let mut contents = String::new();
        contents.push_str(STARTING_POSITION_FEN);
        contents.push_str(" ;D1 20 ;D2 400\n");
        contents.push('\n');
        contents.push_str("4k3/8/8/8/8/8/8/4K3 w - - 0 1 ;D1 5 ;D2 25\n");
        contents.push_str("4k3/8/8/8/8/8/8/4K3 w - - 0 1 ;D1 99\n");
        fs::write(&path, contents).expect("temp EPD file should be writable");

        let summary = run_epd_suite(&path, 2, &zobrist).expect("suite should run");
        let _ = fs::remove_file(&path);

        assert_eq!(summary.lines_checked, 3);
        assert_eq!(summary.checks_passed, 4);
        assert_eq!(summary.mismatches.len(), 1);
        let mismatch = &summary.mismatches[0];
        assert_eq!(mismatch.depth, 1);
        assert_eq!(mismatch.expected, 99);
        assert_eq!(mismatch.actual, 5);
        assert_eq!(mismatch.line_number, 4);
        assert!(!summary.all_passed());
    }
}
