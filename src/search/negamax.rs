//! Negamax alpha-beta search with a thread-per-root-move fan-out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::movegen::generator::generate_legal_moves;
use crate::moves::encoding::Move;
use crate::position::game::Game;
use crate::search::scoring::{development_penalty, BoardScorer, DRAW_SCORE, MATE_SCORE};
use crate::search::zobrist::ZobristTable;
use crate::utils::long_algebraic::move_to_text;

/// Window bound. Larger than any reachable score, including mates.
pub const INFINITY_SCORE: i32 = 1_000_000;

/// What a finished search hands back to the caller.
#[derive(Debug, Clone)]
pub struct SearchSummary {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub nodes_visited: u64,
    pub elapsed: std::time::Duration,
    pub info_lines: Vec<String>,
}

struct RootBest {
    mv: Move,
    score: i32,
}

/// Searches `depth` plies ahead and picks the best root move.
///
/// Every root move gets its own thread and its own full window; results meet
/// in a mutex and the strictly best score wins, so the first-listed move is
/// kept on ties.
pub fn search_best_move(
    game: &Game,
    depth: u8,
    scorer: &dyn BoardScorer,
    zobrist: &ZobristTable,
) -> SearchSummary {
    let depth = depth.max(1);
    let started = Instant::now();
    let nodes = AtomicU64::new(0);
    let mut info_lines = Vec::new();

    let root_moves = generate_legal_moves(&game.position, zobrist);
    if root_moves.is_empty() {
        let score = if crate::attacks::detection::is_king_in_check(
            &game.position,
            game.position.side_to_move,
        ) {
            -(MATE_SCORE + depth as i32)
        } else {
            DRAW_SCORE
        };
        return SearchSummary {
            best_move: None,
            best_score: score,
            nodes_visited: 0,
            elapsed: started.elapsed(),
            info_lines,
        };
    }

    let best = Mutex::new(RootBest { mv: root_moves[0], score: -INFINITY_SCORE - 1 });
    let mover = game.position.side_to_move;

    let per_move: Vec<(Move, i32, i32)> = std::thread::scope(|scope| {
        let mut workers = Vec::with_capacity(root_moves.len());
        for &mv in &root_moves {
            let nodes = &nodes;
            let best = &best;
            workers.push(scope.spawn(move || {
                let mut next = game.clone();
                next.apply_move(mv, zobrist);
                let searched = -negamax(
                    &next,
                    depth - 1,
                    -INFINITY_SCORE,
                    INFINITY_SCORE,
                    scorer,
                    zobrist,
                    nodes,
                );
                let penalty = development_penalty(&next.position, mover);
                let score = searched - penalty;
                if let Ok(mut guard) = best.lock() {
                    if score > guard.score {
                        guard.mv = mv;
                        guard.score = score;
                    }
                }
                (mv, score, penalty)
            }));
        }
        workers
            .into_iter()
            .filter_map(|worker| worker.join().ok())
            .collect()
    });

    let visited = nodes.load(Ordering::Relaxed);
    let elapsed = started.elapsed();
    let nps = if elapsed.as_secs_f64() > 0.0 {
        (visited as f64 / elapsed.as_secs_f64()) as u64
    } else {
        0
    };
    for (mv, score, penalty) in &per_move {
        info_lines.push(format!(
            "info depth {depth} currmove {} currmovescore {score} penalty {penalty} nodes {visited} nps {nps}",
            move_to_text(*mv),
        ));
    }

    let winner = match best.into_inner() {
        Ok(inner) => inner,
        Err(poisoned) => poisoned.into_inner(),
    };
    info_lines.push(format!(
        "info depth {depth} score cp {} nodes {visited} nps {nps} pv {}",
        winner.score,
        move_to_text(winner.mv),
    ));

    SearchSummary {
        best_move: Some(winner.mv),
        best_score: winner.score,
        nodes_visited: visited,
        elapsed,
        info_lines,
    }
}

/// Plain negamax with alpha-beta pruning, clone-on-recurse.
///
/// Terminal scores: a repeated position (seen twice before) is a draw, no
/// legal moves is either mate or stalemate. Mates earn `MATE_SCORE` plus the
/// remaining depth so the shortest mate scores highest.
fn negamax(
    game: &Game,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    scorer: &dyn BoardScorer,
    zobrist: &ZobristTable,
    nodes: &AtomicU64,
) -> i32 {
    nodes.fetch_add(1, Ordering::Relaxed);

    if depth == 0 {
        return scorer.score(&game.position);
    }
    if game.prior_occurrences() >= 2 {
        return DRAW_SCORE;
    }

    let moves = generate_legal_moves(&game.position, zobrist);
    if moves.is_empty() {
        return if crate::attacks::detection::is_king_in_check(
            &game.position,
            game.position.side_to_move,
        ) {
            -(MATE_SCORE + depth as i32)
        } else {
            DRAW_SCORE
        };
    }

    let mut best = -INFINITY_SCORE;
    for mv in moves {
        let mut next = game.clone();
        next.apply_move(mv, zobrist);
        let score = -negamax(&next, depth - 1, -beta, -alpha, scorer, zobrist, nodes);
        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break;
        }
    }
    best
}
