//! UCI protocol front end and command loop.
//!
//! Parses UCI commands, maintains the session game, routes `go` requests to
//! the search, and emits protocol-compliant output. The whole dialogue is
//! traced to a timestamped session log file.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use crate::movegen::apply::apply_move;
use crate::movegen::generator::generate_legal_moves;
use crate::movegen::perft::{perft, run_epd_suite};
use crate::position::game::Game;
use crate::search::negamax::search_best_move;
use crate::search::scoring::{BoardScorer, MaterialPositionalScorer};
use crate::search::zobrist::ZobristTable;
use crate::utils::long_algebraic::{move_from_text, move_to_text};
use crate::utils::render::render_game;

const ENGINE_NAME: &str = "Quince Chess";
const ENGINE_AUTHOR: &str = "the Quince Chess developers";
const DEFAULT_SEARCH_DEPTH: u8 = 6;
const LOG_FILE_NAME: &str = "quince_log.txt";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let log = SessionLog::open(Path::new(LOG_FILE_NAME));
    if !log.is_active() {
        writeln!(
            stdout,
            "info string cannot open {LOG_FILE_NAME}, continuing without a session log"
        )?;
    }
    let mut session = UciSession::new().with_log(log);

    for line in stdin.lock().lines() {
        let line = line?;
        let keep_running = session.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if !keep_running {
            break;
        }
    }

    Ok(())
}

/// Timestamped trace of the UCI dialogue. A session whose log file cannot be
/// opened keeps running without one.
struct SessionLog {
    file: Option<File>,
}

impl SessionLog {
    fn open(path: &Path) -> Self {
        let file = OpenOptions::new().create(true).append(true).open(path).ok();
        SessionLog { file }
    }

    fn disabled() -> Self {
        SessionLog { file: None }
    }

    fn is_active(&self) -> bool {
        self.file.is_some()
    }

    fn record(&mut self, direction: &str, text: &str) {
        if let Some(file) = self.file.as_mut() {
            let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(file, "[{stamp}] {direction} {text}");
        }
    }
}

pub struct UciSession {
    game: Game,
    zobrist: ZobristTable,
    scorer: MaterialPositionalScorer,
    depth: u8,
    log: SessionLog,
}

impl UciSession {
    pub fn new() -> Self {
        let zobrist = ZobristTable::default();
        let game = Game::new(&zobrist);
        UciSession {
            game,
            zobrist,
            scorer: MaterialPositionalScorer,
            depth: DEFAULT_SEARCH_DEPTH,
            log: SessionLog::disabled(),
        }
    }

    fn with_log(mut self, log: SessionLog) -> Self {
        self.log = log;
        self
    }

    /// Handles one command line. Returns `false` when the session should end.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        self.log.record(">>", trimmed);

        let mut parts = trimmed.split_whitespace();
        let command = parts.next().unwrap_or_default();

        match command {
            "uci" => {
                self.say(out, &format!("id name {ENGINE_NAME}"))?;
                self.say(out, &format!("id author {ENGINE_AUTHOR}"))?;
                self.say(
                    out,
                    &format!(
                        "option name Depth type spin default {DEFAULT_SEARCH_DEPTH} min 1 max 100"
                    ),
                )?;
                self.say(out, "uciok")?;
            }
            "isready" => {
                self.say(out, "readyok")?;
            }
            "ucinewgame" => {
                self.game = Game::new(&self.zobrist);
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    self.say(out, &format!("info string setoption error: {err}"))?;
                }
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    self.say(out, &format!("info string position error: {err}"))?;
                }
            }
            "go" => {
                self.handle_go(out)?;
            }
            "perft" => {
                let depth = parts.next().and_then(|t| t.parse::<u8>().ok()).unwrap_or(1);
                self.handle_perft(depth, out)?;
            }
            "perftEPD" => match parts.next() {
                Some(path) => self.handle_perft_epd(Path::new(path), out)?,
                None => self.say(out, "info string perftEPD needs a file path")?,
            },
            "movelist" => {
                self.handle_movelist(out)?;
            }
            "print" => {
                let text = render_game(&self.game);
                self.say(out, &text)?;
            }
            "help" => {
                self.handle_help(out)?;
            }
            "quit" => {
                return Ok(false);
            }
            _ => {
                // Unknown commands are ignored for UCI compatibility.
            }
        }

        Ok(true)
    }

    /// Writes one reply line and mirrors it into the session log.
    fn say(&mut self, out: &mut impl Write, text: &str) -> io::Result<()> {
        self.log.record("<<", text);
        writeln!(out, "{text}")
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace();
        let _ = tokens.next(); // setoption

        let mut name_tokens = Vec::new();
        let mut value_tokens = Vec::new();
        let mut bucket = "";
        for token in tokens {
            match token {
                "name" => bucket = "name",
                "value" => bucket = "value",
                _ if bucket == "name" => name_tokens.push(token),
                _ if bucket == "value" => value_tokens.push(token),
                _ => {}
            }
        }
        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Depth") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid Depth value '{value}'"))?;
            self.depth = parsed.clamp(1, 100);
            Ok(())
        } else {
            Err(format!("unknown option '{name}'"))
        }
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().peekable();
        let _ = tokens.next(); // "position"

        let mut game = match tokens.next() {
            Some("startpos") => Game::new(&self.zobrist),
            Some("fen") => {
                let mut fen_parts = Vec::new();
                while let Some(&next) = tokens.peek() {
                    if next == "moves" {
                        break;
                    }
                    fen_parts.push(next);
                    tokens.next();
                }
                if fen_parts.is_empty() {
                    return Err("missing FEN after 'position fen'".to_owned());
                }
                Game::from_fen(&fen_parts.join(" "), &self.zobrist)?
            }
            Some(other) => return Err(format!("unsupported position token '{other}'")),
            None => return Err("incomplete position command".to_owned()),
        };

        if tokens.peek().copied() == Some("moves") {
            tokens.next();
            // A move string that matches no legal move stops the replay here.
            for text in tokens {
                let Some(mv) = move_from_text(text, &game.position, &self.zobrist) else {
                    break;
                };
                game.apply_move(mv, &self.zobrist);
            }
        }

        self.game = game;
        Ok(())
    }

    fn handle_go(&mut self, out: &mut impl Write) -> io::Result<()> {
        let summary = search_best_move(&self.game, self.depth, &self.scorer, &self.zobrist);
        for info in &summary.info_lines {
            self.say(out, info)?;
        }
        match summary.best_move {
            Some(best) => {
                let text = move_to_text(best);
                self.game.apply_move(best, &self.zobrist);
                self.say(out, &format!("bestmove {text}"))?;
            }
            None => {
                self.say(out, "info string No legal moves")?;
            }
        }
        Ok(())
    }

    fn handle_perft(&mut self, depth: u8, out: &mut impl Write) -> io::Result<()> {
        let started = Instant::now();
        let counts = perft(&self.game.position, depth, &self.zobrist);
        let elapsed = started.elapsed();
        self.say(
            out,
            &format!(
                "info string perft depth {depth} nodes {} captures {} ep {} castles {} promotions {} time {:.3}s",
                counts.nodes,
                counts.captures,
                counts.en_passant,
                counts.castles,
                counts.promotions,
                elapsed.as_secs_f64(),
            ),
        )
    }

    fn handle_perft_epd(&mut self, path: &Path, out: &mut impl Write) -> io::Result<()> {
        // The Depth option also caps how deep the suite is checked.
        match run_epd_suite(path, self.depth, &self.zobrist) {
            Ok(summary) => {
                for mismatch in &summary.mismatches {
                    let text = format!(
                        "info string mismatch line {} depth {} expected {} got {} fen {}",
                        mismatch.line_number,
                        mismatch.depth,
                        mismatch.expected,
                        mismatch.actual,
                        mismatch.fen,
                    );
                    self.say(out, &text)?;
                }
                self.say(
                    out,
                    &format!(
                        "info string perftEPD {}: {} positions, {} checks passed, {} mismatches",
                        path.display(),
                        summary.lines_checked,
                        summary.checks_passed,
                        summary.mismatches.len(),
                    ),
                )?;
            }
            Err(err) => {
                self.say(out, &format!("info string perftEPD error: {err}"))?;
            }
        }
        Ok(())
    }

    fn handle_movelist(&mut self, out: &mut impl Write) -> io::Result<()> {
        let moves = generate_legal_moves(&self.game.position, &self.zobrist);
        self.say(out, &format!("info string {} legal moves", moves.len()))?;
        for mv in moves {
            let mut next = self.game.position.clone();
            apply_move(&mut next, mv, &self.zobrist);
            let score = -self.scorer.score(&next);
            let text = format!("info string {} score cp {score}", move_to_text(mv));
            self.say(out, &text)?;
        }
        Ok(())
    }

    fn handle_help(&mut self, out: &mut impl Write) -> io::Result<()> {
        for line in [
            "uci / isready / ucinewgame / quit",
            "setoption name Depth value N (1..100)",
            "position startpos|fen <fen> [moves m1 m2 ...]",
            "go (search at the configured depth and play the best move)",
            "perft N (movepath counts from the current position)",
            "perftEPD <file> (check an EPD suite up to the configured depth)",
            "movelist (legal moves with one-ply scores)",
            "print (board, state, and history)",
        ] {
            self.say(out, line)?;
        }
        Ok(())
    }
}

impl Default for UciSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::UciSession;

    fn run(session: &mut UciSession, line: &str) -> (bool, String) {
        let mut out = Vec::new();
        let keep_running = session
            .handle_command(line, &mut out)
            .expect("writing to a Vec cannot fail");
        (
            keep_running,
            String::from_utf8(out).expect("output should be UTF-8"),
        )
    }

    #[test]
    fn uci_handshake_identifies_the_engine() {
        let mut session = UciSession::new();
        let (keep_running, output) = run(&mut session, "uci");
        assert!(keep_running);
        assert!(output.contains("id name Quince Chess"));
        assert!(output.contains("option name Depth type spin default 6 min 1 max 100"));
        assert!(output.ends_with("uciok\n"));
    }

    #[test]
    fn isready_answers_readyok() {
        let mut session = UciSession::new();
        let (_, output) = run(&mut session, "isready");
        assert_eq!(output, "readyok\n");
    }

    #[test]
    fn position_startpos_with_moves_replays_them() {
        let mut session = UciSession::new();
        let (_, output) = run(&mut session, "position startpos moves e2e4");
        assert!(output.is_empty());
        assert_eq!(session.game.position.en_passant_square, Some(20));
        assert_eq!(session.game.history.len(), 2);
    }

    #[test]
    fn unmatched_move_text_stops_the_replay() {
        let mut session = UciSession::new();
        run(&mut session, "position startpos moves e2e4 e2e4 d7d5");
        // The second e2e4 matches nothing, so d7d5 is never reached.
        assert_eq!(session.game.history.len(), 2);
    }

    #[test]
    fn position_fen_replaces_the_session_game() {
        let mut session = UciSession::new();
        let (_, output) = run(&mut session, "position fen 4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(output.is_empty());
        assert_eq!(session.game.position.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn bad_position_commands_report_an_info_string() {
        let mut session = UciSession::new();
        let (_, output) = run(&mut session, "position fen not a fen");
        assert!(output.starts_with("info string position error:"));
        let (_, output) = run(&mut session, "position");
        assert!(output.starts_with("info string position error:"));
    }

    #[test]
    fn setoption_clamps_depth_into_range() {
        let mut session = UciSession::new();
        run(&mut session, "setoption name Depth value 3");
        assert_eq!(session.depth, 3);
        run(&mut session, "setoption name Depth value 0");
        assert_eq!(session.depth, 1);
        run(&mut session, "setoption name Depth value 100");
        assert_eq!(session.depth, 100);

        let (_, output) = run(&mut session, "setoption name Hash value 64");
        assert!(output.starts_with("info string setoption error:"));
    }

    #[test]
    fn go_plays_the_best_move_on_the_session_game() {
        let mut session = UciSession::new();
        run(&mut session, "setoption name Depth value 1");
        let (_, output) = run(&mut session, "go");
        assert!(output.contains("bestmove "));
        assert_eq!(session.game.history.len(), 2);
    }

    #[test]
    fn go_without_legal_moves_says_so() {
        let mut session = UciSession::new();
        run(&mut session, "setoption name Depth value 1");
        run(
            &mut session,
            "position fen R5k1/5ppp/8/8/8/8/8/7K b - - 0 1",
        );
        let (_, output) = run(&mut session, "go");
        assert!(output.contains("info string No legal moves"));
        assert_eq!(session.game.history.len(), 1);
    }

    #[test]
    fn movelist_counts_the_opening_moves() {
        let mut session = UciSession::new();
        let (_, output) = run(&mut session, "movelist");
        assert!(output.starts_with("info string 20 legal moves\n"));
        assert!(output.contains("info string e2e4 score cp"));
    }

    #[test]
    fn print_shows_the_board_and_state() {
        let mut session = UciSession::new();
        let (_, output) = run(&mut session, "print");
        assert!(output.contains("side to move: white"));
        assert!(output.contains("history keys:"));
    }

    #[test]
    fn quit_ends_the_session_and_unknown_commands_do_not() {
        let mut session = UciSession::new();
        let (keep_running, _) = run(&mut session, "quit");
        assert!(!keep_running);

        let mut session = UciSession::new();
        let (keep_running, output) = run(&mut session, "xyzzy");
        assert!(keep_running);
        assert!(output.is_empty());
    }
}
