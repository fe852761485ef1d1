//! A playable game: the current position plus the hash-key history that the
//! repetition rule reads.

use crate::movegen::apply::apply_move;
use crate::moves::encoding::Move;
use crate::position::board::Position;
use crate::search::zobrist::ZobristTable;

#[derive(Debug, Clone)]
pub struct Game {
    pub position: Position,
    /// Zobrist key of every position reached so far, the current one last.
    pub history: Vec<u64>,
}

impl Game {
    pub fn new(zobrist: &ZobristTable) -> Self {
        Self::with_position(Position::new_game(zobrist))
    }

    pub fn from_fen(text: &str, zobrist: &ZobristTable) -> Result<Self, String> {
        Ok(Self::with_position(Position::from_fen(text, zobrist)?))
    }

    pub fn with_position(position: Position) -> Self {
        let history = vec![position.zobrist_key];
        Game { position, history }
    }

    /// Applies a generated move and records the resulting key.
    pub fn apply_move(&mut self, mv: Move, zobrist: &ZobristTable) {
        apply_move(&mut self.position, mv, zobrist);
        self.history.push(self.position.zobrist_key);
    }

    /// How many times the current position already stood before now.
    pub fn prior_occurrences(&self) -> usize {
        let key = self.position.zobrist_key;
        let ancestors = &self.history[..self.history.len().saturating_sub(1)];
        ancestors.iter().filter(|&&entry| entry == key).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::move_from_text;

    fn play(game: &mut Game, zobrist: &ZobristTable, moves: &[&str]) {
        for text in moves {
            let mv = move_from_text(text, &game.position, zobrist)
                .unwrap_or_else(|| panic!("move {text} should be legal"));
            game.apply_move(mv, zobrist);
        }
    }

    #[test]
    fn history_starts_with_the_initial_key() {
        let zobrist = ZobristTable::default();
        let game = Game::new(&zobrist);
        assert_eq!(game.history, vec![game.position.zobrist_key]);
        assert_eq!(game.prior_occurrences(), 0);
    }

    #[test]
    fn knight_shuffle_counts_repetitions() {
        let zobrist = ZobristTable::default();
        let mut game = Game::new(&zobrist);
        play(
            &mut game,
            &zobrist,
            &["g1f3", "g8f6", "f3g1", "f6g8"],
        );
        // Back to the starting position, which already stood once.
        assert_eq!(game.prior_occurrences(), 1);
        play(
            &mut game,
            &zobrist,
            &["g1f3", "g8f6", "f3g1", "f6g8"],
        );
        assert_eq!(game.prior_occurrences(), 2);
        assert_eq!(game.history.len(), 9);
    }

    #[test]
    fn applying_moves_appends_one_key_per_ply() {
        let zobrist = ZobristTable::default();
        let mut game = Game::new(&zobrist);
        play(&mut game, &zobrist, &["e2e4", "e7e5", "g1f3"]);
        assert_eq!(game.history.len(), 4);
        assert_eq!(*game.history.last().unwrap(), game.position.zobrist_key);
        assert_eq!(game.prior_occurrences(), 0);
    }
}
