//! Computer opponent
//!
//! Picks the search depth from the difficulty tier and the material left on
//! the board, ranks the legal moves with an [`Engine`] and lets the tier's
//! [`SelectionPolicy`] choose among them. The ranking is deterministic; all
//! variation comes from the random source handed to [`Opponent::pick`].

pub mod difficulty;
pub mod selector;

use chess_core::{Engine, Game, Move};
use classical_engine::ClassicalEngine;
use rand::Rng;
use tracing::debug;

pub use difficulty::{search_depth, Difficulty, UnknownDifficulty, DEFAULT_DEPTH};
pub use selector::SelectionPolicy;

#[derive(Debug, Clone)]
pub struct Opponent<E: Engine = ClassicalEngine> {
    difficulty: Option<Difficulty>,
    engine: E,
}

impl Opponent<ClassicalEngine> {
    pub fn new(difficulty: Option<Difficulty>) -> Self {
        Self::with_engine(difficulty, ClassicalEngine::new())
    }
}

impl<E: Engine> Opponent<E> {
    pub fn with_engine(difficulty: Option<Difficulty>, engine: E) -> Self {
        Self { difficulty, engine }
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn depth(&self, game: &Game) -> u8 {
        search_depth(self.difficulty, game.piece_count())
    }

    pub fn policy(&self) -> SelectionPolicy {
        SelectionPolicy::for_difficulty(self.difficulty)
    }

    /// The move this opponent plays in `game`. `None` when the game is over.
    pub fn pick<R: Rng + ?Sized>(&mut self, game: &Game, rng: &mut R) -> Option<Move> {
        let depth = self.depth(game);
        let ranked = self.engine.rank(game, depth);
        let choice = self.policy().choose(&ranked, rng);
        debug!(
            engine = self.engine.name(),
            difficulty = ?self.difficulty,
            depth,
            candidates = ranked.len(),
            choice = ?choice.map(|m| m.to_string()),
            "opponent picked move"
        );
        choice
    }

    /// Best move at this opponent's depth, with no randomness.
    pub fn best(&mut self, game: &Game) -> Option<Move> {
        let depth = self.depth(game);
        self.engine.rank(game, depth).first().map(|s| s.mv)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
