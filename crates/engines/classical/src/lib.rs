//! Classical Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a piece-square
//! evaluation. Deterministic: the same game and depth always produce the
//! same ranking.

pub mod eval;
pub mod search;

use std::sync::atomic::AtomicBool;

use chess_core::{Engine, Game, ScoredMove};

pub use eval::{evaluate, evaluate_position, MATE};
pub use search::{rank, rank_until, search};

#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalEngine;

impl ClassicalEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for ClassicalEngine {
    fn rank(&mut self, game: &Game, depth: u8) -> Vec<ScoredMove> {
        search::rank(game, depth)
    }

    fn rank_until(
        &mut self,
        game: &Game,
        depth: u8,
        stop: &AtomicBool,
    ) -> Option<Vec<ScoredMove>> {
        search::rank_until(game, depth, stop)
    }

    fn name(&self) -> &str {
        "Classical v2.0"
    }
}
