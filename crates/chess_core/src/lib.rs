pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod san;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::{FenError, IllegalMove, SanError};
pub use game::{Game, GameStatus, MoveRecord};
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use san::{parse_san, to_san};
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

use std::sync::atomic::{AtomicBool, Ordering};

// =============================================================================
// Engine trait: the seam between the rules and whatever ranks moves
// =============================================================================

/// A root move and the minimax value of the position it leads to.
/// Scores are White-positive regardless of who is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

impl ScoredMove {
    pub fn new(mv: Move, score: i32) -> Self {
        Self { mv, score }
    }
}

/// Trait implemented by move-ranking engines.
pub trait Engine: Send {
    /// Every legal move of `game`'s current position, best for the side to
    /// move first. Empty when the game is over.
    fn rank(&mut self, game: &Game, depth: u8) -> Vec<ScoredMove>;

    /// Like [`Engine::rank`], but `None` if `stop` is set before the ranking
    /// is complete. Engines that cannot be interrupted only look at the flag
    /// before starting.
    fn rank_until(
        &mut self,
        game: &Game,
        depth: u8,
        stop: &AtomicBool,
    ) -> Option<Vec<ScoredMove>> {
        if stop.load(Ordering::Relaxed) {
            return None;
        }
        Some(self.rank(game, depth))
    }

    /// Returns the engine's name for display and logs
    fn name(&self) -> &str;
}
