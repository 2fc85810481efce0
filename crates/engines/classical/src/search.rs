//! Fixed-depth minimax with alpha-beta pruning.
//!
//! White maximizes and Black minimizes over the White-positive evaluation.
//! Every branch plays its move on its own clone of the game, so siblings
//! never share state. Moves are tried in generation order.

use std::sync::atomic::{AtomicBool, Ordering};

use chess_core::{Color, Game, ScoredMove};
use tracing::debug;

use crate::eval::evaluate;

/// Minimax value of `game` searched `depth` plies deep.
pub fn search(game: &Game, depth: u8, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
    if depth == 0 || game.is_game_over() {
        return evaluate(game);
    }

    let moves = game.legal_moves();
    if maximizing {
        let mut best = i32::MIN;
        for mv in moves {
            let mut child = game.clone();
            child.push(mv);
            let score = search(&child, depth - 1, alpha, beta, false);
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for mv in moves {
            let mut child = game.clone();
            child.push(mv);
            let score = search(&child, depth - 1, alpha, beta, true);
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Score every root move and sort best-first for the side to move:
/// descending when White is to move, ascending when Black is. Ties keep
/// generation order. Empty when the game is already decided.
pub fn rank(game: &Game, depth: u8) -> Vec<ScoredMove> {
    rank_until(game, depth, &AtomicBool::new(false)).unwrap_or_default()
}

/// [`rank`], giving up with `None` once `stop` is set. The flag is checked
/// before each root move.
pub fn rank_until(game: &Game, depth: u8, stop: &AtomicBool) -> Option<Vec<ScoredMove>> {
    let white_to_move = game.side_to_move() == Color::White;
    let child_depth = depth.saturating_sub(1);

    let moves = game.legal_moves();
    let mut ranked = Vec::with_capacity(moves.len());
    for mv in moves {
        if stop.load(Ordering::Relaxed) {
            debug!(depth, scored = ranked.len(), "ranking stopped");
            return None;
        }
        let mut child = game.clone();
        child.push(mv);
        let score = search(&child, child_depth, i32::MIN, i32::MAX, !white_to_move);
        ranked.push(ScoredMove::new(mv, score));
    }

    if white_to_move {
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
    } else {
        ranked.sort_by(|a, b| a.score.cmp(&b.score));
    }

    debug!(
        depth,
        moves = ranked.len(),
        best = ?ranked.first().map(|s| (s.mv.to_string(), s.score)),
        "ranked root moves"
    );
    Some(ranked)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
