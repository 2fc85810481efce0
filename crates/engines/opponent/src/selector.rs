//! Turning a ranked move list into one move.
//!
//! Each tier is a fixed policy over the engine's ranking. The random source
//! is passed in, so a seeded generator makes every choice reproducible.

use chess_core::{Move, ScoredMove};
use rand::Rng;

use crate::difficulty::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy {
    /// Always the first ranked move.
    Best,
    /// The first move, but the second one with `probability` when it scores
    /// within `window` of the first.
    NearBest { window: u32, probability: f64 },
    /// Uniform over every move within `window` of the first.
    UniformWithin { window: u32 },
    /// Over every move within `window` of the first, index drawn as
    /// `floor(r² · n)` so earlier (stronger) entries are favoured.
    SkewedWithin { window: u32 },
}

impl SelectionPolicy {
    pub fn for_difficulty(difficulty: Option<Difficulty>) -> Self {
        match difficulty {
            Some(Difficulty::Master) | None => SelectionPolicy::Best,
            Some(Difficulty::Hard) => SelectionPolicy::NearBest {
                window: 50,
                probability: 0.15,
            },
            Some(Difficulty::Medium) => SelectionPolicy::UniformWithin { window: 100 },
            Some(Difficulty::Easy) => SelectionPolicy::SkewedWithin { window: 250 },
        }
    }

    /// Pick a move from a best-first ranking. `None` only for an empty list.
    pub fn choose<R: Rng + ?Sized>(&self, ranked: &[ScoredMove], rng: &mut R) -> Option<Move> {
        let best = ranked.first()?;

        let chosen = match *self {
            SelectionPolicy::Best => best,
            SelectionPolicy::NearBest {
                window,
                probability,
            } => match ranked.get(1) {
                Some(second)
                    if best.score.abs_diff(second.score) < window
                        && rng.gen::<f64>() < probability =>
                {
                    second
                }
                _ => best,
            },
            SelectionPolicy::UniformWithin { window } => {
                let close = within(ranked, window);
                close[rng.gen_range(0..close.len())]
            }
            SelectionPolicy::SkewedWithin { window } => {
                let close = within(ranked, window);
                if close.is_empty() {
                    best
                } else {
                    let r: f64 = rng.gen();
                    let idx = ((r * r) * close.len() as f64).floor() as usize;
                    close[idx.min(close.len() - 1)]
                }
            }
        };
        Some(chosen.mv)
    }
}

// Never empty for a non-empty ranking: the first move is within any window.
fn within(ranked: &[ScoredMove], window: u32) -> Vec<&ScoredMove> {
    let best = ranked[0].score;
    ranked
        .iter()
        .filter(|s| s.score.abs_diff(best) < window)
        .collect()
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
