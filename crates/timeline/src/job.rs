//! Search work detached from the timeline.
//!
//! A [`SearchJob`] is a snapshot taken when the job is scheduled. Running it
//! needs nothing else, so it can move to a blocking thread; its
//! [`JobOutcome`] carries the generation it was taken at, and the timeline
//! drops any outcome whose generation has moved on. A job can also be
//! stopped part way through, in which case it has no outcome at all.

use std::sync::atomic::AtomicBool;

use chess_core::{Engine, Game, Move};
use classical_engine::ClassicalEngine;
use opponent::SelectionPolicy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// The computer's reply, applied to the game.
    Opponent,
    /// A suggestion for the human, shown as an overlay.
    Hint,
}

/// Identifies which timeline state a job belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobKey {
    pub session: Uuid,
    pub kind: JobKind,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct SearchJob {
    pub key: JobKey,
    pub game: Game,
    pub depth: u8,
    pub policy: SelectionPolicy,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobOutcome {
    pub key: JobKey,
    /// `None` when the position had no legal move.
    pub mv: Option<Move>,
}

impl SearchJob {
    pub fn run(self) -> JobOutcome {
        self.run_with(&mut ClassicalEngine::new())
    }

    pub fn run_with<E: Engine>(self, engine: &mut E) -> JobOutcome {
        let key = self.key;
        self.run_until_with(engine, &AtomicBool::new(false))
            .unwrap_or(JobOutcome { key, mv: None })
    }

    /// Run unless `stop` is raised first; `None` when it was.
    pub fn run_until(self, stop: &AtomicBool) -> Option<JobOutcome> {
        self.run_until_with(&mut ClassicalEngine::new(), stop)
    }

    pub fn run_until_with<E: Engine>(
        self,
        engine: &mut E,
        stop: &AtomicBool,
    ) -> Option<JobOutcome> {
        let Some(ranked) = engine.rank_until(&self.game, self.depth, stop) else {
            debug!(
                kind = ?self.key.kind,
                generation = self.key.generation,
                "search job stopped"
            );
            return None;
        };
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mv = self.policy.choose(&ranked, &mut rng);
        debug!(
            kind = ?self.key.kind,
            generation = self.key.generation,
            depth = self.depth,
            candidates = ranked.len(),
            "search job finished"
        );
        Some(JobOutcome { key: self.key, mv })
    }
}
