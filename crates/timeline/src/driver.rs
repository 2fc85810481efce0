//! Async host for a [`Timeline`].
//!
//! The driver owns the timeline behind a mutex and runs three kinds of
//! tasks on the tokio runtime:
//!
//! - a supervisor that, after every change, works out which search jobs are
//!   due and starts or aborts them,
//! - the jobs themselves: an optional delay, then the search on the blocking
//!   pool, then the result handed back to the timeline. A superseded job's
//!   search is told to stop at its next root move,
//! - a ticker advancing the elapsed clock once a second.
//!
//! Events are forwarded to the channel returned by [`GameDriver::spawn`].
//! Dropping the driver aborts every task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chess_core::{Move, MoveRecord, PieceKind};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};
use tracing::{debug, warn};

use crate::error::MoveError;
use crate::events::TimelineEvent;
use crate::job::{JobKey, SearchJob};
use crate::timeline::{SelectOutcome, Timeline};

/// Pause before the computer moves.
pub const DEFAULT_MOVE_DELAY: Duration = Duration::from_millis(500);

const TICK: Duration = Duration::from_secs(1);

struct Shared {
    timeline: Mutex<Timeline>,
    changed: Notify,
    events: UnboundedSender<TimelineEvent>,
}

impl Shared {
    fn publish(&self, timeline: &mut Timeline) {
        for event in timeline.drain_events() {
            // receiver gone means the host stopped listening
            let _ = self.events.send(event);
        }
    }
}

/// Stops the search and aborts the task when dropped.
struct TaskGuard {
    task: JoinHandle<()>,
    stop: Arc<AtomicBool>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.task.abort();
    }
}

struct Scheduled {
    key: JobKey,
    _task: TaskGuard,
}

pub struct GameDriver {
    shared: Arc<Shared>,
    supervisor: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

impl GameDriver {
    /// Start driving `timeline`. Must be called inside a tokio runtime.
    pub fn spawn(
        mut timeline: Timeline,
        move_delay: Duration,
    ) -> (Self, UnboundedReceiver<TimelineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in timeline.drain_events() {
            let _ = tx.send(event);
        }
        let shared = Arc::new(Shared {
            timeline: Mutex::new(timeline),
            changed: Notify::new(),
            events: tx,
        });
        let supervisor = tokio::spawn(supervise(shared.clone(), move_delay));
        let ticker = tokio::spawn(tick_clock(shared.clone()));
        let driver = Self {
            shared,
            supervisor,
            ticker,
        };
        (driver, rx)
    }

    /// Run `f` against the timeline, then publish its events and reschedule.
    pub async fn update<R>(&self, f: impl FnOnce(&mut Timeline) -> R) -> R {
        let mut timeline = self.shared.timeline.lock().await;
        let out = f(&mut timeline);
        self.shared.publish(&mut timeline);
        drop(timeline);
        self.shared.changed.notify_one();
        out
    }

    /// Read from the timeline without changing it.
    pub async fn read<R>(&self, f: impl FnOnce(&Timeline) -> R) -> R {
        let timeline = self.shared.timeline.lock().await;
        f(&timeline)
    }

    pub async fn make_move(&self, mv: Move) -> Result<MoveRecord, MoveError> {
        self.update(|t| t.make_move(mv)).await
    }

    pub async fn undo(&self) -> bool {
        self.update(Timeline::undo).await
    }

    pub async fn set_cursor(&self, index: Option<usize>) -> bool {
        self.update(|t| t.set_cursor(index)).await
    }

    pub async fn go_live(&self) {
        self.update(Timeline::go_live).await
    }

    pub async fn select_square(&self, sq: u8) -> SelectOutcome {
        self.update(|t| t.select_square(sq)).await
    }

    pub async fn resolve_promotion(&self, piece: PieceKind) -> Result<MoveRecord, MoveError> {
        self.update(|t| t.resolve_promotion(piece)).await
    }

    pub async fn cancel_promotion(&self) -> bool {
        self.update(Timeline::cancel_promotion).await
    }

    pub async fn set_hints(&self, enabled: bool) {
        self.update(|t| t.set_hints(enabled)).await
    }

    /// Swap in a new game. Jobs for the old one are dropped.
    pub async fn replace(&self, timeline: Timeline) {
        self.update(|t| *t = timeline).await
    }

    /// Stop every task and wait for them to finish.
    pub async fn shutdown(mut self) {
        self.supervisor.abort();
        self.ticker.abort();
        // cancelled tasks report a JoinError; nothing else to do with it
        let _ = (&mut self.supervisor).await;
        let _ = (&mut self.ticker).await;
        debug!("game driver stopped");
    }
}

impl Drop for GameDriver {
    fn drop(&mut self) {
        self.supervisor.abort();
        self.ticker.abort();
    }
}

async fn supervise(shared: Arc<Shared>, move_delay: Duration) {
    let mut opponent: Option<Scheduled> = None;
    let mut hint: Option<Scheduled> = None;
    loop {
        {
            let mut timeline = shared.timeline.lock().await;
            let wanted = timeline.opponent_job_key();
            if opponent.as_ref().map(|s| s.key) != wanted {
                // dropping the old guard aborts a superseded job
                opponent = timeline
                    .opponent_job()
                    .map(|job| schedule(&shared, job, move_delay));
            }
            let wanted = timeline.hint_job_key();
            if hint.as_ref().map(|s| s.key) != wanted {
                hint = timeline
                    .hint_job()
                    .map(|job| schedule(&shared, job, Duration::ZERO));
            }
        }
        shared.changed.notified().await;
    }
}

fn schedule(shared: &Arc<Shared>, job: SearchJob, delay: Duration) -> Scheduled {
    let job_key = job.key;
    debug!(kind = ?job.key.kind, generation = job.key.generation, "search job scheduled");
    let stop = Arc::new(AtomicBool::new(false));
    let task = tokio::spawn(run_job(shared.clone(), job, delay, stop.clone()));
    Scheduled {
        key: job_key,
        _task: TaskGuard { task, stop },
    }
}

async fn run_job(shared: Arc<Shared>, job: SearchJob, delay: Duration, stop: Arc<AtomicBool>) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
    // the blocking search outlives an abort, so it watches the flag instead
    let outcome = match tokio::task::spawn_blocking(move || job.run_until(&stop)).await {
        Ok(Some(outcome)) => outcome,
        Ok(None) => return,
        Err(e) => {
            warn!(error = %e, "search job failed");
            return;
        }
    };
    {
        let mut timeline = shared.timeline.lock().await;
        timeline.apply_outcome(outcome);
        shared.publish(&mut timeline);
    }
    shared.changed.notify_one();
}

async fn tick_clock(shared: Arc<Shared>) {
    let mut interval = interval_at(Instant::now() + TICK, TICK);
    loop {
        interval.tick().await;
        shared.timeline.lock().await.tick();
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
