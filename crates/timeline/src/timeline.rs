//! The game timeline.
//!
//! One canonical move list plus a viewing cursor. When the cursor sits on
//! the last move the timeline is *live* and accepts input; anywhere earlier
//! it is *reviewing*, and the displayed position is rebuilt by replaying a
//! prefix of the canonical moves. Playing a move while reviewing cuts the
//! list at the cursor and continues from there.
//!
//! Computer moves and hints run outside the timeline as [`SearchJob`]s.
//! Every canonical change bumps a generation counter, and outcomes taken at
//! an older generation are dropped when they come back.

use chess_core::{Color, Game, GameStatus, Move, MoveRecord, PieceKind, Position};
use opponent::{Difficulty, Opponent, SelectionPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::clock::ElapsedClock;
use crate::config::{GameConfig, GameMode};
use crate::error::MoveError;
use crate::events::TimelineEvent;
use crate::job::{JobKey, JobKind, JobOutcome, SearchJob};
use crate::save::SavedGame;
use crate::stats::{Outcome, PlayerStats};

/// Suggested move shown over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub from: u8,
    pub to: u8,
}

/// A pawn move to the last rank waiting for its piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: u8,
    pub to: u8,
}

/// What a click on a square did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Input is not accepted right now.
    Ignored,
    /// An own piece is selected; these are its destinations.
    Selected { from: u8, targets: Vec<u8> },
    /// The selection was dropped.
    Cleared,
    Moved(MoveRecord),
    PromotionPending(PendingPromotion),
}

pub struct Timeline {
    config: GameConfig,
    session: Uuid,
    human: Color,
    game: Game,
    /// Plies shown; equals `game.len()` when live.
    view: usize,
    status: GameStatus,
    generation: u64,
    hint_generation: u64,
    hints_enabled: bool,
    hint: Option<Hint>,
    selected_square: Option<u8>,
    selected_moves: Vec<Move>,
    pending_promotion: Option<PendingPromotion>,
    clock: ElapsedClock,
    rng: StdRng,
    events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Start a session. Resume state in `config` is tried move list first,
    /// then position; if both fail the game starts from scratch.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let human = match config.mode {
            GameMode::Ai => config.player_color.resolve(&mut rng),
            GameMode::Local | GameMode::Tutorial => Color::White,
        };
        let game = restore(&config);

        info!(
            mode = ?config.mode,
            difficulty = ?config.difficulty,
            human = %human,
            plies = game.len(),
            "timeline started"
        );

        let mut timeline = Self {
            hints_enabled: config.hints,
            config,
            session: Uuid::new_v4(),
            human,
            view: game.len(),
            status: GameStatus::Ongoing,
            game,
            generation: 0,
            hint_generation: 0,
            hint: None,
            selected_square: None,
            selected_moves: Vec::new(),
            pending_promotion: None,
            clock: ElapsedClock::new(),
            rng,
            events: Vec::new(),
        };
        timeline.canonical_changed();
        timeline
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    /// Tier the opponent and hints search at; `None` for an unrecognised one.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.config.difficulty
    }

    pub fn human_color(&self) -> Color {
        self.human
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The canonical game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn len(&self) -> usize {
        self.game.len()
    }

    pub fn is_empty(&self) -> bool {
        self.game.is_empty()
    }

    pub fn history(&self) -> Vec<MoveRecord> {
        self.game.history()
    }

    pub fn san_history(&self) -> Vec<String> {
        self.game.san_history()
    }

    /// Index of the displayed move; `None` before the first move.
    pub fn cursor(&self) -> Option<usize> {
        self.view.checked_sub(1)
    }

    pub fn is_live(&self) -> bool {
        self.view == self.game.len()
    }

    pub fn is_reviewing(&self) -> bool {
        !self.is_live()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    /// Side to move in the canonical game.
    pub fn turn(&self) -> Color {
        self.game.side_to_move()
    }

    pub fn is_engine_turn(&self) -> bool {
        self.config.mode == GameMode::Ai && self.game.side_to_move() != self.human
    }

    pub fn hints_enabled(&self) -> bool {
        self.hints_enabled
    }

    pub fn hint(&self) -> Option<Hint> {
        self.hint
    }

    pub fn selected_square(&self) -> Option<u8> {
        self.selected_square
    }

    /// Destinations of the selected piece.
    pub fn selected_targets(&self) -> Vec<u8> {
        let mut targets: Vec<u8> = self.selected_moves.iter().map(|m| m.to).collect();
        targets.dedup();
        targets
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    pub fn clock(&self) -> &ElapsedClock {
        &self.clock
    }

    /// Take the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<TimelineEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Displayed (possibly reviewed) position
    // =========================================================================

    /// The game as of the cursor. Never shares state with the canonical game.
    pub fn displayed_game(&self) -> Game {
        self.game.truncated(self.view)
    }

    pub fn displayed_position(&self) -> Position {
        if self.is_live() {
            self.game.position().clone()
        } else {
            self.displayed_game().position().clone()
        }
    }

    pub fn displayed_fen(&self) -> String {
        self.displayed_position().to_fen()
    }

    /// Move that led to the displayed position.
    pub fn last_move(&self) -> Option<Move> {
        self.view.checked_sub(1).and_then(|i| self.game.moves().nth(i))
    }

    /// Full-move number of the displayed position.
    pub fn move_number(&self) -> u32 {
        self.displayed_position().fullmove_number
    }

    // =========================================================================
    // Canonical changes
    // =========================================================================

    /// Play `mv` after the displayed position. While reviewing this drops
    /// every later move and continues from the cursor.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveRecord, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        let mut working = if self.is_live() {
            self.game.clone()
        } else {
            self.game.truncated(self.view)
        };
        let record = working.play(mv)?;
        let dropped = self.game.len() - self.view;
        self.game = working;
        info!(
            san = %record.san,
            ply = self.game.len(),
            dropped,
            "move played"
        );
        self.canonical_changed();
        Ok(record)
    }

    /// Take back the last move, or the last two against the computer so the
    /// human is to move again. Returns false if nothing was undone.
    pub fn undo(&mut self) -> bool {
        if !self.is_live() || self.is_game_over() || self.game.is_empty() {
            return false;
        }
        let count = match self.config.mode {
            GameMode::Ai => 2,
            GameMode::Local | GameMode::Tutorial => 1,
        };
        if self.game.len() < count {
            return false;
        }
        self.game = self.game.truncated(self.game.len() - count);
        info!(plies = self.game.len(), undone = count, "undo");
        self.canonical_changed();
        true
    }

    /// Bookkeeping after the canonical list changed: cursor back to live,
    /// new generation, stale overlays gone, status refreshed.
    fn canonical_changed(&mut self) {
        self.view = self.game.len();
        self.generation += 1;
        self.status = self.game.status();
        self.clear_selection();
        self.pending_promotion = None;
        self.clear_hint();
        self.events.push(TimelineEvent::PositionChanged {
            plies: self.game.len(),
            fen: self.game.fen(),
        });
        if self.status.is_over() {
            info!(status = %self.status, plies = self.game.len(), "game over");
            self.events.push(TimelineEvent::GameOver {
                status: self.status,
                winner: self.status.winner(),
            });
        }
    }

    // =========================================================================
    // Review
    // =========================================================================

    /// Show the position after move `index` (`None`: the start position).
    /// Returns false for an index past the end.
    pub fn set_cursor(&mut self, index: Option<usize>) -> bool {
        let view = index.map_or(0, |i| i + 1);
        if view > self.game.len() {
            return false;
        }
        if view != self.view {
            self.view = view;
            self.clear_selection();
            self.clear_hint();
            debug!(view, live = self.is_live(), "cursor moved");
        }
        true
    }

    /// Back to the latest position.
    pub fn go_live(&mut self) {
        self.set_cursor(self.game.len().checked_sub(1));
    }

    // =========================================================================
    // Square input
    // =========================================================================

    /// Click on `sq`: select an own piece, or play the selected piece to a
    /// legal destination.
    pub fn select_square(&mut self, sq: u8) -> SelectOutcome {
        if self.is_game_over()
            || self.pending_promotion.is_some()
            || !self.is_live()
            || self.is_engine_turn()
        {
            debug!(sq, "square input ignored");
            return SelectOutcome::Ignored;
        }
        self.clear_hint();

        if self.selected_square.is_some() {
            let candidates: Vec<Move> = self
                .selected_moves
                .iter()
                .copied()
                .filter(|m| m.to == sq)
                .collect();
            if let Some(&first) = candidates.first() {
                if first.promo.is_some() {
                    let pending = PendingPromotion {
                        from: first.from,
                        to: first.to,
                    };
                    self.clear_selection();
                    self.pending_promotion = Some(pending);
                    self.events.push(TimelineEvent::PromotionPending {
                        from: pending.from,
                        to: pending.to,
                    });
                    return SelectOutcome::PromotionPending(pending);
                }
                return match self.make_move(first) {
                    Ok(record) => SelectOutcome::Moved(record),
                    Err(e) => {
                        warn!(error = %e, "selected move rejected");
                        self.clear_selection();
                        SelectOutcome::Cleared
                    }
                };
            }
        }

        let side = self.game.side_to_move();
        match self.game.position().piece_at(sq) {
            Some(piece) if piece.color == side => {
                self.selected_square = Some(sq);
                self.selected_moves = self.game.legal_moves_from(sq);
                SelectOutcome::Selected {
                    from: sq,
                    targets: self.selected_targets(),
                }
            }
            _ => {
                self.clear_selection();
                SelectOutcome::Cleared
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_square = None;
        self.selected_moves.clear();
    }

    /// Finish the pending promotion with `piece`.
    pub fn resolve_promotion(&mut self, piece: PieceKind) -> Result<MoveRecord, MoveError> {
        let pending = self
            .pending_promotion
            .take()
            .ok_or(MoveError::NoPendingPromotion)?;
        self.events.push(TimelineEvent::PromotionResolved { piece: Some(piece) });
        match self.make_move(Move::with_promo(pending.from, pending.to, piece)) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(error = %e, "promotion rejected");
                Err(e)
            }
        }
    }

    pub fn cancel_promotion(&mut self) -> bool {
        if self.pending_promotion.take().is_none() {
            return false;
        }
        self.events.push(TimelineEvent::PromotionResolved { piece: None });
        true
    }

    // =========================================================================
    // Hints
    // =========================================================================

    pub fn set_hints(&mut self, enabled: bool) {
        if self.hints_enabled == enabled {
            return;
        }
        self.hints_enabled = enabled;
        self.config.hints = enabled;
        self.clear_hint();
        debug!(enabled, "hints toggled");
    }

    fn clear_hint(&mut self) {
        self.hint_generation += 1;
        if self.hint.take().is_some() {
            self.events.push(TimelineEvent::HintCleared);
        }
    }

    fn wants_hint(&self) -> bool {
        let humans_turn = match self.config.mode {
            GameMode::Local => true,
            GameMode::Ai | GameMode::Tutorial => self.game.side_to_move() == self.human,
        };
        self.hints_enabled
            && humans_turn
            && self.hint.is_none()
            && self.is_live()
            && !self.is_game_over()
            && self.pending_promotion.is_none()
            && self.selected_square.is_none()
    }

    fn wants_opponent_move(&self) -> bool {
        self.is_live() && !self.is_game_over() && self.is_engine_turn()
    }

    // =========================================================================
    // Search jobs
    // =========================================================================

    fn opponent(&self) -> Opponent {
        Opponent::new(self.config.difficulty)
    }

    /// Key of the computer move due now, if any.
    pub fn opponent_job_key(&self) -> Option<JobKey> {
        self.wants_opponent_move().then_some(JobKey {
            session: self.session,
            kind: JobKind::Opponent,
            generation: self.generation,
        })
    }

    /// Key of the hint due now, if any.
    pub fn hint_job_key(&self) -> Option<JobKey> {
        self.wants_hint().then_some(JobKey {
            session: self.session,
            kind: JobKind::Hint,
            generation: self.hint_generation,
        })
    }

    /// Snapshot for the computer's next move.
    pub fn opponent_job(&mut self) -> Option<SearchJob> {
        let key = self.opponent_job_key()?;
        let opponent = self.opponent();
        Some(SearchJob {
            key,
            depth: opponent.depth(&self.game),
            policy: opponent.policy(),
            game: self.game.clone(),
            seed: self.rng.gen(),
        })
    }

    /// Snapshot for a hint. Hints are always the best ranked move.
    pub fn hint_job(&mut self) -> Option<SearchJob> {
        let key = self.hint_job_key()?;
        Some(SearchJob {
            key,
            depth: self.opponent().depth(&self.game),
            policy: SelectionPolicy::Best,
            game: self.game.clone(),
            seed: self.rng.gen(),
        })
    }

    /// Apply a finished job. Returns false if it was stale and dropped.
    pub fn apply_outcome(&mut self, outcome: JobOutcome) -> bool {
        match outcome.key.kind {
            JobKind::Opponent => self.apply_opponent_outcome(outcome),
            JobKind::Hint => self.apply_hint_outcome(outcome),
        }
    }

    pub fn apply_opponent_outcome(&mut self, outcome: JobOutcome) -> bool {
        if self.opponent_job_key() != Some(outcome.key) {
            debug!(generation = outcome.key.generation, "stale opponent move dropped");
            return false;
        }
        let Some(mv) = outcome.mv else {
            return false;
        };
        match self.make_move(mv) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "opponent move rejected");
                false
            }
        }
    }

    pub fn apply_hint_outcome(&mut self, outcome: JobOutcome) -> bool {
        if self.hint_job_key() != Some(outcome.key) {
            debug!(generation = outcome.key.generation, "stale hint dropped");
            return false;
        }
        let Some(mv) = outcome.mv else {
            return false;
        };
        let hint = Hint {
            from: mv.from,
            to: mv.to,
        };
        self.hint = Some(hint);
        self.events.push(TimelineEvent::HintAvailable {
            from: hint.from,
            to: hint.to,
        });
        true
    }

    /// Compute and play the computer's move on this thread.
    pub fn trigger_opponent_move(&mut self) -> bool {
        match self.opponent_job() {
            Some(job) => {
                let outcome = job.run();
                self.apply_opponent_outcome(outcome)
            }
            None => false,
        }
    }

    /// Compute the hint on this thread.
    pub fn compute_hint(&mut self) -> Option<Hint> {
        let job = self.hint_job()?;
        let outcome = job.run();
        self.apply_hint_outcome(outcome);
        self.hint
    }

    // =========================================================================
    // Clock, saves and results
    // =========================================================================

    /// One second passed. The clock only runs while live and in play.
    pub fn tick(&mut self) -> bool {
        if !self.is_live() || self.is_game_over() {
            return false;
        }
        self.clock.tick();
        true
    }

    pub fn save_record(&self) -> SavedGame {
        SavedGame::new(
            self.config.mode_label(),
            self.game.fen(),
            self.game.san_history(),
            self.clock.seconds(),
        )
    }

    /// Result from the human's side once the game is over.
    pub fn outcome_for_human(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate { winner } if winner == self.human => Some(Outcome::Win),
            GameStatus::Checkmate { .. } => Some(Outcome::Loss),
            _ => Some(Outcome::Draw),
        }
    }

    /// Count a finished game against the computer. Other games are not
    /// rated; returns false for them.
    pub fn record_result(&self, stats: &mut PlayerStats) -> bool {
        let (GameMode::Ai, Some(difficulty)) = (self.config.mode, self.config.difficulty) else {
            return false;
        };
        let Some(outcome) = self.outcome_for_human() else {
            return false;
        };
        stats.record_game(outcome, difficulty, &self.game.san_history());
        true
    }
}

fn restore(config: &GameConfig) -> Game {
    if !config.history.is_empty() {
        match Game::replay(&config.history) {
            Ok(game) => return game,
            Err(e) => warn!(error = %e, "saved moves do not replay, trying saved position"),
        }
    }
    if let Some(fen) = &config.fen {
        match Game::from_fen(fen) {
            Ok(game) => return game,
            Err(e) => warn!(error = %e, fen = %fen, "saved position is invalid"),
        }
    }
    if config.is_resume() {
        error!("could not restore saved game, starting a new one");
    }
    Game::new()
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod timeline_tests;
